use crate::app::processors::{JudicialBinderProcessor, KeyDocumentsBinderProcessor};
use crate::core::dependencies::ProcessorDependencies;
use crate::core::processor::{Processor, ProcessorKind};
use crate::domain::model::{labels, Binder, CourtClass};
use crate::utils::error::{BinderError, Result};
use std::collections::HashMap;

pub fn processor_kind(court_class: CourtClass) -> ProcessorKind {
    match court_class {
        CourtClass::C | CourtClass::F | CourtClass::L | CourtClass::M => ProcessorKind::Judicial,
        CourtClass::A | CourtClass::Y | CourtClass::T => ProcessorKind::KeyDocuments,
    }
}

pub fn resolve_court_class(binder_labels: &HashMap<String, String>) -> Result<CourtClass> {
    let Some(code) = binder_labels.get(labels::COURT_CLASS_CD) else {
        tracing::error!("❌ Binder has no {} label", labels::COURT_CLASS_CD);
        return Err(BinderError::ProcessorUnavailable {
            reason: format!("missing {} label", labels::COURT_CLASS_CD),
        });
    };

    code.parse::<CourtClass>().map_err(|e| {
        tracing::error!("❌ Cannot map court class to a binder processor: {}", e);
        BinderError::ProcessorUnavailable {
            reason: e.to_string(),
        }
    })
}

/// Processor kind for a label set, without logging dispatch failures.
pub fn kind_for_labels(binder_labels: &HashMap<String, String>) -> Option<ProcessorKind> {
    binder_labels
        .get(labels::COURT_CLASS_CD)?
        .parse::<CourtClass>()
        .ok()
        .map(processor_kind)
}

pub struct BinderFactory {
    deps: ProcessorDependencies,
}

impl BinderFactory {
    pub fn new(deps: ProcessorDependencies) -> Self {
        Self { deps }
    }

    pub fn create_from_labels(&self, binder_labels: HashMap<String, String>) -> Result<Processor> {
        self.create(Binder::with_labels(binder_labels))
    }

    pub fn create(&self, binder: Binder) -> Result<Processor> {
        let court_class = resolve_court_class(&binder.labels)?;
        let processor = match processor_kind(court_class) {
            ProcessorKind::Judicial => {
                Processor::Judicial(JudicialBinderProcessor::new(binder, self.deps.clone()))
            }
            ProcessorKind::KeyDocuments => {
                Processor::KeyDocuments(KeyDocumentsBinderProcessor::new(binder, self.deps.clone()))
            }
        };

        tracing::debug!("Court class {} uses {:?} processor", court_class, processor.kind());
        Ok(processor)
    }
}

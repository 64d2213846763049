use crate::core::base;
use crate::core::context::RequestContext;
use crate::core::dependencies::ProcessorDependencies;
use crate::core::key_document_resolver;
use crate::core::processor::BinderProcessor;
use crate::domain::model::{labels, Binder, OperationResult};
use crate::utils::error::{BinderError, Result};
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};

pub const REQUIRED_LABELS: [&str; 4] = [
    labels::PARTICIPANT_ID,
    labels::COURT_CLASS_CD,
    labels::APPEARANCE_ID,
    labels::PHYSICAL_FILE_ID,
];

/// 系統自動整理的刑事案件關鍵文件 Binder
pub struct KeyDocumentsBinderProcessor {
    binder: Binder,
    deps: ProcessorDependencies,
}

impl KeyDocumentsBinderProcessor {
    pub fn new(binder: Binder, deps: ProcessorDependencies) -> Self {
        Self { binder, deps }
    }

    pub fn into_binder(self) -> Binder {
        self.binder
    }

    fn missing_labels(&self) -> Vec<String> {
        REQUIRED_LABELS
            .iter()
            .filter(|key| self.binder.label(key).is_none())
            .map(|key| base::missing_label_error(key))
            .collect()
    }

    /// Existing binders older than the refresh threshold, or without an
    /// update timestamp. A threshold chrono cannot represent is a config error.
    pub fn is_stale(&self) -> Result<bool> {
        let hours = self.deps.config.key_documents_refresh_hours();
        let threshold = i64::try_from(hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .ok_or_else(|| BinderError::InvalidConfigValueError {
                field: "binder.key_documents_refresh_hours".to_string(),
                value: hours.to_string(),
                reason: "Refresh threshold is out of range".to_string(),
            })?;

        Ok(match self.binder.updated_date {
            Some(updated) => Utc::now() - updated >= threshold,
            None => true,
        })
    }

    /// Rebuilds the document list from the current file content snapshot.
    async fn refresh_documents(&mut self, ctx: &RequestContext) -> Result<OperationResult> {
        let missing = self.missing_labels();
        if !missing.is_empty() {
            return Ok(OperationResult::failure(missing));
        }
        let physical_file_id = self.binder.label(labels::PHYSICAL_FILE_ID).unwrap_or_default().to_string();
        let participant_id = self.binder.label(labels::PARTICIPANT_ID).unwrap_or_default().to_string();

        let content = self.deps.file_content(ctx, &physical_file_id).await?;
        let Some(accused) = content.find_accused(&physical_file_id, &participant_id) else {
            tracing::warn!(
                "No accused record for file {} and participant {}, binder left empty",
                physical_file_id,
                participant_id
            );
            self.binder.documents = Vec::new();
            return Ok(OperationResult::success());
        };

        let documents = key_document_resolver::to_binder_documents(accused);
        self.binder.documents = key_document_resolver::select(documents);

        let backfill = [
            (labels::PROF_SEQ_NO, &accused.prof_seq_no),
            (labels::COURT_LEVEL_CD, &accused.court_level_cd),
            (labels::COURT_CLASS_CD, &accused.court_class_cd),
        ];
        for (key, value) in backfill {
            if let Some(value) = value {
                self.binder.labels.entry(key.to_string()).or_insert_with(|| value.clone());
            }
        }

        tracing::info!(
            "📚 Selected {} key document(s) for file {}",
            self.binder.documents.len(),
            physical_file_id
        );
        Ok(OperationResult::success())
    }
}

#[async_trait]
impl BinderProcessor for KeyDocumentsBinderProcessor {
    fn binder(&self) -> &Binder {
        &self.binder
    }

    fn binder_mut(&mut self) -> &mut Binder {
        &mut self.binder
    }

    async fn pre_process(&mut self, _ctx: &RequestContext) -> Result<()> {
        // 標籤為系統資料，保持原樣
        Ok(())
    }

    async fn validate(&self, ctx: &RequestContext) -> Result<OperationResult> {
        let result = base::validate(&self.binder, self.deps.validator.as_ref(), ctx);
        if !result.succeeded() {
            return Ok(result);
        }

        Ok(OperationResult::from_errors(self.missing_labels()))
    }

    async fn process(&mut self, ctx: &RequestContext) -> Result<OperationResult> {
        if self.binder.is_new() {
            return self.refresh_documents(ctx).await;
        }

        if !self.is_stale()? {
            tracing::debug!("Binder {:?} is fresh, keeping existing documents", self.binder.id);
            return Ok(OperationResult::success());
        }

        tracing::info!("🔄 Refreshing stale key documents binder {:?}", self.binder.id);
        self.refresh_documents(ctx).await
    }
}

use crate::app::processors::{JudicialBinderProcessor, KeyDocumentsBinderProcessor};
use crate::core::context::RequestContext;
use crate::domain::model::{Binder, OperationResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Binder lifecycle. Callers run `pre_process`, `validate`, `process` in
/// order and stop at the first failure.
#[async_trait]
pub trait BinderProcessor: Send + Sync {
    fn binder(&self) -> &Binder;

    fn binder_mut(&mut self) -> &mut Binder;

    async fn pre_process(&mut self, ctx: &RequestContext) -> Result<()>;

    async fn validate(&self, ctx: &RequestContext) -> Result<OperationResult>;

    /// User-curated binders carry a caller-supplied document set, so there
    /// is nothing to compute.
    async fn process(&mut self, _ctx: &RequestContext) -> Result<OperationResult> {
        Ok(OperationResult::success())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorKind {
    Judicial,
    KeyDocuments,
}

/// Closed set of processor variants chosen by `BinderFactory`.
pub enum Processor {
    Judicial(JudicialBinderProcessor),
    KeyDocuments(KeyDocumentsBinderProcessor),
}

impl Processor {
    pub fn kind(&self) -> ProcessorKind {
        match self {
            Processor::Judicial(_) => ProcessorKind::Judicial,
            Processor::KeyDocuments(_) => ProcessorKind::KeyDocuments,
        }
    }

    pub fn into_binder(self) -> Binder {
        match self {
            Processor::Judicial(p) => p.into_binder(),
            Processor::KeyDocuments(p) => p.into_binder(),
        }
    }
}

#[async_trait]
impl BinderProcessor for Processor {
    fn binder(&self) -> &Binder {
        match self {
            Processor::Judicial(p) => p.binder(),
            Processor::KeyDocuments(p) => p.binder(),
        }
    }

    fn binder_mut(&mut self) -> &mut Binder {
        match self {
            Processor::Judicial(p) => p.binder_mut(),
            Processor::KeyDocuments(p) => p.binder_mut(),
        }
    }

    async fn pre_process(&mut self, ctx: &RequestContext) -> Result<()> {
        match self {
            Processor::Judicial(p) => p.pre_process(ctx).await,
            Processor::KeyDocuments(p) => p.pre_process(ctx).await,
        }
    }

    async fn validate(&self, ctx: &RequestContext) -> Result<OperationResult> {
        match self {
            Processor::Judicial(p) => p.validate(ctx).await,
            Processor::KeyDocuments(p) => p.validate(ctx).await,
        }
    }

    async fn process(&mut self, ctx: &RequestContext) -> Result<OperationResult> {
        match self {
            Processor::Judicial(p) => p.process(ctx).await,
            Processor::KeyDocuments(p) => p.process(ctx).await,
        }
    }
}

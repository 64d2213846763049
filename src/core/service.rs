use crate::core::base;
use crate::core::context::{Intent, RequestContext};
use crate::core::factory::{kind_for_labels, BinderFactory};
use crate::core::processor::{BinderProcessor, Processor, ProcessorKind};
use crate::domain::model::{labels, Binder, OperationResult};
use crate::domain::ports::BinderStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

pub const BINDER_NOT_FOUND: &str = "Binder not found.";

#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub result: OperationResult,
    pub binder: Binder,
}

/// 執行完整生命週期並寫入儲存層
pub struct BinderService {
    factory: BinderFactory,
    store: Arc<dyn BinderStore>,
}

impl BinderService {
    pub fn new(factory: BinderFactory, store: Arc<dyn BinderStore>) -> Self {
        Self { factory, store }
    }

    /// Runs the lifecycle in memory without persisting.
    pub async fn run_lifecycle(&self, binder: Binder, ctx: &RequestContext) -> Result<SaveOutcome> {
        let mut processor = self.factory.create(binder)?;
        tracing::info!("Starting {:?} binder lifecycle", processor.kind());

        processor.pre_process(ctx).await?;

        let validation = processor.validate(ctx).await?;
        if !validation.succeeded() {
            return Ok(SaveOutcome {
                result: validation,
                binder: processor.into_binder(),
            });
        }

        let processed = processor.process(ctx).await?;
        Ok(SaveOutcome {
            result: processed,
            binder: processor.into_binder(),
        })
    }

    pub async fn save(&self, mut binder: Binder, ctx: &RequestContext) -> Result<SaveOutcome> {
        if let Intent::Edit { route_id } = &ctx.intent {
            let existing = match self.load_owned(route_id, ctx).await? {
                Ok(existing) => existing,
                Err(denied) => return Ok(SaveOutcome { result: denied, binder }),
            };
            // 時間戳記只由儲存層決定
            binder.created_date = existing.created_date;
            binder.updated_date = existing.updated_date;
        }

        let outcome = self.run_lifecycle(binder, ctx).await?;
        if !outcome.result.succeeded() {
            return Ok(outcome);
        }

        let binder = if outcome.binder.is_new() {
            self.store.add(outcome.binder).await?
        } else {
            self.store.update(outcome.binder).await?
        };
        tracing::info!("✅ Binder {:?} saved with {} document(s)", binder.id, binder.documents.len());

        Ok(SaveOutcome {
            result: OperationResult::success(),
            binder,
        })
    }

    /// Binders owned by the acting user matching `query`. Stale key-document
    /// binders are refreshed and persisted; a missing key-document binder is
    /// assembled on first access.
    pub async fn get_by_labels(&self, query: HashMap<String, String>, ctx: &RequestContext) -> Result<Vec<Binder>> {
        let mut query = query;
        query.insert(labels::JUDGE_ID.to_string(), ctx.user.user_id.clone());

        let found = self.store.find_by_labels(&query).await?;
        let is_key_documents_query = kind_for_labels(&query) == Some(ProcessorKind::KeyDocuments);

        if found.is_empty() && is_key_documents_query {
            tracing::info!("No key documents binder yet, assembling one");
            let outcome = self
                .save(Binder::with_labels(query), &ctx.with_intent(Intent::Create))
                .await?;
            if !outcome.result.succeeded() {
                tracing::warn!("Key documents binder not created: {:?}", outcome.result.errors());
                return Ok(Vec::new());
            }
            return Ok(vec![outcome.binder]);
        }

        let mut binders = Vec::with_capacity(found.len());
        for binder in found {
            binders.push(self.refresh_if_key_documents(binder, ctx).await?);
        }
        Ok(binders)
    }

    pub async fn delete(&self, id: &str, ctx: &RequestContext) -> Result<OperationResult> {
        if let Err(denied) = self.load_owned(id, ctx).await? {
            return Ok(denied);
        }

        if !self.store.delete(id).await? {
            return Ok(OperationResult::failure([BINDER_NOT_FOUND]));
        }
        tracing::info!("🗑️ Binder {} deleted", id);
        Ok(OperationResult::success())
    }

    /// Stored binder for `id` when it exists and belongs to the acting user.
    async fn load_owned(
        &self,
        id: &str,
        ctx: &RequestContext,
    ) -> Result<std::result::Result<Binder, OperationResult>> {
        match self.store.get(id).await? {
            None => Ok(Err(OperationResult::failure([BINDER_NOT_FOUND]))),
            Some(existing) if existing.label(labels::JUDGE_ID) != Some(ctx.user.user_id.as_str()) => {
                Ok(Err(OperationResult::failure([base::ACCESS_DENIED])))
            }
            Some(existing) => Ok(Ok(existing)),
        }
    }

    async fn refresh_if_key_documents(&self, binder: Binder, ctx: &RequestContext) -> Result<Binder> {
        if kind_for_labels(&binder.labels) != Some(ProcessorKind::KeyDocuments) {
            return Ok(binder);
        }

        let Processor::KeyDocuments(mut processor) = self.factory.create(binder.clone())? else {
            return Ok(binder);
        };
        if !processor.is_stale()? {
            return Ok(binder);
        }

        let result = processor.process(ctx).await?;
        if !result.succeeded() {
            tracing::warn!("Key documents refresh failed: {:?}", result.errors());
            return Ok(binder);
        }
        self.store.update(processor.into_binder()).await
    }
}

use crate::core::context::RequestContext;
use crate::domain::ports::{
    BasicValidator, BinderCache, CacheFactory, ConfigProvider, FileRecordsProvider,
    TranscriptProvider,
};
use crate::domain::snapshot::{CompletedTranscript, FileContent, FileSnapshot};
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Typed get-or-add over the JSON-valued cache port.
pub async fn get_or_add<T, F>(cache: &dyn BinderCache, key: &str, ttl: Duration, fetch: F) -> Result<T>
where
    T: Serialize + DeserializeOwned + Send,
    F: Future<Output = Result<T>> + Send,
{
    let factory: CacheFactory<'_> = Box::pin(async move {
        let fresh = fetch.await?;
        Ok(serde_json::to_value(fresh)?)
    });
    let value = cache.get_or_add_value(key, ttl, factory).await?;
    Ok(serde_json::from_value(value)?)
}

pub fn cache_key(kind: &str, physical_file_id: &str, tenant: &str) -> String {
    format!("{}:{}:{}", kind, physical_file_id, tenant)
}

/// Collaborators shared by every processor variant.
#[derive(Clone)]
pub struct ProcessorDependencies {
    pub file_records: Arc<dyn FileRecordsProvider>,
    pub transcripts: Arc<dyn TranscriptProvider>,
    pub cache: Arc<dyn BinderCache>,
    pub validator: Arc<dyn BasicValidator>,
    pub config: Arc<dyn ConfigProvider>,
}

impl ProcessorDependencies {
    pub async fn file_snapshot(&self, ctx: &RequestContext, physical_file_id: &str) -> Result<FileSnapshot> {
        let query = ctx.file_query(physical_file_id);
        let key = cache_key("file-snapshot", physical_file_id, &query.agency_id);
        tracing::debug!("Fetching file snapshot via cache key {}", key);

        ctx.cancel
            .run(get_or_add(
                self.cache.as_ref(),
                &key,
                self.config.snapshot_ttl(),
                async { self.file_records.file_snapshot(&query).await },
            ))
            .await
    }

    pub async fn file_content(&self, ctx: &RequestContext, physical_file_id: &str) -> Result<FileContent> {
        let query = ctx.file_query(physical_file_id);
        let key = cache_key("file-content", physical_file_id, &query.agency_id);
        tracing::debug!("Fetching file content via cache key {}", key);

        ctx.cancel
            .run(get_or_add(
                self.cache.as_ref(),
                &key,
                self.config.snapshot_ttl(),
                async { self.file_records.file_content(&query).await },
            ))
            .await
    }

    pub async fn completed_transcripts(
        &self,
        ctx: &RequestContext,
        physical_file_id: &str,
        justin_number: Option<&str>,
    ) -> Result<Vec<CompletedTranscript>> {
        let key = cache_key("transcripts", physical_file_id, &ctx.user.agency_id);
        tracing::debug!("Fetching completed transcripts via cache key {}", key);

        ctx.cancel
            .run(get_or_add(
                self.cache.as_ref(),
                &key,
                self.config.transcript_ttl(),
                async {
                    self.transcripts
                        .completed_transcripts(physical_file_id, justin_number, true)
                        .await
                },
            ))
            .await
    }
}

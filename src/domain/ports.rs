use crate::domain::model::{Binder, OperationResult};
use crate::domain::snapshot::{CompletedTranscript, FileContent, FileSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn key_documents_refresh_hours(&self) -> u64;
    fn snapshot_ttl(&self) -> Duration;
    fn transcript_ttl(&self) -> Duration;
}

/// 查詢檔案紀錄服務所需的租戶範圍與檔案識別
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    pub agency_id: String,
    pub participant_id: String,
    pub application_code: String,
    pub physical_file_id: String,
}

#[async_trait]
pub trait FileRecordsProvider: Send + Sync {
    async fn file_snapshot(&self, query: &FileQuery) -> Result<FileSnapshot>;
    async fn file_content(&self, query: &FileQuery) -> Result<FileContent>;
}

#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn completed_transcripts(
        &self,
        physical_file_id: &str,
        justin_number: Option<&str>,
        include_children: bool,
    ) -> Result<Vec<CompletedTranscript>>;
}

pub type CacheFactory<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value>> + Send + 'a>>;

#[async_trait]
pub trait BinderCache: Send + Sync {
    /// Returns the cached value for `key`, running `factory` only when the
    /// entry is missing or older than `ttl`.
    async fn get_or_add_value(
        &self,
        key: &str,
        ttl: Duration,
        factory: CacheFactory<'_>,
    ) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait BinderStore: Send + Sync {
    async fn find_by_labels(&self, labels: &HashMap<String, String>) -> Result<Vec<Binder>>;
    async fn get(&self, id: &str) -> Result<Option<Binder>>;
    async fn add(&self, binder: Binder) -> Result<Binder>;
    async fn update(&self, binder: Binder) -> Result<Binder>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    pub is_edit: bool,
    pub route_id: Option<String>,
}

pub trait BasicValidator: Send + Sync {
    fn validate(&self, binder: &Binder, context: &ValidationContext) -> OperationResult;
}

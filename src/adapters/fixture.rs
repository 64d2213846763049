use crate::domain::ports::{FileQuery, FileRecordsProvider, TranscriptProvider};
use crate::domain::snapshot::{CompletedTranscript, FileContent, FileSnapshot};
use crate::utils::error::{BinderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureFile {
    #[serde(default)]
    pub snapshot: Option<FileSnapshot>,
    #[serde(default)]
    pub content: Option<FileContent>,
    #[serde(default)]
    pub transcripts: Vec<CompletedTranscript>,
}

/// 以 JSON 檔案取代檔案紀錄服務，供離線執行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureFileRecords {
    pub files: HashMap<String, FixtureFile>,
}

impl FixtureFileRecords {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    fn file(&self, physical_file_id: &str) -> Result<&FixtureFile> {
        self.files.get(physical_file_id).ok_or_else(not_found)
    }
}

fn not_found() -> BinderError {
    BinderError::Upstream {
        service: "fixture".to_string(),
        status: 404,
    }
}

#[async_trait]
impl FileRecordsProvider for FixtureFileRecords {
    async fn file_snapshot(&self, query: &FileQuery) -> Result<FileSnapshot> {
        self.file(&query.physical_file_id)?
            .snapshot
            .clone()
            .ok_or_else(not_found)
    }

    async fn file_content(&self, query: &FileQuery) -> Result<FileContent> {
        Ok(self
            .file(&query.physical_file_id)?
            .content
            .clone()
            .unwrap_or_default())
    }
}

#[async_trait]
impl TranscriptProvider for FixtureFileRecords {
    async fn completed_transcripts(
        &self,
        physical_file_id: &str,
        _justin_number: Option<&str>,
        _include_children: bool,
    ) -> Result<Vec<CompletedTranscript>> {
        Ok(self
            .files
            .get(physical_file_id)
            .map(|f| f.transcripts.clone())
            .unwrap_or_default())
    }
}

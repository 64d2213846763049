use crate::config::toml_config::FileRecordsConfig;
use crate::domain::ports::{FileQuery, FileRecordsProvider, TranscriptProvider};
use crate::domain::snapshot::{CompletedTranscript, FileContent, FileSnapshot};
use crate::utils::error::{BinderError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// 檔案紀錄服務與逐字稿服務的 HTTP 用戶端
#[derive(Debug, Clone)]
pub struct HttpFileRecords {
    client: Client,
    endpoint: String,
    transcripts_endpoint: String,
}

impl HttpFileRecords {
    pub fn new(endpoint: &str, transcripts_endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            transcripts_endpoint: transcripts_endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &FileRecordsConfig) -> Result<Self> {
        Self::new(
            &config.endpoint,
            config.transcripts_endpoint(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    async fn read_json<T: DeserializeOwned>(service: &str, response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("{} response status: {}", service, status);

        if !status.is_success() {
            return Err(BinderError::Upstream {
                service: service.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    fn scoped_get(&self, url: String, query: &FileQuery) -> reqwest::RequestBuilder {
        self.client.get(url).query(&[
            ("agencyId", query.agency_id.as_str()),
            ("participantId", query.participant_id.as_str()),
            ("applicationCode", query.application_code.as_str()),
        ])
    }
}

#[async_trait]
impl FileRecordsProvider for HttpFileRecords {
    async fn file_snapshot(&self, query: &FileQuery) -> Result<FileSnapshot> {
        let url = format!("{}/files/{}", self.endpoint, query.physical_file_id);
        tracing::debug!("Making file snapshot request to: {}", url);

        let response = self.scoped_get(url, query).send().await?;
        Self::read_json("file-records", response).await
    }

    async fn file_content(&self, query: &FileQuery) -> Result<FileContent> {
        let url = format!("{}/files/{}/content", self.endpoint, query.physical_file_id);
        tracing::debug!("Making file content request to: {}", url);

        let response = self.scoped_get(url, query).send().await?;
        Self::read_json("file-records", response).await
    }
}

#[async_trait]
impl TranscriptProvider for HttpFileRecords {
    async fn completed_transcripts(
        &self,
        physical_file_id: &str,
        justin_number: Option<&str>,
        include_children: bool,
    ) -> Result<Vec<CompletedTranscript>> {
        let url = format!("{}/transcripts/completed", self.transcripts_endpoint);
        tracing::debug!("Making completed transcripts request to: {}", url);

        let mut request = self.client.get(url).query(&[
            ("physicalFileId", physical_file_id),
            ("includeChildren", if include_children { "true" } else { "false" }),
        ]);
        if let Some(justin_number) = justin_number {
            request = request.query(&[("justinNumber", justin_number)]);
        }

        let response = request.send().await?;
        Self::read_json("transcripts", response).await
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use binder_engine::adapters::InMemoryCache;
use binder_engine::core::basic_validator::BasicBinderValidator;
use binder_engine::domain::ports::{ConfigProvider, FileQuery, FileRecordsProvider, TranscriptProvider};
use binder_engine::domain::snapshot::{CompletedTranscript, FileContent, FileSnapshot};
use binder_engine::{labels, ActingUser, Binder, BinderDocument, BinderError, ProcessorDependencies, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const JUDGE: &str = "J1";
pub const AGENCY: &str = "AG1";

pub fn user(user_id: &str) -> ActingUser {
    ActingUser {
        user_id: user_id.to_string(),
        agency_id: AGENCY.to_string(),
        participant_id: "P-JUDGE".to_string(),
        application_code: "BINDER".to_string(),
    }
}

pub struct TestConfig {
    pub refresh_hours: u64,
}

impl ConfigProvider for TestConfig {
    fn key_documents_refresh_hours(&self) -> u64 {
        self.refresh_hours
    }

    fn snapshot_ttl(&self) -> Duration {
        Duration::from_secs(60)
    }

    fn transcript_ttl(&self) -> Duration {
        Duration::from_secs(60)
    }
}

/// File records fake with per-call counters; contents can be swapped mid-test.
#[derive(Default)]
pub struct FakeFileRecords {
    pub snapshots: Mutex<HashMap<String, FileSnapshot>>,
    pub contents: Mutex<HashMap<String, FileContent>>,
    pub snapshot_calls: AtomicUsize,
    pub content_calls: AtomicUsize,
    pub delay: Option<Duration>,
}

impl FakeFileRecords {
    pub fn with_snapshot(file_id: &str, snapshot: FileSnapshot) -> Self {
        let fake = Self::default();
        fake.snapshots.lock().unwrap().insert(file_id.to_string(), snapshot);
        fake
    }

    pub fn with_content(file_id: &str, content: FileContent) -> Self {
        let fake = Self::default();
        fake.set_content(file_id, content);
        fake
    }

    pub fn set_content(&self, file_id: &str, content: FileContent) {
        self.contents.lock().unwrap().insert(file_id.to_string(), content);
    }

    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileRecordsProvider for FakeFileRecords {
    async fn file_snapshot(&self, query: &FileQuery) -> Result<FileSnapshot> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.snapshots
            .lock()
            .unwrap()
            .get(&query.physical_file_id)
            .cloned()
            .ok_or(BinderError::Upstream {
                service: "file-records".to_string(),
                status: 404,
            })
    }

    async fn file_content(&self, query: &FileQuery) -> Result<FileContent> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .contents
            .lock()
            .unwrap()
            .get(&query.physical_file_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeTranscripts {
    pub completed: Vec<CompletedTranscript>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeTranscripts {
    pub fn completed(pairs: &[(u64, u64)]) -> Self {
        Self {
            completed: pairs
                .iter()
                .map(|(order_id, document_id)| CompletedTranscript {
                    order_id: *order_id,
                    document_id: *document_id,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptProvider for FakeTranscripts {
    async fn completed_transcripts(
        &self,
        _physical_file_id: &str,
        _justin_number: Option<&str>,
        _include_children: bool,
    ) -> Result<Vec<CompletedTranscript>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BinderError::Upstream {
                service: "transcripts".to_string(),
                status: 500,
            });
        }
        Ok(self.completed.clone())
    }
}

pub fn deps(files: Arc<FakeFileRecords>, transcripts: Arc<FakeTranscripts>, refresh_hours: u64) -> ProcessorDependencies {
    ProcessorDependencies {
        file_records: files,
        transcripts,
        cache: Arc::new(InMemoryCache::new()),
        validator: Arc::new(BasicBinderValidator::new()),
        config: Arc::new(TestConfig { refresh_hours }),
    }
}

pub fn label_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

pub fn judicial_binder(file_id: &str, documents: Vec<BinderDocument>) -> Binder {
    Binder {
        labels: label_map(&[
            (labels::PHYSICAL_FILE_ID, file_id),
            (labels::COURT_CLASS_CD, "F"),
            (labels::JUDGE_ID, JUDGE),
        ]),
        documents,
        ..Default::default()
    }
}

pub fn key_documents_labels(file_id: &str, participant_id: &str) -> HashMap<String, String> {
    label_map(&[
        (labels::PHYSICAL_FILE_ID, file_id),
        (labels::PARTICIPANT_ID, participant_id),
        (labels::APPEARANCE_ID, "APP1"),
        (labels::COURT_CLASS_CD, "A"),
        (labels::JUDGE_ID, JUDGE),
    ])
}

pub fn snapshot(appearances: &[&str], documents: &[&str], references: &[&str]) -> FileSnapshot {
    let owned = |ids: &[&str]| -> Vec<String> { ids.iter().map(|s| s.to_string()).collect() };
    FileSnapshot {
        court_class: "F".to_string(),
        appearances: owned(appearances),
        documents: owned(documents),
        reference_documents: owned(references),
    }
}

use crate::core::base;
use crate::core::context::RequestContext;
use crate::core::dependencies::ProcessorDependencies;
use crate::core::processor::BinderProcessor;
use crate::domain::model::{labels, Binder, BinderDocument, OperationResult};
use crate::utils::error::{BinderError, Result};
use async_trait::async_trait;
use std::collections::HashSet;

pub const INVALID_DOCUMENT_IDS: &str = "Found one or more invalid Document IDs.";
pub const TRANSCRIPT_LOOKUP_FAILED: &str = "Unable to verify transcript documents at this time.";

/// 法官自選文件的 Binder（民事、家事、小額、執行案件）
pub struct JudicialBinderProcessor {
    binder: Binder,
    deps: ProcessorDependencies,
}

/// 格式正確、待比對的逐字稿
struct TranscriptRequest {
    order_id: String,
    document_id: u64,
}

impl JudicialBinderProcessor {
    pub fn new(binder: Binder, deps: ProcessorDependencies) -> Self {
        Self { binder, deps }
    }

    pub fn into_binder(self) -> Binder {
        self.binder
    }

    /// Splits transcripts into well-formed lookups and one error per malformed entry.
    fn collect_transcript_requests(transcripts: &[&BinderDocument]) -> (Vec<TranscriptRequest>, Vec<String>) {
        let mut requests = Vec::new();
        let mut errors = Vec::new();

        for document in transcripts {
            let order_id = match document.order_id.as_deref().map(str::trim) {
                Some(order_id) if !order_id.is_empty() => order_id,
                _ => {
                    errors.push(format!(
                        "Transcript document '{}' is missing an Order ID.",
                        document.document_id
                    ));
                    continue;
                }
            };

            match document.document_id.trim().parse::<u64>() {
                Ok(document_id) => requests.push(TranscriptRequest {
                    order_id: order_id.to_string(),
                    document_id,
                }),
                Err(_) => errors.push(format!(
                    "Transcript with Order ID '{}' has an invalid Document ID '{}'.",
                    order_id, document.document_id
                )),
            }
        }

        (requests, errors)
    }
}

#[async_trait]
impl BinderProcessor for JudicialBinderProcessor {
    fn binder(&self) -> &Binder {
        &self.binder
    }

    fn binder_mut(&mut self) -> &mut Binder {
        &mut self.binder
    }

    async fn pre_process(&mut self, ctx: &RequestContext) -> Result<()> {
        base::normalize(&mut self.binder, &ctx.user);

        let Some(physical_file_id) = self.binder.label(labels::PHYSICAL_FILE_ID).map(str::to_string) else {
            tracing::warn!("Binder has no {} label, skipping snapshot lookup", labels::PHYSICAL_FILE_ID);
            return Ok(());
        };

        let snapshot = self.deps.file_snapshot(ctx, &physical_file_id).await?;
        self.binder.set_label(labels::COURT_CLASS_CD, snapshot.court_class);
        self.binder.set_label(labels::JUDGE_ID, ctx.user.user_id.clone());

        Ok(())
    }

    async fn validate(&self, ctx: &RequestContext) -> Result<OperationResult> {
        let result = base::validate(&self.binder, self.deps.validator.as_ref(), ctx);
        if !result.succeeded() {
            return Ok(result);
        }

        let Some(physical_file_id) = self.binder.label(labels::PHYSICAL_FILE_ID) else {
            return Ok(OperationResult::failure([base::missing_label_error(
                labels::PHYSICAL_FILE_ID,
            )]));
        };

        let (transcripts, documents): (Vec<&BinderDocument>, Vec<&BinderDocument>) =
            self.binder.documents.iter().partition(|d| d.is_transcript());
        let (requests, mut transcript_errors) = Self::collect_transcript_requests(&transcripts);

        let transcript_lookup = async {
            if requests.is_empty() {
                return Ok(None);
            }
            self.deps
                .completed_transcripts(ctx, physical_file_id, None)
                .await
                .map(Some)
        };
        let (snapshot, completed) = tokio::join!(
            self.deps.file_snapshot(ctx, physical_file_id),
            transcript_lookup
        );
        let snapshot = snapshot?;

        match completed {
            Ok(Some(completed)) => {
                let available: HashSet<(String, u64)> = completed
                    .iter()
                    .map(|t| (t.order_id.to_string(), t.document_id))
                    .collect();
                for request in &requests {
                    if !available.contains(&(request.order_id.clone(), request.document_id)) {
                        transcript_errors.push(format!(
                            "Transcript with Order ID '{}' and Document ID '{}' is not available.",
                            request.order_id, request.document_id
                        ));
                    }
                }
            }
            Ok(None) => {}
            Err(BinderError::Cancelled) => return Err(BinderError::Cancelled),
            Err(e) => {
                tracing::warn!("⚠️ Transcript lookup failed for file {}: {}", physical_file_id, e);
                transcript_errors.push(TRANSCRIPT_LOOKUP_FAILED.to_string());
            }
        }

        let known: HashSet<&str> = snapshot
            .appearances
            .iter()
            .chain(snapshot.documents.iter())
            .chain(snapshot.reference_documents.iter())
            .map(String::as_str)
            .collect();

        let mut errors = Vec::new();
        if documents.iter().any(|d| !known.contains(d.document_id.as_str())) {
            errors.push(INVALID_DOCUMENT_IDS.to_string());
        }
        errors.extend(transcript_errors);

        if !errors.is_empty() {
            tracing::info!(
                "Binder for file {} failed validation with {} error(s)",
                physical_file_id,
                errors.len()
            );
        }
        Ok(OperationResult::from_errors(errors))
    }
}

//! Lifecycle steps shared by every processor variant.

use crate::core::context::RequestContext;
use crate::domain::model::{labels, ActingUser, Binder, BinderDocument, OperationResult};
use crate::domain::ports::BasicValidator;

pub const ACCESS_DENIED: &str = "Current user does not have access to this binder.";

/// Resets labels to the canonical file/judge pair and renumbers documents.
pub fn normalize(binder: &mut Binder, user: &ActingUser) {
    let physical_file_id = binder.labels.remove(labels::PHYSICAL_FILE_ID);
    binder.labels.clear();

    if let Some(physical_file_id) = physical_file_id {
        binder.set_label(labels::PHYSICAL_FILE_ID, physical_file_id);
    }
    binder.set_label(labels::JUDGE_ID, user.user_id.clone());

    renumber(&mut binder.documents);
}

/// Stable sort by declared order, then dense 0..n-1.
pub fn renumber(documents: &mut [BinderDocument]) {
    documents.sort_by_key(|d| d.order);
    for (index, document) in documents.iter_mut().enumerate() {
        document.order = index as i32;
    }
}

pub fn validate(binder: &Binder, validator: &dyn BasicValidator, ctx: &RequestContext) -> OperationResult {
    let basic = validator.validate(binder, &ctx.validation_context());
    if !basic.succeeded() {
        tracing::debug!("Basic validation failed with {} error(s)", basic.errors().len());
        return basic;
    }

    if binder.label(labels::JUDGE_ID) != Some(ctx.user.user_id.as_str()) {
        tracing::info!(
            "🔒 User {} attempted to access binder {:?} owned by another judge",
            ctx.user.user_id,
            binder.id
        );
        return OperationResult::failure([ACCESS_DENIED]);
    }

    OperationResult::success()
}

pub fn missing_label_error(key: &str) -> String {
    format!("Missing required label: {}.", key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> ActingUser {
        ActingUser {
            user_id: "J1".to_string(),
            agency_id: "AG1".to_string(),
            participant_id: "P1".to_string(),
            application_code: "BINDER".to_string(),
        }
    }

    #[test]
    fn test_normalize_keeps_only_canonical_labels() {
        let mut binder = Binder::default();
        binder.set_label(labels::PHYSICAL_FILE_ID, "F100");
        binder.set_label(labels::JUDGE_ID, "someone-else");
        binder.set_label("extra", "dropped");

        normalize(&mut binder, &user());

        assert_eq!(binder.labels.len(), 2);
        assert_eq!(binder.label(labels::PHYSICAL_FILE_ID), Some("F100"));
        assert_eq!(binder.label(labels::JUDGE_ID), Some("J1"));
    }

    #[test]
    fn test_renumber_is_stable_and_dense() {
        let mut documents = vec![
            BinderDocument::new("B", 5),
            BinderDocument::new("A", -1),
            BinderDocument::new("C", 5),
        ];
        renumber(&mut documents);

        let ids: Vec<_> = documents.iter().map(|d| (d.document_id.as_str(), d.order)).collect();
        assert_eq!(ids, vec![("A", 0), ("B", 1), ("C", 2)]);
    }
}

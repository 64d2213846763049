use crate::domain::model::{Binder, OperationResult};
use crate::domain::ports::{BasicValidator, ValidationContext};
use regex::Regex;
use std::sync::OnceLock;

fn binder_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("binder id pattern is valid"))
}

pub fn is_valid_binder_id(id: &str) -> bool {
    binder_id_pattern().is_match(id)
}

/// 欄位層級檢查：Id 與新增/修改情境是否一致
#[derive(Debug, Clone, Default)]
pub struct BasicBinderValidator;

impl BasicBinderValidator {
    pub fn new() -> Self {
        Self
    }
}

impl BasicValidator for BasicBinderValidator {
    fn validate(&self, binder: &Binder, context: &ValidationContext) -> OperationResult {
        let mut errors = Vec::new();

        match (&binder.id, context.is_edit) {
            (None, true) => errors.push("Id is required when updating a binder.".to_string()),
            (Some(_), false) => errors.push("Id must be empty when creating a binder.".to_string()),
            (Some(id), true) => {
                if !is_valid_binder_id(id) {
                    errors.push(format!("Id '{}' is not a valid binder id.", id));
                }
                if context.route_id.as_deref().is_some_and(|route_id| route_id != id) {
                    errors.push("Id does not match the requested binder.".to_string());
                }
            }
            (None, false) => {}
        }

        for document in &binder.documents {
            if document.document_id.trim().is_empty() {
                errors.push(format!("Document ID is required (order {}).", document.order));
            }
        }

        OperationResult::from_errors(errors)
    }
}

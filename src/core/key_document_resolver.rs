//! Pure selection of the "key" subset of a criminal file's documents.

use crate::domain::model::{BinderDocument, DocumentKind};
use crate::domain::snapshot::AccusedFile;

/// Initiating documents, record of proceedings, pre-sentence reports.
pub const KEY_CATEGORIES: [&str; 3] = ["INITIATING", "ROP", "PSR"];

pub fn is_key_category(category: Option<&str>) -> bool {
    category
        .map(str::trim)
        .is_some_and(|c| KEY_CATEGORIES.iter().any(|k| k.eq_ignore_ascii_case(c)))
}

pub fn to_binder_documents(accused: &AccusedFile) -> Vec<BinderDocument> {
    accused
        .documents
        .iter()
        .enumerate()
        .map(|(index, document)| BinderDocument {
            document_id: document.document_id.clone(),
            order: index as i32,
            document_type: DocumentKind::File,
            order_id: None,
            file_name: document.document_type_description.clone(),
            category: document.category.clone(),
        })
        .collect()
}

/// Keeps key-category documents in snapshot order, renumbered from 0.
pub fn select(documents: Vec<BinderDocument>) -> Vec<BinderDocument> {
    documents
        .into_iter()
        .filter(|d| is_key_category(d.category.as_deref()))
        .enumerate()
        .map(|(index, mut document)| {
            document.order = index as i32;
            document
        })
        .collect()
}

pub mod base;
pub mod basic_validator;
pub mod context;
pub mod dependencies;
pub mod factory;
pub mod key_document_resolver;
pub mod processor;
pub mod service;

pub use crate::domain::model::{ActingUser, Binder, BinderDocument, OperationResult};
pub use crate::domain::ports::{
    BasicValidator, BinderCache, BinderStore, ConfigProvider, FileRecordsProvider,
    TranscriptProvider,
};
pub use crate::utils::error::Result;

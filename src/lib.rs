pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::EngineConfig;
pub use crate::core::{
    context::{CancelSignal, Intent, RequestContext},
    dependencies::ProcessorDependencies,
    factory::BinderFactory,
    processor::{BinderProcessor, Processor, ProcessorKind},
    service::{BinderService, SaveOutcome},
};
pub use domain::model::{labels, ActingUser, Binder, BinderDocument, CourtClass, DocumentKind, OperationResult};
pub use utils::error::{BinderError, Result};

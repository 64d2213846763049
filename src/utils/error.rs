use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot determine binder processor: {reason}")]
    ProcessorUnavailable { reason: String },

    #[error("Upstream service '{service}' responded with status {status}")]
    Upstream { service: String, status: u16 },

    #[error("Binder store error: {message}")]
    StoreError { message: String },

    #[error("Operation was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BinderError {
    pub fn config(message: impl Into<String>) -> Self {
        BinderError::ConfigError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BinderError::Cancelled => ErrorSeverity::Low,
            BinderError::ApiError(_) | BinderError::Upstream { .. } => ErrorSeverity::Medium,
            BinderError::ProcessorUnavailable { .. }
            | BinderError::SerializationError(_)
            | BinderError::StoreError { .. } => ErrorSeverity::High,
            BinderError::IoError(_)
            | BinderError::ConfigError { .. }
            | BinderError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 上游服務暫時性失敗，由呼叫端決定是否重試
    pub fn is_retryable(&self) -> bool {
        match self {
            BinderError::ApiError(e) => e.is_timeout() || e.is_connect(),
            BinderError::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, BinderError>;

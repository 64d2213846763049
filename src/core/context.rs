use crate::domain::model::ActingUser;
use crate::domain::ports::{FileQuery, ValidationContext};
use crate::utils::error::{BinderError, Result};
use std::future::Future;
use tokio::sync::watch;

/// 呼叫端意圖：新增或修改既有 Binder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create,
    Edit { route_id: String },
}

/// Caller-supplied cancellation. Provider calls raced against it resolve to
/// `BinderError::Cancelled` once the sender flips to `true`.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    pub fn never() -> Self {
        Self { rx: None }
    }

    pub fn new(rx: watch::Receiver<bool>) -> Self {
        Self { rx: Some(rx) }
    }

    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self::new(rx))
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(BinderError::Cancelled);
        }
        let Some(rx) = &self.rx else {
            return fut.await;
        };

        let mut rx = rx.clone();
        tokio::select! {
            result = fut => result,
            _ = async {
                // 發送端已關閉則永不取消
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    std::future::pending::<()>().await;
                }
            } => {
                tracing::debug!("Provider call cancelled by caller");
                Err(BinderError::Cancelled)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user: ActingUser,
    pub intent: Intent,
    pub cancel: CancelSignal,
}

impl RequestContext {
    pub fn create(user: ActingUser) -> Self {
        Self {
            user,
            intent: Intent::Create,
            cancel: CancelSignal::never(),
        }
    }

    pub fn edit(user: ActingUser, route_id: impl Into<String>) -> Self {
        Self {
            user,
            intent: Intent::Edit {
                route_id: route_id.into(),
            },
            cancel: CancelSignal::never(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_intent(&self, intent: Intent) -> Self {
        Self {
            intent,
            ..self.clone()
        }
    }

    pub fn validation_context(&self) -> ValidationContext {
        match &self.intent {
            Intent::Create => ValidationContext {
                is_edit: false,
                route_id: None,
            },
            Intent::Edit { route_id } => ValidationContext {
                is_edit: true,
                route_id: Some(route_id.clone()),
            },
        }
    }

    pub fn file_query(&self, physical_file_id: &str) -> FileQuery {
        FileQuery {
            agency_id: self.user.agency_id.clone(),
            participant_id: self.user.participant_id.clone(),
            application_code: self.user.application_code.clone(),
            physical_file_id: physical_file_id.to_string(),
        }
    }
}

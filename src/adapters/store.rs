use crate::domain::model::Binder;
use crate::domain::ports::BinderStore;
use crate::utils::error::{BinderError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryBinderStore {
    binders: RwLock<HashMap<String, Binder>>,
    sequence: AtomicU64,
}

impl InMemoryBinderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 產生 24 位十六進位 Id
    fn next_id(&self) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        format!("{:016x}{:08x}", Utc::now().timestamp_micros() as u64, sequence as u32)
    }

    /// Stores `binder` as-is, keeping its id and dates.
    pub async fn insert_raw(&self, binder: Binder) -> Result<()> {
        let id = binder.id.clone().ok_or_else(|| BinderError::StoreError {
            message: "binder has no id".to_string(),
        })?;
        self.binders.write().await.insert(id, binder);
        Ok(())
    }
}

#[async_trait]
impl BinderStore for InMemoryBinderStore {
    async fn find_by_labels(&self, labels: &HashMap<String, String>) -> Result<Vec<Binder>> {
        let binders = self.binders.read().await;
        let mut found: Vec<Binder> = binders
            .values()
            .filter(|b| labels.iter().all(|(k, v)| b.labels.get(k) == Some(v)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    async fn get(&self, id: &str) -> Result<Option<Binder>> {
        Ok(self.binders.read().await.get(id).cloned())
    }

    async fn add(&self, mut binder: Binder) -> Result<Binder> {
        let id = binder.id.clone().unwrap_or_else(|| self.next_id());
        let now = Utc::now();
        binder.id = Some(id.clone());
        binder.created_date = Some(now);
        binder.updated_date = Some(now);

        let mut binders = self.binders.write().await;
        if binders.contains_key(&id) {
            return Err(BinderError::StoreError {
                message: format!("binder {} already exists", id),
            });
        }
        binders.insert(id, binder.clone());
        Ok(binder)
    }

    async fn update(&self, mut binder: Binder) -> Result<Binder> {
        let id = binder.id.clone().ok_or_else(|| BinderError::StoreError {
            message: "cannot update a binder without an id".to_string(),
        })?;

        let mut binders = self.binders.write().await;
        let Some(existing) = binders.get(&id) else {
            return Err(BinderError::StoreError {
                message: format!("binder {} does not exist", id),
            });
        };
        binder.created_date = existing.created_date;
        binder.updated_date = Some(Utc::now());
        binders.insert(id, binder.clone());
        Ok(binder)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.binders.write().await.remove(id).is_some())
    }
}

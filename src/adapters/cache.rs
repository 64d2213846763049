use crate::domain::ports::{BinderCache, CacheFactory};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OnceCell};

struct CacheSlot {
    created: Instant,
    ttl: Duration,
    cell: Arc<OnceCell<serde_json::Value>>,
}

impl CacheSlot {
    fn new(ttl: Duration) -> Self {
        Self {
            created: Instant::now(),
            ttl,
            cell: Arc::new(OnceCell::new()),
        }
    }

    fn is_expired(&self) -> bool {
        self.created.elapsed() >= self.ttl
    }
}

/// 程序內快取：同一鍵的並行請求只觸發一次上游呼叫
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, CacheSlot>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BinderCache for InMemoryCache {
    async fn get_or_add_value(
        &self,
        key: &str,
        ttl: Duration,
        factory: CacheFactory<'_>,
    ) -> Result<serde_json::Value> {
        let cell = {
            let mut entries = self.entries.lock().await;
            // 清除所有過期項目，避免不再查詢的鍵長期佔用記憶體
            let before = entries.len();
            entries.retain(|_, slot| !slot.is_expired());
            if entries.len() < before {
                tracing::debug!("Evicted {} expired cache entries", before - entries.len());
            }

            entries
                .entry(key.to_string())
                .or_insert_with(|| CacheSlot::new(ttl))
                .cell
                .clone()
        };

        // 失敗時保持未初始化，下一次呼叫會重試
        let value = cell.get_or_try_init(|| factory).await?;
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn fetch(cache: &InMemoryCache, key: &str, ttl: Duration, calls: &AtomicUsize) -> serde_json::Value {
        cache
            .get_or_add_value(
                key,
                ttl,
                Box::pin(async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok(serde_json::json!({"value": 1}))
                }),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let cache = InMemoryCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        let (a, b) = tokio::join!(
            fetch(&cache, "file-snapshot:F1:AG1", ttl, &calls),
            fetch(&cache, "file-snapshot:F1:AG1", ttl, &calls)
        );

        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let cache = InMemoryCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_millis(5);

        fetch(&cache, "k", ttl, &calls).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        fetch(&cache, "k", ttl, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_factory_is_not_cached() {
        let cache = InMemoryCache::new();
        let failed = cache
            .get_or_add_value(
                "k",
                Duration::from_secs(60),
                Box::pin(async { Err::<serde_json::Value, _>(crate::utils::error::BinderError::Cancelled) }),
            )
            .await;
        assert!(failed.is_err());

        let calls = AtomicUsize::new(0);
        fetch(&cache, "k", Duration::from_secs(60), &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entries_are_evicted_on_insert() {
        let cache = InMemoryCache::new();
        let calls = AtomicUsize::new(0);

        for file in 0..20 {
            let key = format!("file-snapshot:F{}:AG1", file);
            fetch(&cache, &key, Duration::from_millis(1), &calls).await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        fetch(&cache, "file-snapshot:F99:AG1", Duration::from_secs(60), &calls).await;

        let entries = cache.entries.lock().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("file-snapshot:F99:AG1"));
    }
}

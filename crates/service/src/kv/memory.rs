use bytes::Bytes;
use tracing::debug;

use crate::errors::ServiceError;
use crate::kv::{DeleteOutcome, KvStore};
use crate::storage::memory_map_store::MemoryMapStore;

/// Process-lifetime store keeping `key -> bytes` in memory.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    store: MemoryMapStore<String, Bytes>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Bytes, ServiceError> {
        self.store
            .get(key)
            .await
            .ok_or_else(|| ServiceError::not_found(key))
    }

    async fn put(&self, key: String, value: Bytes) -> Bytes {
        let replaced = self.store.insert(key.clone(), value.clone()).await.is_some();
        debug!(%key, bytes = value.len(), replaced, "kv put");
        value
    }

    async fn delete(&self, key: &str) -> DeleteOutcome {
        let existed = self.store.remove(key).await;
        DeleteOutcome { key: key.to_string(), existed }
    }

    async fn delete_all(&self) -> usize {
        self.store.clear().await
    }

    async fn keys(&self) -> Vec<String> {
        let mut keys = self.store.keys().await;
        keys.sort_unstable();
        keys
    }

    async fn len(&self) -> usize {
        self.store.len().await
    }
}

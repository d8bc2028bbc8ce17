use std::sync::Arc;

use service::kv::{KvStore, MemoryKvStore};

/// Handle shared by every request handler.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn KvStore>,
}

impl ServerState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKvStore::new()))
    }
}

//! Key-value store operations.

pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::ServiceError;

pub use memory::MemoryKvStore;

/// Result of deleting a single key. `existed` is informational only: a
/// delete of an absent key is still a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub key: String,
    pub existed: bool,
}

/// Trait abstraction for the key-value store.
///
/// Every method is atomic with respect to every other call on the same store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Current value for `key`, or `ServiceError::NotFound`.
    async fn get(&self, key: &str) -> Result<Bytes, ServiceError>;
    /// Insert or overwrite; returns the value now stored.
    async fn put(&self, key: String, value: Bytes) -> Bytes;
    async fn delete(&self, key: &str) -> DeleteOutcome;
    /// Clear the store; returns how many entries were removed.
    async fn delete_all(&self) -> usize;
    /// Snapshot of the current keys in ascending order.
    async fn keys(&self) -> Vec<String>;
    async fn len(&self) -> usize;
}

use std::{borrow::Borrow, collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::RwLock;

/// Generic in-memory key-value map guarded by a single `RwLock`.
///
/// Reads share the lock; every mutation takes it exclusively, so each call
/// is atomic with respect to every other call. Guards never outlive the call.
#[derive(Clone)]
pub struct MemoryMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryMapStore<K, V> {
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Get value by key.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or replace a value; returns the previous value if any.
    pub async fn insert(&self, key: K, value: V) -> Option<V> {
        let mut map = self.inner.write().await;
        map.insert(key, value)
    }

    /// Remove a key; returns whether it existed.
    pub async fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut map = self.inner.write().await;
        map.remove(key).is_some()
    }

    /// Drop every entry; returns how many there were.
    pub async fn clear(&self) -> usize {
        let mut map = self.inner.write().await;
        let n = map.len();
        map.clear();
        n
    }

    pub async fn keys(&self) -> Vec<K> {
        let map = self.inner.read().await;
        map.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

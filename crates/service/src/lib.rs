//! Service layer holding the in-memory key-value store.
//! - `storage` has the generic lock-guarded map.
//! - `kv` exposes the store operations behind the `KvStore` trait.

pub mod errors;
pub mod storage;
pub mod kv;

//! Storage abstractions for service layer
//!
//! Contains the lock-guarded in-memory map the key-value store is built on.

pub mod memory_map_store;

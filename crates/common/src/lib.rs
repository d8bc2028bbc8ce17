//! Pieces shared by the store's crates: wire types for JSON responses,
//! logging setup and the admin listener.

pub mod types;
pub mod utils;
pub mod admin_http;

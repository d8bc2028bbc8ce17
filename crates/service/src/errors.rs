use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("key not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(key: &str) -> Self { Self::NotFound(key.to_string()) }
}

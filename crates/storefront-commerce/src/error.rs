//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront commerce operations.
///
/// Cart mutations and pricing never fail; these surface only from the
/// storage hooks that load and save the persisted cart.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Storage backend error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "storage")]
impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

//! Key-value store error types.
//!
//! Defined in `bandscore-core` so the progress aggregator can log and
//! classify store failures without depending on a concrete backend.

use thiserror::Error;

/// Errors that can occur when reading from or writing to a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file or device could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store's own container format could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Returns `true` if the failure came from the underlying medium rather
    /// than from the store's contents.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

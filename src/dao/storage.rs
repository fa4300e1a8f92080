//! Error surface shared by every snapshot store backend.

use std::error::Error;
use thiserror::Error;

/// Result alias for match-store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by snapshot stores regardless of the backing database.
///
/// Store failures never roll back an applied scoring transition; callers
/// defer the snapshot and retry instead.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached or refused the operation.
    #[error("match store unavailable: {message}")]
    Unavailable {
        /// What the store was trying to do.
        message: String,
        /// The backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Wrap any backend failure as an unavailability error.
    pub fn unavailable(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Unavailable {
            message: message.into(),
            source: Box::new(source),
        }
    }
}

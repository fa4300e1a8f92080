//! Service-layer error taxonomy.

use thiserror::Error;
use validator::ValidationErrors;

use crate::dao::storage::StorageError;
use crate::engine::InvalidEvent;

/// Errors that can occur in service layer operations.
///
/// Everything here is recoverable from the caller's point of view: a
/// rejected event, a missing match, or a storage outage that the deferred
/// save queue will absorb.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Invalid input provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The scoring engine rejected the event; state is unchanged.
    #[error("event rejected: {0}")]
    Rejected(#[from] InvalidEvent),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {err}"))
    }
}

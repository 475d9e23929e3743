//! Composite error for the synchronization layer.

use admin_core::{ApiError, GENERIC_ERROR_MESSAGE};
use thiserror::Error;

/// Errors surfaced by resource operations: API-level failures from the core
/// parsers, transport failures underneath them, and cache bookkeeping
/// failures.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("cache entry for {0} has an unexpected type")]
    Cache(String),
}

impl SyncError {
    /// The single user-visible message for this failure: the
    /// server-reported text when the API provided one, otherwise the
    /// generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Api(e) => e.user_message(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

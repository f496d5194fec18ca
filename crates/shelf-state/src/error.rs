//! Shared state error types.

use thiserror::Error;

/// Errors that can occur when reading or writing host state.
#[derive(Error, Debug)]
pub enum StateError {
    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The host refused the write.
    #[error("Host write failed: {0}")]
    WriteError(String),
}

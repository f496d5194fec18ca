//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog, cart and compare operations.
///
/// Transition operations never return these to callers as failures; they
/// are folded into outcome enums and logged. They do surface from
/// decoding and configuration loading.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Catalog or cart entry without a usable id.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Selection would exceed its bound, or commit below the minimum.
    #[error("Selection bounds violated: {0}")]
    SelectionBounds(String),

    /// A selected id no longer resolves against the catalog.
    #[error("Stale reference: {0}")]
    StaleReference(String),

    /// Transition not valid in the current controller state.
    #[error("Invalid transition: {action} while {state}")]
    InvalidTransition { action: String, state: String },

    /// Host state error.
    #[error("State error: {0}")]
    StateError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// The error categories a surface distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, dropped silently.
    InvalidInput,
    /// Bound or minimum violated, rejected as a no-op.
    SelectionBoundsViolation,
    /// Selected id missing from the catalog at commit time.
    StaleReference,
    /// Anything coming from the host, decoding or configuration.
    Infrastructure,
}

impl CommerceError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommerceError::InvalidEntry(_) => ErrorKind::InvalidInput,
            CommerceError::SelectionBounds(_) | CommerceError::InvalidTransition { .. } => {
                ErrorKind::SelectionBoundsViolation
            }
            CommerceError::StaleReference(_) => ErrorKind::StaleReference,
            CommerceError::StateError(_)
            | CommerceError::SerializationError(_)
            | CommerceError::ConfigError(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<shelf_state::StateError> for CommerceError {
    fn from(e: shelf_state::StateError) -> Self {
        CommerceError::StateError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::ConfigError(e.to_string())
    }
}

impl From<toml::ser::Error> for CommerceError {
    fn from(e: toml::ser::Error) -> Self {
        CommerceError::ConfigError(e.to_string())
    }
}

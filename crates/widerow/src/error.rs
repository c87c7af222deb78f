//! Error types for the mapping layer
//!
//! Argument errors, not-found, and coercion failures are caller-visible and
//! recoverable; store execution failures are carried through unmodified.
//! Schema misuse is a programmer error and panics at declaration or first
//! use instead of appearing here.

use std::fmt;

use crate::store::StoreError;

/// Result type alias for mapping operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for mapping operations
#[derive(Debug, Clone)]
pub enum ModelError {
    /// Store collaborator reported an execution failure
    Store(StoreError),
    /// No row matched an exact-key lookup
    NotFound(String),
    /// Key input was incomplete or carried non-key attributes
    InvalidKey(String),
    /// Operation requires a complete key on the instance
    MissingKey,
    /// A raw store value could not be read as the declared attribute kind
    Coercion(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Store(err) => write!(f, "Store execution failed: {}", err),
            ModelError::NotFound(table) => write!(f, "Record not found in table '{}'", table),
            ModelError::InvalidKey(msg) => write!(f, "Invalid key error: {}", msg),
            ModelError::MissingKey => write!(f, "Key is missing or incomplete"),
            ModelError::Coercion(msg) => write!(f, "Coercion error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

// Carry collaborator failures through unmodified
impl From<StoreError> for ModelError {
    fn from(err: StoreError) -> Self {
        ModelError::Store(err)
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

// Convert from anyhow errors raised inside collaborator implementations
impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        ModelError::Store(StoreError::from(err))
    }
}

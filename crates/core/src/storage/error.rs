use thiserror::Error;

use crate::cart::CartError;

/// Errors that can occur during cart storage operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// A cart mutation was refused by the cart rules.
    #[error(transparent)]
    Rejected(#[from] CartError),
    /// Concurrent writers kept invalidating an update.
    #[error("Update conflict: {0}")]
    Conflict(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

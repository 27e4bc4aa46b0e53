//! MongoDB error mapping.
//!
//! Maps `mongodb::error::Error` to `RepositoryError` from `storefront_core::storage`.

use mongodb::error::{Error, ErrorKind, WriteFailure};
use storefront_core::storage::RepositoryError;

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Maps a driver error to a RepositoryError.
///
/// # Error Mapping
///
/// - Server selection, DNS and I/O errors → `RepositoryError::ConnectionFailed`
/// - BSON (de)serialization errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_mongo_error(err: Error) -> RepositoryError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::DnsResolve { .. } | ErrorKind::Io(_) => {
            RepositoryError::ConnectionFailed(err.to_string())
        }
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            RepositoryError::Serialization(err.to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// True when a write failed because a document with the same `_id` exists.
pub fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

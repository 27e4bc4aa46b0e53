//! Pure functions for mapping cart storage errors to HTTP status codes.

use crate::cart::cart_error_to_status_code;

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `Rejected` -> the status of the underlying cart rule (400 or 404)
/// - `Conflict` -> 409
/// - `ConnectionFailed` -> 503
/// - `QueryFailed`, `Serialization` -> 500
/// - `InvalidData` -> 400
///
/// # Examples
///
/// ```
/// use storefront_core::cart::CartError;
/// use storefront_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let unreachable = RepositoryError::ConnectionFailed("no MongoDB primary".to_string());
/// assert_eq!(repository_error_to_status_code(&unreachable), 503);
///
/// let rejected = RepositoryError::Rejected(CartError::ItemNotFound("sku-1".to_string()));
/// assert_eq!(repository_error_to_status_code(&rejected), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::Rejected(cart_error) => cart_error_to_status_code(cart_error),
        RepositoryError::Conflict(_) => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

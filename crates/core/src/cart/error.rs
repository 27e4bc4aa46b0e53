use thiserror::Error;

/// Errors that can occur when validating or manipulating a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Product ID cannot be empty")]
    EmptyProductId,
    #[error("Quantity must be greater than zero")]
    ZeroQuantity,
    #[error("Item not in cart: {0}")]
    ItemNotFound(String),
    #[error("Quantity too large")]
    QuantityOverflow,
}

/// Maps a [`CartError`] to an HTTP status code.
///
/// - `ItemNotFound` -> 404 (Not Found)
/// - every validation error -> 400 (Bad Request)
pub fn cart_error_to_status_code(error: &CartError) -> u16 {
    match error {
        CartError::ItemNotFound(_) => 404,
        CartError::EmptyProductId | CartError::ZeroQuantity | CartError::QuantityOverflow => 400,
    }
}

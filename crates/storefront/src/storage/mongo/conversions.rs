//! Document conversion functions.
//!
//! Pure functions for converting between stored documents and domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::cart::{Cart, CartItem};
use storefront_core::storage::RepositoryError;

/// Shape of a cart in the `carts` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Bumped on every write; guards compare-and-swap updates.
    #[serde(default)]
    pub version: i64,
}

pub fn cart_to_document(cart: &Cart, version: i64) -> CartDocument {
    CartDocument {
        id: cart.id.to_string(),
        items: cart.items.clone(),
        version,
    }
}

pub fn document_to_cart(document: CartDocument) -> Result<Cart, RepositoryError> {
    let id = Uuid::parse_str(&document.id)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid cart id {}: {e}", document.id)))?;

    Ok(Cart {
        id,
        items: document.items,
    })
}

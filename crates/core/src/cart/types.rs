use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operations::item_count;

/// A single product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart line.
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity,
        }
    }
}

/// A visitor's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart with a random ID.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty cart with a specific ID.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart contents plus the derived item count, as returned by the cart API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub id: Uuid,
    pub items: Vec<CartItem>,
    pub count: u64,
}

impl From<Cart> for CartSummary {
    fn from(cart: Cart) -> Self {
        let count = item_count(&cart);
        Self {
            id: cart.id,
            items: cart.items,
            count,
        }
    }
}

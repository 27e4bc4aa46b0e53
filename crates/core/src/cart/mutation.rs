use super::error::CartError;
use super::operations::{add_item, remove_item};
use super::types::{Cart, CartItem};

/// A change to a cart, applied atomically by the cart repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMutation {
    /// Add an item, merging with an existing line for the same product.
    AddItem(CartItem),
    /// Remove the line for a product.
    RemoveItem(String),
}

impl CartMutation {
    /// Whether applying the mutation to a cart that does not exist yet
    /// creates it. Only adding does.
    pub fn creates_cart(&self) -> bool {
        matches!(self, CartMutation::AddItem(_))
    }

    pub fn apply(self, cart: Cart) -> Result<Cart, CartError> {
        match self {
            CartMutation::AddItem(item) => add_item(cart, item),
            CartMutation::RemoveItem(product_id) => remove_item(cart, &product_id),
        }
    }
}

use crate::routes::CART_PATH;

use super::operations::item_count;
use super::types::Cart;

/// View model for the cart indicator: a badge with the item count that links
/// to the cart page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartBadge {
    pub count: u64,
}

impl CartBadge {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    /// Badge for an optional cart; a visitor without a cart sees zero.
    pub fn for_cart(cart: Option<&Cart>) -> Self {
        Self::new(cart.map(item_count).unwrap_or(0))
    }

    /// Text shown inside the badge. The count is shown as-is, never capped.
    pub fn label(&self) -> String {
        self.count.to_string()
    }

    /// Whether the badge bubble is shown. A zero count renders the empty state.
    pub fn is_visible(&self) -> bool {
        self.count > 0
    }

    /// Navigation target of the indicator.
    pub fn href(&self) -> &'static str {
        CART_PATH
    }
}

//! Client-side navigation targets shared by every view.

/// Path of the home page.
pub const HOME_PATH: &str = "/";

/// Path of the cart page.
pub const CART_PATH: &str = "/cart";

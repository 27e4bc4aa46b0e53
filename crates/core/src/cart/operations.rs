use super::error::CartError;
use super::types::{Cart, CartItem};

/// Total number of items in the cart, counting every unit of every line.
pub fn item_count(cart: &Cart) -> u64 {
    cart.items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Validates a cart line before it is added.
pub fn validate_item(item: &CartItem) -> Result<(), CartError> {
    if item.product_id.trim().is_empty() {
        return Err(CartError::EmptyProductId);
    }
    if item.quantity == 0 {
        return Err(CartError::ZeroQuantity);
    }
    Ok(())
}

/// Adds an item to the cart, merging quantities with an existing line for
/// the same product.
pub fn add_item(mut cart: Cart, item: CartItem) -> Result<Cart, CartError> {
    validate_item(&item)?;

    match cart
        .items
        .iter_mut()
        .find(|line| line.product_id == item.product_id)
    {
        Some(line) => {
            line.quantity = line
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartError::QuantityOverflow)?;
        }
        None => cart.items.push(item),
    }

    Ok(cart)
}

/// Removes the line for `product_id` from the cart.
pub fn remove_item(mut cart: Cart, product_id: &str) -> Result<Cart, CartError> {
    let before = cart.items.len();
    cart.items.retain(|line| line.product_id != product_id);

    if cart.items.len() == before {
        return Err(CartError::ItemNotFound(product_id.to_string()));
    }

    Ok(cart)
}

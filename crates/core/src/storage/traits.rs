use async_trait::async_trait;
use uuid::Uuid;

use crate::cart::{Cart, CartMutation};

use super::Result;

/// Repository for cart state.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Gets a cart by its ID.
    async fn get_cart(&self, id: Uuid) -> Result<Option<Cart>>;

    /// Creates or replaces a cart.
    async fn save_cart(&self, cart: &Cart) -> Result<()>;

    /// Applies a mutation to a cart as one atomic read-modify-write and
    /// returns the updated cart.
    ///
    /// A missing cart is created empty when the mutation creates carts;
    /// otherwise the result is `NotFound`. Cart rule violations are
    /// `Rejected` and leave the stored cart unchanged.
    async fn update_cart(&self, id: Uuid, mutation: CartMutation) -> Result<Cart>;

    /// Deletes a cart by its ID.
    async fn delete_cart(&self, id: Uuid) -> Result<()>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}

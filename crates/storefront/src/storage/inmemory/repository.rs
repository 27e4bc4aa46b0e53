//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use storefront_core::cart::{Cart, CartMutation};
use storefront_core::storage::{CartRepository, RepositoryError, Result};

/// In-memory cart storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartRepository {
    carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
}

impl InMemoryCartRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn get_cart(&self, id: Uuid) -> Result<Option<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts.get(&id).cloned())
    }

    async fn save_cart(&self, cart: &Cart) -> Result<()> {
        let mut carts = self.carts.write().await;
        carts.insert(cart.id, cart.clone());
        Ok(())
    }

    async fn update_cart(&self, id: Uuid, mutation: CartMutation) -> Result<Cart> {
        // The write lock spans the read, the mutation and the store.
        let mut carts = self.carts.write().await;

        let current = match carts.get(&id) {
            Some(cart) => cart.clone(),
            None if mutation.creates_cart() => Cart::with_id(id),
            None => {
                return Err(RepositoryError::NotFound {
                    entity_type: "Cart",
                    id: id.to_string(),
                })
            }
        };

        let updated = mutation.apply(current)?;
        carts.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_cart(&self, id: Uuid) -> Result<()> {
        let mut carts = self.carts.write().await;
        if carts.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Cart",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

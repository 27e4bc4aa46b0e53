//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Cart storage sits behind a repository trait object so the
//! MongoDB and in-memory backends are interchangeable.

use std::{sync::Arc, time::Duration};

use uuid::Uuid;

use storefront_core::cart::{Cart, CartBadge};
use storefront_core::storage::{CartRepository, Result};

use crate::config::Config;
use crate::storage::InMemoryCartRepository;

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Cart repository (MongoDB or in-memory).
    pub cart_repo: Arc<dyn CartRepository>,
    /// Name of the cookie holding the visitor's cart ID.
    pub cart_cookie_name: Arc<str>,
    /// Per-request timeout applied by the router.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(cart_repo: Arc<dyn CartRepository>, config: &Config) -> Self {
        Self {
            cart_repo,
            cart_cookie_name: Arc::from(config.cart_cookie_name.as_str()),
            request_timeout: config.request_timeout(),
        }
    }

    /// Creates state backed by in-memory cart storage.
    pub fn in_memory(config: &Config) -> Self {
        Self::new(Arc::new(InMemoryCartRepository::new()), config)
    }

    /// Loads the cart for an optional cart ID. Visitors without a cart get None.
    pub async fn load_cart(&self, cart_id: Option<Uuid>) -> Result<Option<Cart>> {
        match cart_id {
            Some(id) => self.cart_repo.get_cart(id).await,
            None => Ok(None),
        }
    }

    /// Builds the cart indicator for an optional cart ID.
    pub async fn cart_badge(&self, cart_id: Option<Uuid>) -> Result<CartBadge> {
        let cart = self.load_cart(cart_id).await?;
        Ok(CartBadge::for_cart(cart.as_ref()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(&Config::default())
    }
}

//! In-memory cart storage.
//!
//! Carts live in a `HashMap` wrapped in `Arc<RwLock<_>>` and are lost when
//! the process exits. Used for development and tests.

mod repository;

pub use repository::InMemoryCartRepository;

//! Cart repository backends.
//!
//! This module provides concrete implementations of
//! [`storefront_core::storage::CartRepository`]. The backend is chosen at
//! startup: MongoDB when `MONGODB_URI` is configured, in-memory otherwise.

pub mod inmemory;
pub mod mongo;

pub use inmemory::InMemoryCartRepository;
pub use mongo::MongoCartRepository;

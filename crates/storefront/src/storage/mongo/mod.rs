//! MongoDB cart storage.
//!
//! Carts are stored one document per cart in the `carts` collection of the
//! shared database handle, keyed by the cart UUID.

mod conversions;
mod error;
mod repository;

pub use repository::MongoCartRepository;

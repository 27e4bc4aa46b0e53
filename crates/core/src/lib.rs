//! Functional core for the storefront.
//!
//! Pure types and operations with no I/O: cart state and the cart indicator,
//! the access-denied status view, navigation paths, and the repository seam
//! implemented by the server crate.

pub mod cart;
pub mod routes;
pub mod status;
pub mod storage;

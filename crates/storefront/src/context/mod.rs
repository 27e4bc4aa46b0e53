//! Request-scoped context module.
//!
//! Provides the `RequestContext` extractor that bundles request-scoped state
//! (request ID, the visitor's cart cookie) to complement application-scoped
//! `AppState`.

mod extractor;
mod types;

pub use types::RequestContext;

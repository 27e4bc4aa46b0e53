//! Pure types for request-scoped context.

use uuid::Uuid;

/// Unique identifier for a request, used for tracing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request-scoped context available to all handlers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request identifier for tracing.
    pub request_id: RequestId,
    /// Cart ID from the cart cookie (None for visitors without a cart).
    pub cart_id: Option<Uuid>,
}

impl RequestContext {
    /// Returns the visitor's cart ID, or a fresh one when they have none.
    ///
    /// The flag is true when the ID was just minted and the cookie must be set.
    pub fn cart_id_or_new(&self) -> (Uuid, bool) {
        match self.cart_id {
            Some(id) => (id, false),
            None => (Uuid::new_v4(), true),
        }
    }
}

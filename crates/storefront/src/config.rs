use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string. Carts are kept in memory when unset.
    pub mongodb_uri: Option<String>,
    /// Database name override (default: the database named in the URI)
    pub mongodb_database: Option<String>,
    /// Name of the cookie holding the visitor's cart ID (default: "cart_id")
    pub cart_cookie_name: String,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MONGODB_URI` - MongoDB connection string (optional)
    /// - `MONGODB_DATABASE` - Database name (optional)
    /// - `CART_COOKIE_NAME` - Cart cookie name (default: "cart_id")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            mongodb_uri: lookup("MONGODB_URI").filter(|v| !v.trim().is_empty()),
            mongodb_database: lookup("MONGODB_DATABASE").filter(|v| !v.trim().is_empty()),
            cart_cookie_name: lookup("CART_COOKIE_NAME").unwrap_or_else(|| "cart_id".to_string()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

//! Rate limiting
//!
//! Handlers and middleware only see the [`RateLimiter`] trait, so the in-memory store can
//! be replaced by a shared one (Redis, a database) without touching request handling.

mod memory;

pub use memory::InMemoryRateLimiter;

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request for `key`.
    ///
    /// Returns the requests left in the current window, or the time until the window
    /// resets when the key is over its limit.
    async fn check_rate_limit(&self, key: &str) -> Result<u32, Duration>;

    /// Requests allowed per window.
    fn limit(&self) -> u32;

    /// Drop state for windows that have ended. Stores that expire keys themselves can
    /// leave this as a no-op.
    async fn cleanup_expired(&self) {}
}

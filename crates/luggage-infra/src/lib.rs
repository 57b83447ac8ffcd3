//! Luggage Estimator Infrastructure Library
//!
//! Shared infrastructure for the HTTP service:
//! - Middleware (request ID, security headers, origin guard)
//! - Telemetry initialization
//! - Error response body
//! - Rate limiting

pub mod error;
pub mod middleware;
pub mod rate_limit;
pub mod telemetry;

// Re-export commonly used types
pub use error::ErrorResponse;
pub use middleware::{
    origin_guard_middleware, request_id_middleware, security_headers_middleware,
    AllowedOrigin, RequestId, SecurityHeadersConfig,
};
pub use rate_limit::{InMemoryRateLimiter, RateLimiter};
pub use telemetry::{init_telemetry, LogFormat};

//! Shared HTTP middleware

pub mod origin_guard;
pub mod request_id;
pub mod security_headers;

pub use origin_guard::{origin_guard_middleware, AllowedOrigin};
pub use request_id::{request_id_middleware, RequestId};
pub use security_headers::{security_headers_middleware, SecurityHeadersConfig};

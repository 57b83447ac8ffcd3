//! HTTP error response body
//!
//! The `IntoResponse` implementation for `AppError` lives in the API crate because of the
//! orphan rule.

use serde::Serialize;

/// Error body returned by the API: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

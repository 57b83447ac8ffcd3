//! Rejects cross-origin requests from anything but the configured origin.
//!
//! The CORS layer only decides which headers go back to the browser; this middleware
//! stops a foreign `Origin` before the request reaches a handler. Requests without an
//! `Origin` header (server-to-server, curl) pass through.

use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::ErrorResponse;

/// The single origin allowed to call the API
#[derive(Clone, Debug)]
pub struct AllowedOrigin(String);

impl AllowedOrigin {
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into().trim().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, origin: &str) -> bool {
        origin.trim().trim_end_matches('/').eq_ignore_ascii_case(&self.0)
    }
}

pub async fn origin_guard_middleware(
    State(allowed): State<Arc<AllowedOrigin>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = match request.headers().get(ORIGIN) {
        None => return next.run(request).await,
        Some(value) => value.to_str().unwrap_or_default().to_string(),
    };

    if allowed.matches(&origin) {
        return next.run(request).await;
    }

    tracing::warn!(
        origin = %origin,
        path = %request.uri().path(),
        "Rejected request from origin that is not allowed"
    );

    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new("Origin not allowed")),
    )
        .into_response()
}

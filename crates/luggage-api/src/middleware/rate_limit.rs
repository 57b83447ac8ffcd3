use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use luggage_infra::{ErrorResponse, RateLimiter};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::utils::ip_extraction::extract_client_ip;

const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please slow down.";

/// State for [`rate_limit_middleware`]
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<dyn RateLimiter>,
    pub trusted_proxy_count: usize,
}

/// Per-client rate limiting, keyed by IP address.
///
/// Rejected requests never reach the handler and get `429` with `Retry-After`.
/// Allowed responses carry `X-RateLimit-Limit` and `X-RateLimit-Remaining`.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let socket_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = extract_client_ip(
        request.headers(),
        socket_addr.as_ref(),
        state.trusted_proxy_count,
    );
    let rate_limit_key = format!("ip:{}", ip);
    let limit = state.limiter.limit();

    match state.limiter.check_rate_limit(&rate_limit_key).await {
        Ok(remaining) => {
            let mut response = next.run(request).await;
            insert_limit_headers(&mut response, limit, remaining);
            response
        }
        Err(reset_in) => {
            let reset_seconds = reset_in.as_secs().max(1);
            tracing::warn!(
                key = %rate_limit_key,
                path = %request.uri().path(),
                limit,
                retry_after_secs = reset_seconds,
                "Rate limit exceeded"
            );

            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorResponse::new(RATE_LIMITED_MESSAGE)),
            )
                .into_response();

            insert_limit_headers(&mut response, limit, 0);
            if let Ok(header_value) = HeaderValue::from_str(&reset_seconds.to_string()) {
                response.headers_mut().insert("Retry-After", header_value);
            }

            response
        }
    }
}

fn insert_limit_headers(response: &mut Response, limit: u32, remaining: u32) {
    let headers = response.headers_mut();
    if let Ok(header_value) = HeaderValue::from_str(&limit.to_string()) {
        headers.insert("X-RateLimit-Limit", header_value);
    }
    if let Ok(header_value) = HeaderValue::from_str(&remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", header_value);
    }
}

//! Route configuration and setup

use crate::handlers;
use crate::middleware::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{CONTENT_TYPE, RETRY_AFTER},
        HeaderName, HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use luggage_core::Config;
use luggage_infra::{
    origin_guard_middleware, request_id_middleware, security_headers_middleware, AllowedOrigin,
    InMemoryRateLimiter, RateLimiter, SecurityHeadersConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Assemble the application router.
///
/// `/api/*` is restricted to the configured origin; the estimate route is rate limited.
/// `/health` sits outside both.
pub fn setup_routes(
    config: &Config,
    state: AppState,
    rate_limiter: Arc<dyn RateLimiter>,
) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let allowed_origin = Arc::new(AllowedOrigin::new(config.allowed_origin()));
    let rate_limit_state = RateLimitState {
        limiter: rate_limiter,
        trusted_proxy_count: config.trusted_proxy_count(),
    };

    let api_routes = Router::new()
        .route("/estimate-size", post(handlers::estimate::estimate_size))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            allowed_origin,
            origin_guard_middleware,
        ))
        .layer(cors);

    let security_headers_config = Arc::new(SecurityHeadersConfig::new(config.is_production()));
    let body_limit = config.max_request_body_bytes();

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

/// CORS for the single allowed origin
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origin: HeaderValue = config.allowed_origin().parse().map_err(|_| {
        anyhow::anyhow!(
            "ALLOWED_ORIGIN is not a valid header value: {}",
            config.allowed_origin()
        )
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("x-ratelimit-limit"),
            HeaderName::from_static("x-ratelimit-remaining"),
            RETRY_AFTER,
        ]))
}

/// In-memory rate limiter with a periodic cleanup task
pub fn setup_rate_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    let rate_limiter = Arc::new(InMemoryRateLimiter::with_shards(
        config.rate_limit_per_minute(),
        Duration::from_secs(config.rate_limit_window_secs()),
        config.rate_limiter_shard_count(),
    ));

    let rate_limiter_for_cleanup = rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            rate_limiter_for_cleanup.cleanup_expired().await;
        }
    });

    tracing::info!(
        limit = config.rate_limit_per_minute(),
        window_secs = config.rate_limit_window_secs(),
        shard_count = config.rate_limiter_shard_count(),
        "Rate limiting enabled with sharded buckets and periodic cleanup"
    );

    rate_limiter
}

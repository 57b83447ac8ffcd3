//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use luggage_core::{Config, PromptTemplate};
use luggage_infra::LogFormat;
use luggage_services::{GeminiClient, GeminiConfig};
use std::sync::Arc;

/// Build the router from configuration.
///
/// Must run inside a tokio runtime: the rate limiter's cleanup task is spawned here.
pub fn initialize_app(config: &Config) -> Result<axum::Router> {
    // Fail fast on misconfiguration
    validation::validate_config(config).context("Configuration validation failed")?;

    let log_format: LogFormat = config
        .log_format()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid LOG_FORMAT: {}", e))?;
    luggage_infra::init_telemetry("luggage-api", log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        allowed_origin = %config.allowed_origin(),
        "Configuration loaded and validated successfully"
    );

    let prompt =
        PromptTemplate::load(config.prompt_path()).context("Failed to load prompt template")?;
    tracing::info!(prompt_version = %prompt.version(), "Prompt template loaded");

    let model = GeminiClient::new(GeminiConfig::from(config))
        .context("Failed to create model API client")?;
    tracing::info!(
        model = %config.model_name(),
        api_base = %config.model_api_base(),
        timeout_secs = ?config.model_request_timeout_secs(),
        "Model client initialized"
    );

    let state = AppState::new(Arc::new(model), prompt);
    let rate_limiter = routes::setup_rate_limiter(config);

    routes::setup_routes(config, state, rate_limiter)
}

//! Startup checks beyond what `Config` parsing enforces

use anyhow::Result;
use luggage_core::Config;
use luggage_infra::LogFormat;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    config
        .log_format()
        .parse::<LogFormat>()
        .map_err(|e| anyhow::anyhow!("LOG_FORMAT: {}", e))?;

    if let Some(path) = config.prompt_path() {
        if !path.is_file() {
            return Err(anyhow::anyhow!(
                "PROMPT_PATH does not point to a file: {}",
                path.display()
            ));
        }
    }

    if config.is_production() && !config.allowed_origin().starts_with("https://") {
        tracing::warn!(
            allowed_origin = %config.allowed_origin(),
            "Allowed origin is not HTTPS in production"
        );
    }

    if config.trusted_proxy_count() > 10 {
        tracing::warn!(
            trusted_proxy_count = config.trusted_proxy_count(),
            "TRUSTED_PROXY_COUNT is very high - ensure this matches your actual proxy setup"
        );
    }

    Ok(())
}

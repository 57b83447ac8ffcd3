//! Configuration module
//!
//! Configuration is read once at startup and handed to the application state.
//! Request handling never touches the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

// Common constants
const DEFAULT_PORT: u16 = 5000;
const RATE_LIMIT_PER_MINUTE: u32 = 10;
const RATE_LIMIT_WINDOW_SECS: u64 = 60;
const RATE_LIMITER_SHARD_COUNT: usize = 16;
const TRUSTED_PROXY_COUNT: usize = 0;
const MAX_REQUEST_BODY_MB: usize = 20;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub allowed_origin: String,
    pub environment: String,
    pub rate_limit_per_minute: u32,
    pub rate_limit_window_secs: u64,
    pub rate_limiter_shard_count: usize,
    pub trusted_proxy_count: usize,
    pub max_request_body_bytes: usize,
    /// `text` or `json`
    pub log_format: String,
}

/// Settings for the external multimodal model
#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    /// `None` leaves the HTTP client on its transport defaults.
    pub request_timeout_secs: Option<u64>,
    /// Overrides the bundled prompt when set.
    pub prompt_path: Option<PathBuf>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub model: ModelConfig,
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let allowed_origin = var("ALLOWED_ORIGIN")
            .or_else(|| var("ORIGIN_PROD"))
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("ALLOWED_ORIGIN (or ORIGIN_PROD) must be set"))?;

        let max_request_body_mb: usize =
            parse_number(&var, "MAX_REQUEST_BODY_MB")?.unwrap_or(MAX_REQUEST_BODY_MB);
        let max_request_body_bytes = max_request_body_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_REQUEST_BODY_MB is too large"))?;

        let base = BaseConfig {
            server_port: parse_number(&var, "PORT")?.unwrap_or(DEFAULT_PORT),
            allowed_origin,
            environment,
            rate_limit_per_minute: parse_number(&var, "RATE_LIMIT_PER_MINUTE")?
                .unwrap_or(RATE_LIMIT_PER_MINUTE),
            rate_limit_window_secs: parse_number(&var, "RATE_LIMIT_WINDOW_SECS")?
                .unwrap_or(RATE_LIMIT_WINDOW_SECS),
            rate_limiter_shard_count: parse_number(&var, "RATE_LIMITER_SHARD_COUNT")?
                .unwrap_or(RATE_LIMITER_SHARD_COUNT),
            trusted_proxy_count: parse_number(&var, "TRUSTED_PROXY_COUNT")?
                .unwrap_or(TRUSTED_PROXY_COUNT),
            max_request_body_bytes,
            log_format: var("LOG_FORMAT").unwrap_or_else(|| "text".to_string()),
        };

        let model = ModelConfig {
            api_key: var("GENAI_API_KEY")
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("GENAI_API_KEY must be set"))?,
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            api_base: var("GEMINI_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            request_timeout_secs: parse_number(&var, "MODEL_REQUEST_TIMEOUT_SECS")?,
            prompt_path: var("PROMPT_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        };

        let config = Config { base, model };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.allowed_origin == "*" {
            return Err(anyhow::anyhow!(
                "ALLOWED_ORIGIN cannot be '*'. Please specify the single origin allowed to call the API."
            ));
        }

        if !self.base.allowed_origin.starts_with("http://")
            && !self.base.allowed_origin.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "ALLOWED_ORIGIN must be an http(s) origin, got '{}'",
                self.base.allowed_origin
            ));
        }

        if self.base.rate_limit_per_minute == 0 {
            return Err(anyhow::anyhow!("RATE_LIMIT_PER_MINUTE cannot be 0"));
        }

        if self.base.rate_limit_window_secs == 0 {
            return Err(anyhow::anyhow!("RATE_LIMIT_WINDOW_SECS cannot be 0"));
        }

        if self.base.max_request_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_REQUEST_BODY_MB cannot be 0"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn allowed_origin(&self) -> &str {
        &self.base.allowed_origin
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.base.rate_limit_per_minute
    }

    pub fn rate_limit_window_secs(&self) -> u64 {
        self.base.rate_limit_window_secs
    }

    pub fn rate_limiter_shard_count(&self) -> usize {
        self.base.rate_limiter_shard_count.max(1)
    }

    pub fn trusted_proxy_count(&self) -> usize {
        self.base.trusted_proxy_count
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.base.max_request_body_bytes
    }

    pub fn log_format(&self) -> &str {
        &self.base.log_format
    }

    pub fn model_api_key(&self) -> &str {
        &self.model.api_key
    }

    pub fn model_name(&self) -> &str {
        &self.model.model
    }

    pub fn model_api_base(&self) -> &str {
        &self.model.api_base
    }

    pub fn model_request_timeout_secs(&self) -> Option<u64> {
        self.model.request_timeout_secs
    }

    pub fn prompt_path(&self) -> Option<&std::path::Path> {
        self.model.prompt_path.as_deref()
    }
}

/// Parse an optional numeric variable. Unset is `None`; set but malformed is an error.
fn parse_number<T, F>(var: &F, name: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a valid number", name))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("GENAI_API_KEY", "test-key"),
        ("ALLOWED_ORIGIN", "https://app.example.com"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.server_port(), 5000);
        assert_eq!(config.rate_limit_per_minute(), 10);
        assert_eq!(config.rate_limit_window_secs(), 60);
        assert_eq!(config.model_name(), "gemini-1.5-flash");
        assert_eq!(config.model_request_timeout_secs(), None);
        assert!(config.prompt_path().is_none());
        assert_eq!(config.log_format(), "text");
        assert!(!config.is_production());
    }

    #[test]
    fn test_origin_prod_alias_and_trailing_slash() {
        let config = load(&[
            ("GENAI_API_KEY", "k"),
            ("ORIGIN_PROD", "https://luggage.example.com/"),
        ])
        .unwrap();
        assert_eq!(config.allowed_origin(), "https://luggage.example.com");
    }

    #[test]
    fn test_missing_api_key() {
        let err = load(&[("ALLOWED_ORIGIN", "https://a.example")]).unwrap_err();
        assert!(err.to_string().contains("GENAI_API_KEY"));
    }

    #[test]
    fn test_missing_origin() {
        let err = load(&[("GENAI_API_KEY", "k")]).unwrap_err();
        assert!(err.to_string().contains("ALLOWED_ORIGIN"));
    }

    #[test]
    fn test_wildcard_origin_rejected() {
        assert!(load(&[("GENAI_API_KEY", "k"), ("ALLOWED_ORIGIN", "*")]).is_err());
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "not-a-port"));
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_malformed_numbers_are_errors() {
        for (name, value) in [
            ("RATE_LIMIT_PER_MINUTE", "ten"),
            ("RATE_LIMIT_WINDOW_SECS", "-1"),
            ("TRUSTED_PROXY_COUNT", "1.5"),
            ("MAX_REQUEST_BODY_MB", "20MB"),
            ("MODEL_REQUEST_TIMEOUT_SECS", "soon"),
        ] {
            let mut vars = REQUIRED.to_vec();
            vars.push((name, value));
            let err = load(&vars).unwrap_err();
            assert_eq!(err.to_string(), format!("{name} must be a valid number"));
        }
    }

    #[test]
    fn test_oversized_body_limit_is_error() {
        let huge = usize::MAX.to_string();
        let mut vars = REQUIRED.to_vec();
        vars.push(("MAX_REQUEST_BODY_MB", huge.as_str()));
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("MAX_REQUEST_BODY_MB is too large"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("PORT", "8080"),
            ("RATE_LIMIT_PER_MINUTE", "3"),
            ("MODEL_REQUEST_TIMEOUT_SECS", "30"),
            ("GEMINI_API_BASE", "http://localhost:9999/"),
            ("ENVIRONMENT", "Production"),
        ]);
        let config = load(&vars).unwrap();
        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.rate_limit_per_minute(), 3);
        assert_eq!(config.model_request_timeout_secs(), Some(30));
        assert_eq!(config.model_api_base(), "http://localhost:9999");
        assert!(config.is_production());
    }
}

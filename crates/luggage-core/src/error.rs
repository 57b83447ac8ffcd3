//! Error types module
//!
//! All failures of the estimation flow are unified under [`AppError`]. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`]; the API crate turns
//! that into a response.

use std::io;

/// Body text for a request without an image.
pub const NO_IMAGE_MESSAGE: &str = "No image provided";

/// Body text for an image that is not valid base64.
pub const INVALID_IMAGE_MESSAGE: &str = "Invalid image data";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for failures an operator should see
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NO_IMAGE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No image provided")]
    MissingImage,

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// The model call itself failed (network, quota, upstream status, empty reply).
    #[error("{0}")]
    Upstream(String),

    /// The model answered, but no JSON could be extracted from the reply.
    #[error("Failed to parse JSON response: {reason}")]
    UnparseableReply { reason: String, raw: String },

    #[error("{0}")]
    Internal(String),

    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::InvalidImage(err.to_string())
    }
}

impl AppError {
    /// Variant name, used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingImage => "MissingImage",
            AppError::InvalidImage(_) => "InvalidImage",
            AppError::Upstream(_) => "Upstream",
            AppError::UnparseableReply { .. } => "UnparseableReply",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "InternalWithSource",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::MissingImage | AppError::InvalidImage(_) => 400,
            AppError::Upstream(_)
            | AppError::UnparseableReply { .. }
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingImage => "NO_IMAGE",
            AppError::InvalidImage(_) => "INVALID_IMAGE",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::UnparseableReply { .. } => "UNPARSEABLE_MODEL_REPLY",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingImage => NO_IMAGE_MESSAGE.to_string(),
            AppError::InvalidImage(_) => INVALID_IMAGE_MESSAGE.to_string(),
            AppError::Upstream(msg) | AppError::Internal(msg) => msg.clone(),
            AppError::InternalWithSource { message, .. } => message.clone(),
            AppError::UnparseableReply { .. } => {
                crate::models::ERROR_PLACEHOLDER_DESCRIPTION.to_string()
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::MissingImage => LogLevel::Warn,
            AppError::InvalidImage(_)
            | AppError::Upstream(_)
            | AppError::UnparseableReply { .. }
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}

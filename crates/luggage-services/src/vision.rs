//! Multimodal model abstraction.

use async_trait::async_trait;
use luggage_core::{AppError, ImagePayload};
use thiserror::Error;

/// A model that answers a text instruction about one image with free text.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Name reported in logs (e.g. "gemini-1.5-flash").
    fn model_name(&self) -> &str;

    /// Send the instruction followed by the image and return the reply text.
    ///
    /// One round-trip, no retries.
    async fn generate(&self, prompt: &str, image: &ImagePayload) -> Result<String, ModelError>;
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to send request to model API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model API request failed: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse model API response: {0}")]
    Decode(String),

    #[error("Model blocked the prompt: {0}")]
    Blocked(String),

    #[error("Model returned no text")]
    EmptyReply,
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

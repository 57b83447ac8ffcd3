//! Google Gemini `generateContent` client

mod types;

pub use types::{
    Candidate, CandidateContent, CandidatePart, Content, GenerateContentRequest,
    GenerateContentResponse, InlineData, Part, PromptFeedback,
};

use async_trait::async_trait;
use luggage_core::{Config, ImagePayload};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::{Duration, Instant};

use crate::vision::{ModelError, VisionModel};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini API
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub api_base: String,
    pub timeout: Option<Duration>,
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<&Config> for GeminiConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.model_api_key().to_string(),
            model: config.model_name().to_string(),
            api_base: config.model_api_base().to_string(),
            timeout: config.model_request_timeout_secs().map(Duration::from_secs),
        }
    }
}

pub struct GeminiClient {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(prompt: &str, image: &ImagePayload) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.data().to_string(),
                        },
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl VisionModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str, image: &ImagePayload) -> Result<String, ModelError> {
        let started = Instant::now();
        tracing::debug!(
            model = %self.config.model,
            image_bytes = image.decoded_len(),
            "Sending generateContent request"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&Self::build_request(prompt, image))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        if let Some(reason) = body
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone())
        {
            return Err(ModelError::Blocked(reason));
        }

        let text = body.text().ok_or_else(|| {
            tracing::warn!(
                finish_reason = ?body.candidates.first().and_then(|c| c.finish_reason.as_deref()),
                "Model response carried no text"
            );
            ModelError::EmptyReply
        })?;

        tracing::debug!(
            model = %self.config.model,
            reply_chars = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model reply received"
        );

        Ok(text)
    }
}

//! Luggage Estimator Core Library
//!
//! This crate provides the domain models, error types, configuration, prompt template
//! and model-reply parsing shared by the service and API crates.

pub mod config;
pub mod error;
pub mod image;
pub mod models;
pub mod prompt;
pub mod reply;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ModelConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use image::ImagePayload;
pub use models::{BoundingBox, Confidence, EstimateSizeRequest, LuggageItem, Measurement};
pub use prompt::PromptTemplate;
pub use reply::{extract_json_block, parse_model_reply, ParsedReply};

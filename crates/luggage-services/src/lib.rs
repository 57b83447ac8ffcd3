//! Luggage Estimator Services Layer
//!
//! Adapters for the external multimodal model. The API crate only depends on the
//! [`VisionModel`] trait so handlers can be exercised against a scripted model in tests.

pub mod gemini;
pub mod vision;

pub use gemini::{GeminiClient, GeminiConfig};
pub use vision::{ModelError, VisionModel};

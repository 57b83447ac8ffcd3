//! Shared application state

use luggage_core::PromptTemplate;
use luggage_services::VisionModel;
use std::sync::Arc;

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn VisionModel>,
    pub prompt: Arc<PromptTemplate>,
}

impl AppState {
    pub fn new(model: Arc<dyn VisionModel>, prompt: PromptTemplate) -> Self {
        Self {
            model,
            prompt: Arc::new(prompt),
        }
    }
}

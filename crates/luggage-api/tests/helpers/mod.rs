//! Test helpers: build the real router around a scripted model.
//!
//! No network: the model is a stub that replays canned replies and counts calls.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use luggage_api::setup::routes;
use luggage_api::AppState;
use luggage_core::{Config, ImagePayload, PromptTemplate};
use luggage_infra::InMemoryRateLimiter;
use luggage_services::{ModelError, VisionModel};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ALLOWED_ORIGIN: &str = "https://luggage.example.com";
pub const ESTIMATE_PATH: &str = "/api/estimate-size";

/// Smallest payload that decodes: the start of a JPEG header.
pub const JPEG_B64: &str = "/9j/4AAQSkZJRg==";

/// What the stub model does on every call
#[derive(Clone, Debug)]
pub enum Script {
    Reply(String),
    Status(u16, String),
    Empty,
}

pub struct StubModel {
    script: Script,
    calls: AtomicUsize,
    last_image: Mutex<Option<String>>,
    last_prompt: Mutex<Option<String>>,
}

impl StubModel {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_image: Mutex::new(None),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_image(&self) -> Option<String> {
        self.last_image.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModel for StubModel {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, prompt: &str, image: &ImagePayload) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image.lock().unwrap() = Some(image.data().to_string());
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Status(status, body) => Err(ModelError::Status {
                status: *status,
                body: body.clone(),
            }),
            Script::Empty => Err(ModelError::EmptyReply),
        }
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = [
        ("GENAI_API_KEY", "test-key"),
        ("ALLOWED_ORIGIN", ALLOWED_ORIGIN),
    ]
    .iter()
    .chain(extra)
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    Config::from_vars(|key| vars.get(key).cloned()).unwrap()
}

pub struct TestApp {
    pub server: TestServer,
    pub model: Arc<StubModel>,
}

/// Router with default configuration around `model`.
pub fn setup_test_app(model: StubModel) -> TestApp {
    setup_test_app_with_config(model, &test_config(&[]))
}

pub fn setup_test_app_with_config(model: StubModel, config: &Config) -> TestApp {
    let model = Arc::new(model);
    let state = AppState::new(model.clone(), PromptTemplate::bundled());
    let rate_limiter = Arc::new(InMemoryRateLimiter::with_shards(
        config.rate_limit_per_minute(),
        Duration::from_secs(config.rate_limit_window_secs()),
        config.rate_limiter_shard_count(),
    ));

    let router = routes::setup_routes(config, state, rate_limiter).unwrap();
    TestApp {
        server: TestServer::new(router).unwrap(),
        model,
    }
}

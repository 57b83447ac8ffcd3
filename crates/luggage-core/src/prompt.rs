//! Instruction prompt sent alongside every image.
//!
//! The prompt and the JSON schema it asks for are the contract with the external model,
//! so they live as versioned data next to this crate rather than inline in the handler.

use std::path::Path;

const BUNDLED_VERSION: &str = "luggage_estimation_v1";
const BUNDLED_TEXT: &str = include_str!("../prompts/luggage_estimation_v1.txt");

/// A versioned instruction prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    version: String,
    text: String,
}

impl PromptTemplate {
    pub fn new(version: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            text: text.into(),
        }
    }

    /// The prompt compiled into the binary.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_VERSION, BUNDLED_TEXT)
    }

    /// Read a prompt from disk. The file stem becomes the version label.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read prompt file {}: {}", path.display(), e))?;

        if text.trim().is_empty() {
            return Err(anyhow::anyhow!("Prompt file {} is empty", path.display()));
        }

        let version = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_string();

        Ok(Self::new(version, text))
    }

    /// Use the file at `path` when given, the bundled prompt otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::bundled()),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Body of `POST /api/estimate-size`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateSizeRequest {
    /// Base64 image, optionally prefixed with a `data:<mime>;base64,` header.
    pub image: String,
}

impl EstimateSizeRequest {
    /// Interpret a raw request body.
    ///
    /// An empty or non-JSON body, a non-object body, and a missing or null `image` all
    /// count as "no image". An empty string is still an image and goes on to decoding.
    /// A non-string `image` is invalid image data.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::MissingImage);
        }

        let value: Value = serde_json::from_slice(body).map_err(|_| AppError::MissingImage)?;

        match value.get("image") {
            None | Some(Value::Null) => Err(AppError::MissingImage),
            Some(Value::String(image)) => Ok(Self {
                image: image.clone(),
            }),
            Some(other) => Err(AppError::InvalidImage(format!(
                "expected a string, got {}",
                json_type_name(other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

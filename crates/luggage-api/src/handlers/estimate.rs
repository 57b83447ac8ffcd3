//! `POST /api/estimate-size`

use axum::{extract::State, Extension, Json};
use luggage_core::{parse_model_reply, ImagePayload};
use luggage_infra::RequestId;
use serde_json::Value;
use std::time::Instant;

use crate::error::{EstimateRequestBody, HttpAppError};
use crate::state::AppState;

/// Estimate luggage dimensions from one image.
///
/// The model reply is returned as the model wrote it, normalized to an array.
pub async fn estimate_size(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    EstimateRequestBody(request): EstimateRequestBody,
) -> Result<Json<Vec<Value>>, HttpAppError> {
    let request_id = request_id.map(|Extension(RequestId(id))| id);
    let image = ImagePayload::parse(&request.image)?;
    if image.had_prefix() {
        tracing::debug!("Stripped data URL prefix from image");
    }

    tracing::debug!(
        request_id = ?request_id,
        model = %state.model.model_name(),
        prompt_version = %state.prompt.version(),
        image_bytes = image.decoded_len(),
        "Dispatching image to model"
    );

    let started = Instant::now();
    let reply = state.model.generate(state.prompt.text(), &image).await?;

    let parsed = parse_model_reply(&reply)?;
    let typed = parsed.luggage_items();
    tracing::debug!(
        request_id = ?request_id,
        item_count = parsed.items.len(),
        typed_items = typed.len(),
        wrapped = parsed.wrapped,
        no_luggage = parsed.is_no_luggage(),
        object_types = ?typed.iter().map(|item| item.object_type.as_str()).collect::<Vec<_>>(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Parsed model reply"
    );

    Ok(Json(parsed.items))
}

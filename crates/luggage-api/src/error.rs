//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; anything convertible into `AppError` renders
//! through [`HttpAppError::into_response`] with consistent status, body and logging.

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use luggage_core::models::ErrorPlaceholder;
use luggage_core::{AppError, ErrorMetadata, EstimateSizeRequest, LogLevel};
use luggage_infra::ErrorResponse;

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: both the trait and AppError are foreign to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<luggage_services::ModelError> for HttpAppError {
    fn from(err: luggage_services::ModelError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// Body extractor for the estimate endpoint.
///
/// Unlike `Json<T>`, a missing, empty or non-JSON body is reported as a missing image
/// rather than axum's default rejection. Body-size rejections keep axum's 413.
#[derive(Debug, Clone)]
pub struct EstimateRequestBody(pub EstimateSizeRequest);

impl<S> FromRequest<S> for EstimateRequestBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        EstimateSizeRequest::from_body(&body)
            .map(EstimateRequestBody)
            .map_err(|e| HttpAppError(e).into_response())
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let code = error.error_code();
    match error {
        AppError::UnparseableReply { reason, raw } => {
            tracing::error!(
                reason = %reason,
                raw_reply = %raw,
                error_type,
                code,
                "Failed to parse JSON from model reply"
            );
        }
        _ => match error.log_level() {
            LogLevel::Warn => {
                tracing::warn!(error = %error, error_type, code, "Request rejected");
            }
            LogLevel::Error => {
                tracing::error!(error = %error, error_type, code, "Error occurred");
            }
        },
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Clients of the estimate endpoint expect an item array even on parse failure
        if let AppError::UnparseableReply { .. } = app_error {
            return (status, Json(vec![ErrorPlaceholder::default()])).into_response();
        }

        (status, Json(ErrorResponse::new(app_error.client_message()))).into_response()
    }
}

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use hirecast::InferenceError;

use super::HIRECAST_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client-caused; the message names the offending field(s).
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, hirecast_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Inference(InferenceError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            GatewayError::Inference(InferenceError::Feature(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "feature_error")
            }
            GatewayError::Inference(InferenceError::Model(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "model_error")
            }
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_client_error() {
            debug!(error = %self, "Rejected request");
        } else {
            error!(error = ?self, kind = hirecast_status, "Request failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HIRECAST_STATUS_HEADER,
            HeaderValue::from_static(hirecast_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}

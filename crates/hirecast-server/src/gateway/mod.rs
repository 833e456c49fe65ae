//! HTTP gateway (Axum) for inference and drift reporting.
//!
//! This module is primarily used by the `hirecast` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::{drift_handler, predict_handler, predict_vector_handler};
pub use state::HandlerState;

/// Response header carrying a short machine-readable outcome.
pub const HIRECAST_STATUS_HEADER: &str = "x-hirecast-status";
pub const HIRECAST_STATUS_HEALTHY: &str = "healthy";
pub const HIRECAST_STATUS_READY: &str = "ready";
pub const HIRECAST_STATUS_ERROR: &str = "error";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/predict", post(predict_handler))
        .route("/predict/vector", post(predict_vector_handler))
        .route("/drift", get(drift_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub classifier: &'static str,
    pub reference: &'static str,
    pub ledger: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        HIRECAST_STATUS_HEADER,
        HeaderValue::from_static(HIRECAST_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// The classifier is loaded before the router exists. A missing reference
/// snapshot is reported but does not make the service unready.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let ledger_status = if state.context.ledger().location_ready() {
        HIRECAST_STATUS_READY
    } else {
        HIRECAST_STATUS_ERROR
    };

    let reference_status = if state.context.reference().is_some() {
        "loaded"
    } else {
        "absent"
    };

    let components = ComponentStatus {
        http: HIRECAST_STATUS_READY,
        classifier: HIRECAST_STATUS_READY,
        reference: reference_status,
        ledger: ledger_status,
    };

    let is_ready = components.ledger == HIRECAST_STATUS_READY;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(HIRECAST_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}

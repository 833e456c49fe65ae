use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use hirecast::DriftReport;

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    PredictRequest, PredictResponse, VectorPredictResponse, vector_from_json,
};
use crate::gateway::state::HandlerState;

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, GatewayError> {
    body.map(|Json(value)| value)
        .map_err(|e| GatewayError::InvalidRequest(format!("malformed JSON body: {}", e.body_text())))
}

/// `POST /predict`: validate, build features, log to the ledger, classify.
#[instrument(skip(state, body), fields(prediction = tracing::field::Empty))]
pub async fn predict_handler(
    State(state): State<HandlerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, GatewayError> {
    let request = PredictRequest::from_json(&json_body(body)?)?;

    let context = state.context.clone();
    let inference = tokio::task::spawn_blocking(move || {
        context.predict(&request.job_description, &request.cv_text, &request.levels)
    })
    .await
    .map_err(|e| GatewayError::Internal(format!("inference task failed: {}", e)))??;

    tracing::Span::current().record("prediction", inference.prediction.label);
    debug!(
        match_score = inference.features.match_score(),
        "Prediction served"
    );

    Ok(Json(PredictResponse {
        prediction: inference.prediction.label,
        match_score: inference.features.match_score(),
        prob_contratado: inference.prediction.probability,
    }))
}

/// `POST /predict/vector`: classify a pre-built vector without ledger logging.
#[instrument(skip(state, body))]
pub async fn predict_vector_handler(
    State(state): State<HandlerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<VectorPredictResponse>, GatewayError> {
    let features = vector_from_json(&json_body(body)?)?;

    let context = state.context.clone();
    let prediction = tokio::task::spawn_blocking(move || context.predict_vector(&features))
        .await
        .map_err(|e| GatewayError::Internal(format!("inference task failed: {}", e)))??;

    Ok(Json(VectorPredictResponse {
        prediction: prediction.label,
        prob_contratado: prediction.probability,
    }))
}

/// `GET /drift`: always 200.
#[instrument(skip(state))]
pub async fn drift_handler(State(state): State<HandlerState>) -> Json<DriftReport> {
    let context = state.context.clone();
    let report = match tokio::task::spawn_blocking(move || context.check_drift()).await {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, "Drift check task failed; reporting insufficient data");
            DriftReport::insufficient_data()
        }
    };
    Json(report)
}

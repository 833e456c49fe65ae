//! Request validation and response bodies.
//!
//! Bodies are taken as raw JSON and checked field by field so that every missing
//! required field is named in one 400. JSON `null` counts as missing.

use serde::Serialize;
use serde_json::{Map, Value};

use hirecast::encoding::CategoricalField;
use hirecast::{FeatureVector, LevelFields};

use super::error::GatewayError;

pub const JOB_DESCRIPTION: &str = "job_description";
pub const CV_TEXT: &str = "cv_text";
pub const VECTOR_DATA: &str = "data";

/// Validated `/predict` body.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictRequest {
    pub job_description: String,
    pub cv_text: String,
    pub levels: LevelFields,
}

impl PredictRequest {
    pub fn from_json(body: &Value) -> Result<Self, GatewayError> {
        let object = as_object(body)?;

        let mut missing = Vec::new();
        let mut wrong_type = Vec::new();

        let mut required = |key: &'static str| match object.get(key) {
            None | Some(Value::Null) => {
                missing.push(key);
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                wrong_type.push(key);
                None
            }
        };
        let job_description = required(JOB_DESCRIPTION);
        let cv_text = required(CV_TEXT);

        let mut levels = LevelFields::new();
        for field in CategoricalField::ALL {
            match object.get(field.request_key()) {
                None | Some(Value::Null) => {}
                Some(Value::String(s)) => levels = levels.with(field, s.clone()),
                Some(_) => wrong_type.push(field.request_key()),
            }
        }

        if !missing.is_empty() {
            return Err(GatewayError::InvalidRequest(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        if !wrong_type.is_empty() {
            return Err(GatewayError::InvalidRequest(format!(
                "field(s) must be strings: {}",
                wrong_type.join(", ")
            )));
        }

        match (job_description, cv_text) {
            (Some(job_description), Some(cv_text)) => Ok(Self {
                job_description,
                cv_text,
                levels,
            }),
            _ => Err(GatewayError::InvalidRequest(format!(
                "missing required field(s): {}, {}",
                JOB_DESCRIPTION, CV_TEXT
            ))),
        }
    }
}

/// Parses `{"data": [f64; 5]}` for `/predict/vector`.
pub fn vector_from_json(body: &Value) -> Result<FeatureVector, GatewayError> {
    let object = as_object(body)?;

    let items = match object.get(VECTOR_DATA) {
        None | Some(Value::Null) => {
            return Err(GatewayError::InvalidRequest(format!(
                "missing required field(s): {}",
                VECTOR_DATA
            )));
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(GatewayError::InvalidRequest(format!(
                "field `{}` must be an array of numbers",
                VECTOR_DATA
            )));
        }
    };

    let values: Vec<f64> = items
        .iter()
        .map(Value::as_f64)
        .collect::<Option<_>>()
        .ok_or_else(|| {
            GatewayError::InvalidRequest(format!(
                "field `{}` must be an array of numbers",
                VECTOR_DATA
            ))
        })?;

    FeatureVector::from_slice(&values).map_err(|e| GatewayError::InvalidRequest(e.to_string()))
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, GatewayError> {
    body.as_object()
        .ok_or_else(|| GatewayError::InvalidRequest("request body must be a JSON object".into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictResponse {
    pub prediction: u8,
    pub match_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prob_contratado: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorPredictResponse {
    pub prediction: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prob_contratado: Option<f64>,
}

use thiserror::Error;

use crate::config::ConfigError;
use crate::encoding::EncodingError;
use crate::features::FeatureError;
use crate::ledger::StorageError;
use crate::model::ModelError;
use crate::similarity::SimilarityError;

/// Startup failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("vectorizer: {0}")]
    Vectorizer(#[from] SimilarityError),

    #[error("encoders: {0}")]
    Encoders(#[from] EncodingError),

    #[error("classifier: {0}")]
    Classifier(#[from] ModelError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// Request-time failures past validation. All of them are internal errors.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("feature building failed: {0}")]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("classification failed: {0}")]
    Model(#[from] ModelError),
}

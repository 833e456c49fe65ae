use thiserror::Error;

use crate::similarity::SimilarityError;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("similarity failed: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("expected {expected} feature values, got {actual}")]
    WrongWidth { expected: usize, actual: usize },

    #[error("feature '{column}' is not a finite number")]
    NonFinite { column: &'static str },
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("vectorizer artifact not found at path: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("failed to load vectorizer: {reason}")]
    LoadFailed { reason: String },

    #[error("text transform failed: {reason}")]
    TransformFailed { reason: String },
}

impl From<std::io::Error> for SimilarityError {
    fn from(err: std::io::Error) -> Self {
        SimilarityError::LoadFailed {
            reason: err.to_string(),
        }
    }
}

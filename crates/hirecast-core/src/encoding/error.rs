use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("encoder artifact not found at path: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("failed to read encoder artifact {path}: {reason}")]
    ArtifactUnreadable { path: PathBuf, reason: String },

    #[error("invalid encoder artifact: {reason}")]
    InvalidArtifact { reason: String },

    #[error("duplicate class '{label}' in encoder")]
    DuplicateClass { label: String },
}

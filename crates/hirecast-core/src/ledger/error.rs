use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The ledger exists but cannot be read.
    #[error("drift ledger unavailable at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    /// A row could not be durably appended.
    #[error("drift ledger write failed at {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

//! Cross-cutting, shared constants.
//!
//! # Feature Schema Invariant
//!
//! The classifier and the training reference snapshot were produced against exactly
//! [`FEATURE_COLUMNS`], in this order. Changing the order or the count requires
//! retraining and regenerating the reference snapshot; nothing in this crate
//! migrates old ledgers.

/// Number of columns in a feature vector.
pub const FEATURE_COUNT: usize = 5;

/// Ordered feature column names (ledger header, reference header, drift report keys).
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "match_score",
    "nivel_profissional_vaga_enc",
    "nivel_ingles_vaga_enc",
    "nivel_ingles_enc",
    "nivel_academico_enc",
];

/// Code assigned to any categorical label outside an encoder's known set.
pub const FALLBACK_CODE: u32 = 0;

/// Default KS-test significance level.
pub const DEFAULT_DRIFT_ALPHA: f64 = 0.05;

/// Report text when there is nothing to compare yet.
pub const INSUFFICIENT_DATA: &str = "insufficient data";

/// Default decision threshold for the positive class.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Experiment-tracking run name for `/predict` calls.
pub const INFERENCE_RUN_NAME: &str = "inference";

/// Experiment-tracking run name for drift checks.
pub const DRIFT_RUN_NAME: &str = "drift_check";

/// Artifact file names, relative to the configured artifacts directory.
pub const CLASSIFIER_ARTIFACT: &str = "classifier.json";
pub const VECTORIZER_ARTIFACT: &str = "vectorizer.json";

/// Returns the position of `column` in [`FEATURE_COLUMNS`].
pub fn column_index(column: &str) -> Option<usize> {
    FEATURE_COLUMNS.iter().position(|c| *c == column)
}

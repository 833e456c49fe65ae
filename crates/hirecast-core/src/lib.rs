//! Hirecast library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Serving
//! - [`ServingContext`] - Loaded artifacts plus ledger, sink and drift detector
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//!
//! ## Feature Pipeline
//! - [`EncoderSet`], [`LabelEncoder`] - Categorical encoding with code `0` fallback
//! - [`SimilarityExtractor`], [`TfidfVectorizer`] - Text match score
//! - [`FeatureBuilder`], [`FeatureVector`] - The 5-column classifier input
//!
//! ## Model & Monitoring
//! - [`Classifier`], [`LogisticClassifier`], [`Prediction`]
//! - [`DriftLedger`] - Append-only CSV of every inference-time vector
//! - [`DriftDetector`], [`DriftReport`] - KS comparison against the training reference
//! - [`ExperimentSink`], [`Run`] - Fire-and-forget experiment tracking
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod context;
pub mod drift;
pub mod encoding;
pub mod features;
pub mod ledger;
pub mod model;
pub mod similarity;
mod tabular;
pub mod tracking;

pub use config::{Config, ConfigError};
pub use constants::{FEATURE_COLUMNS, FEATURE_COUNT};
pub use context::{ContextError, Inference, InferenceError, ServingContext, ServingContextBuilder};
pub use drift::{DriftDetector, DriftReport, FeatureDrift, ReferenceError, ReferenceSnapshot};
pub use encoding::{CategoricalEncoder, CategoricalField, EncoderSet, EncodingError, LabelEncoder};
pub use features::{FeatureBuilder, FeatureError, FeatureVector, LevelFields};
pub use ledger::{DriftLedger, StorageError};
pub use model::{Classifier, LogisticClassifier, ModelError, Prediction};
pub use similarity::{
    SimilarityError, SimilarityExtractor, SparseVector, TextVectorizer, TfidfVectorizer,
};
pub use tracking::{ExperimentSink, MlflowSink, Run, RunRecord, TracingSink};

#[cfg(any(test, feature = "mock"))]
pub use model::StubClassifier;
#[cfg(any(test, feature = "mock"))]
pub use similarity::StubVectorizer;
#[cfg(any(test, feature = "mock"))]
pub use tracking::RecordingSink;

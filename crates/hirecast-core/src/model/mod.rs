//! Binary hiring classifier.
//!
//! The production model is a black box behind [`Classifier`]. [`LogisticClassifier`]
//! loads exported weights; [`StubClassifier`] (behind `mock`) substitutes for it in
//! tests.

pub mod error;
mod logistic;
#[cfg(any(test, feature = "mock"))]
mod mock;


pub use error::ModelError;
pub use logistic::LogisticClassifier;
#[cfg(any(test, feature = "mock"))]
pub use mock::StubClassifier;

use crate::features::FeatureVector;

/// A fitted binary classifier over [`FeatureVector`]s.
pub trait Classifier: Send + Sync {
    /// Predicted label, `0` or `1`.
    fn predict(&self, features: &FeatureVector) -> Result<u8, ModelError>;

    /// `[p0, p1]` when the model is probabilistic, `None` otherwise.
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Option<[f64; 2]>, ModelError> {
        Ok(None)
    }
}

/// Label plus optional positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: u8,
    pub probability: Option<f64>,
}

impl Prediction {
    /// Runs both classifier calls for `features`.
    pub fn from_classifier(
        classifier: &dyn Classifier,
        features: &FeatureVector,
    ) -> Result<Self, ModelError> {
        let label = classifier.predict(features)?;
        if label > 1 {
            return Err(ModelError::PredictionFailed {
                reason: format!("classifier returned non-binary label {}", label),
            });
        }
        let probability = classifier.predict_proba(features)?.map(|p| p[1]);
        Ok(Self { label, probability })
    }
}

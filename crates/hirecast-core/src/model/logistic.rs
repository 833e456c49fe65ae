use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::constants::{DEFAULT_DECISION_THRESHOLD, FEATURE_COUNT};
use crate::features::FeatureVector;

use super::Classifier;
use super::error::ModelError;

fn default_threshold() -> f64 {
    DEFAULT_DECISION_THRESHOLD
}

#[derive(Debug, Deserialize)]
struct LogisticArtifact {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

/// Logistic-regression classifier exported as plain weights.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticClassifier {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    threshold: f64,
}

impl LogisticClassifier {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self, ModelError> {
        Self::with_threshold(coefficients, intercept, DEFAULT_DECISION_THRESHOLD)
    }

    pub fn with_threshold(
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
        threshold: f64,
    ) -> Result<Self, ModelError> {
        if coefficients.iter().any(|w| !w.is_finite()) || !intercept.is_finite() {
            return Err(ModelError::LoadFailed {
                reason: "classifier weights must be finite".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ModelError::LoadFailed {
                reason: format!("threshold must be between 0.0 and 1.0, got {}", threshold),
            });
        }

        Ok(Self {
            coefficients,
            intercept,
            threshold,
        })
    }

    /// Loads `{"coefficients": [..], "intercept": .., "threshold": ..}`.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read(path)?;
        let artifact: LogisticArtifact =
            serde_json::from_slice(&raw).map_err(|e| ModelError::LoadFailed {
                reason: format!("{}: {}", path.display(), e),
            })?;

        let coefficients: [f64; FEATURE_COUNT] =
            artifact.coefficients.as_slice().try_into().map_err(|_| {
                ModelError::LoadFailed {
                    reason: format!(
                        "expected {} coefficients, got {}",
                        FEATURE_COUNT,
                        artifact.coefficients.len()
                    ),
                }
            })?;

        let classifier = Self::with_threshold(coefficients, artifact.intercept, artifact.threshold)?;
        debug!(path = %path.display(), threshold = classifier.threshold, "Loaded classifier");
        Ok(classifier)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn positive_probability(&self, features: &FeatureVector) -> f64 {
        let z = self
            .coefficients
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LogisticClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<u8, ModelError> {
        Ok(u8::from(self.positive_probability(features) >= self.threshold))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Option<[f64; 2]>, ModelError> {
        let p1 = self.positive_probability(features);
        Ok(Some([1.0 - p1, p1]))
    }
}

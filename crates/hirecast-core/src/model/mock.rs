use parking_lot::Mutex;

use crate::features::FeatureVector;

use super::Classifier;
use super::error::ModelError;

/// Classifier returning a fixed answer and remembering what it was asked.
#[derive(Debug, Default)]
pub struct StubClassifier {
    label: u8,
    probability: Option<f64>,
    failure: Option<String>,
    seen: Mutex<Vec<FeatureVector>>,
}

impl StubClassifier {
    /// Always predicts `label`, with positive-class probability `probability`.
    pub fn new(label: u8, probability: Option<f64>) -> Self {
        Self {
            label,
            probability,
            ..Default::default()
        }
    }

    /// Every call fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Vectors passed to [`Classifier::predict`], in call order.
    pub fn seen(&self) -> Vec<FeatureVector> {
        self.seen.lock().clone()
    }

    fn check(&self) -> Result<(), ModelError> {
        match &self.failure {
            Some(reason) => Err(ModelError::PredictionFailed {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Classifier for StubClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<u8, ModelError> {
        self.seen.lock().push(*features);
        self.check()?;
        Ok(self.label)
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Option<[f64; 2]>, ModelError> {
        self.check()?;
        Ok(self.probability.map(|p| [1.0 - p, p]))
    }
}

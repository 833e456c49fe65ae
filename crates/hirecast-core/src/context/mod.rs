//! The immutable serving context.
//!
//! Everything a request needs is loaded once at startup and shared read-only:
//! feature builder (vectorizer + encoders), classifier, optional reference
//! snapshot, drift ledger, tracking sink and drift detector. The only mutable
//! state reachable from here is the ledger file and whatever the sink keeps
//! internally.
//!
//! # Inference Ordering
//!
//! [`ServingContext::predict`] appends the feature vector to the ledger *before*
//! calling the classifier, so a vector that later fails classification is still
//! recorded for drift purposes.

pub mod error;


pub use error::{ContextError, InferenceError};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{CLASSIFIER_ARTIFACT, FEATURE_COUNT, INFERENCE_RUN_NAME, VECTORIZER_ARTIFACT};
use crate::drift::{DriftDetector, DriftReport, ReferenceSnapshot};
use crate::encoding::EncoderSet;
use crate::features::{FeatureBuilder, FeatureVector, LevelFields};
use crate::ledger::DriftLedger;
use crate::model::{Classifier, LogisticClassifier, Prediction};
use crate::similarity::{SimilarityExtractor, TextVectorizer, TfidfVectorizer};
use crate::tracking::{ExperimentSink, MlflowSink, Run, TracingSink};

/// Outcome of a successful `/predict` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inference {
    pub features: FeatureVector,
    pub prediction: Prediction,
}

pub struct ServingContext {
    builder: FeatureBuilder,
    classifier: Arc<dyn Classifier>,
    reference: Option<ReferenceSnapshot>,
    ledger: DriftLedger,
    sink: Arc<dyn ExperimentSink>,
    detector: DriftDetector,
}

impl std::fmt::Debug for ServingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServingContext")
            .field("builder", &self.builder)
            .field("reference_loaded", &self.reference.is_some())
            .field("ledger", &self.ledger.path())
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}

impl ServingContext {
    /// Loads every artifact named by `config`.
    ///
    /// Classifier, vectorizer and encoder artifacts are required. The reference
    /// snapshot is optional; when it is missing or unreadable drift checks report
    /// insufficient data.
    pub fn load(config: &Config) -> Result<Self, ContextError> {
        let dir = &config.artifacts_dir;

        let vectorizer = TfidfVectorizer::load(&dir.join(VECTORIZER_ARTIFACT))?;
        let encoders = EncoderSet::load_dir(dir)?;
        let classifier = LogisticClassifier::load(&dir.join(CLASSIFIER_ARTIFACT))?;

        let reference = match ReferenceSnapshot::load(&config.reference_path) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "Reference snapshot unavailable; drift checks will report insufficient data");
                None
            }
        };

        let detector = DriftDetector::new().with_alpha(config.drift_alpha)?;

        let sink: Arc<dyn ExperimentSink> = match &config.mlflow_url {
            Some(url) => match MlflowSink::new(url.clone(), config.mlflow_experiment_id.clone()) {
                Ok(sink) => {
                    info!(url = %url, experiment_id = %config.mlflow_experiment_id, "Tracking runs in MLflow");
                    Arc::new(sink)
                }
                Err(e) => {
                    warn!(error = %e, "MLflow client unavailable; tracking runs as tracing events");
                    Arc::new(TracingSink)
                }
            },
            None => Arc::new(TracingSink),
        };

        info!(
            vocabulary = vectorizer.vocabulary_len(),
            reference = reference.is_some(),
            ledger = %config.ledger_path.display(),
            "Serving context loaded"
        );

        Ok(Self::builder(Arc::new(vectorizer), encoders, Arc::new(classifier))
            .reference(reference)
            .ledger(DriftLedger::new(&config.ledger_path))
            .sink(sink)
            .detector(detector)
            .build())
    }

    pub fn builder(
        vectorizer: Arc<dyn TextVectorizer>,
        encoders: EncoderSet,
        classifier: Arc<dyn Classifier>,
    ) -> ServingContextBuilder {
        ServingContextBuilder {
            vectorizer,
            encoders,
            classifier,
            reference: None,
            ledger: None,
            sink: None,
            detector: DriftDetector::default(),
        }
    }

    pub fn features(&self) -> &FeatureBuilder {
        &self.builder
    }

    pub fn ledger(&self) -> &DriftLedger {
        &self.ledger
    }

    pub fn reference(&self) -> Option<&ReferenceSnapshot> {
        self.reference.as_ref()
    }

    pub fn detector(&self) -> &DriftDetector {
        &self.detector
    }

    /// Build, log, classify, track. Blocking.
    pub fn predict(
        &self,
        job_description: &str,
        cv_text: &str,
        levels: &LevelFields,
    ) -> Result<Inference, InferenceError> {
        let features = self.builder.build(job_description, cv_text, levels)?;

        self.ledger.append(&features)?;

        let prediction = Prediction::from_classifier(self.classifier.as_ref(), &features)?;

        let mut run = Run::start(self.sink.as_ref(), INFERENCE_RUN_NAME);
        run.log_param("input_length", FEATURE_COUNT)
            .log_metric("prediction", f64::from(prediction.label))
            .log_metric("match_score", features.match_score());
        if let Some(p) = prediction.probability {
            run.log_metric("prob_contratado", p);
        }
        run.finish();

        debug!(
            prediction = prediction.label,
            match_score = features.match_score(),
            "Inference complete"
        );
        Ok(Inference {
            features,
            prediction,
        })
    }

    /// Classifies a pre-built vector. Not appended to the ledger.
    pub fn predict_vector(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let prediction = Prediction::from_classifier(self.classifier.as_ref(), features)?;

        let mut run = Run::start(self.sink.as_ref(), INFERENCE_RUN_NAME);
        run.log_param("input_length", FEATURE_COUNT)
            .log_metric("prediction", f64::from(prediction.label));
        if let Some(p) = prediction.probability {
            run.log_metric("prob_contratado", p);
        }
        run.finish();

        Ok(prediction)
    }

    /// Compares the whole ledger with the reference. Blocking.
    pub fn check_drift(&self) -> DriftReport {
        self.detector
            .check(&self.ledger, self.reference.as_ref(), self.sink.as_ref())
    }
}

/// Assembles a [`ServingContext`] from already-built collaborators.
pub struct ServingContextBuilder {
    vectorizer: Arc<dyn TextVectorizer>,
    encoders: EncoderSet,
    classifier: Arc<dyn Classifier>,
    reference: Option<ReferenceSnapshot>,
    ledger: Option<DriftLedger>,
    sink: Option<Arc<dyn ExperimentSink>>,
    detector: DriftDetector,
}

impl ServingContextBuilder {
    pub fn reference(mut self, reference: Option<ReferenceSnapshot>) -> Self {
        self.reference = reference;
        self
    }

    pub fn ledger(mut self, ledger: DriftLedger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ExperimentSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn detector(mut self, detector: DriftDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Unset ledger defaults to the configured default path; unset sink to [`TracingSink`].
    pub fn build(self) -> ServingContext {
        ServingContext {
            builder: FeatureBuilder::new(SimilarityExtractor::new(self.vectorizer), self.encoders),
            classifier: self.classifier,
            reference: self.reference,
            ledger: self
                .ledger
                .unwrap_or_else(|| DriftLedger::new(Config::default().ledger_path)),
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            detector: self.detector,
        }
    }
}

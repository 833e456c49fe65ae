use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::config::ConfigError;
use crate::constants::{DEFAULT_DRIFT_ALPHA, DRIFT_RUN_NAME, FEATURE_COLUMNS};
use crate::features::FeatureVector;
use crate::ledger::DriftLedger;
use crate::tracking::{ExperimentSink, Run};

use super::ks::ks_2samp;
use super::reference::ReferenceSnapshot;
use super::report::{DriftReport, FeatureDrift};

/// Column-wise KS comparison of live features against the training reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftDetector {
    alpha: f64,
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_DRIFT_ALPHA,
        }
    }
}

impl DriftDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the significance level, which must lie strictly inside (0, 1).
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self, ConfigError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha {
                value: alpha.to_string(),
            });
        }
        self.alpha = alpha;
        Ok(self)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Pure comparison; no I/O and no tracking.
    pub fn compare(
        &self,
        reference: Option<&ReferenceSnapshot>,
        live: &[FeatureVector],
    ) -> DriftReport {
        let Some(reference) = reference else {
            return DriftReport::insufficient_data();
        };
        if live.is_empty() || reference.column_names().next().is_none() {
            return DriftReport::insufficient_data();
        }

        let mut features = BTreeMap::new();
        let mut drifted: Vec<&str> = Vec::new();

        for (i, column) in FEATURE_COLUMNS.iter().enumerate() {
            let Some(expected) = reference.column(column) else {
                continue;
            };
            if expected.is_empty() {
                continue;
            }

            let observed: Vec<f64> = live.iter().map(|v| v.values()[i]).collect();
            let ks = ks_2samp(expected, &observed);
            let drift = ks.p_value < self.alpha;
            if drift {
                drifted.push(column);
            }

            debug!(
                column,
                ks_stat = ks.statistic,
                p_value = ks.p_value,
                drift,
                "KS comparison"
            );
            features.insert(
                column.to_string(),
                FeatureDrift {
                    ks_stat: ks.statistic,
                    p_value: ks.p_value,
                    drift,
                },
            );
        }

        if features.is_empty() {
            return DriftReport::without_features("no comparable feature columns");
        }

        let details = if drifted.is_empty() {
            format!("no drift detected across {} features", features.len())
        } else {
            format!(
                "drift detected in {} of {} features: {}",
                drifted.len(),
                features.len(),
                drifted.join(", ")
            )
        };

        DriftReport {
            drift: !drifted.is_empty(),
            details,
            features: Some(features),
        }
    }

    /// Reads the ledger, compares, and logs the outcome to `sink`.
    ///
    /// An unreadable ledger degrades to the insufficient-data report.
    pub fn check(
        &self,
        ledger: &DriftLedger,
        reference: Option<&ReferenceSnapshot>,
        sink: &dyn ExperimentSink,
    ) -> DriftReport {
        let live = match ledger.read_all() {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Drift ledger unreadable; reporting insufficient data");
                Vec::new()
            }
        };

        let report = self.compare(reference, &live);

        if let Some(features) = &report.features {
            let mut run = Run::start(sink, DRIFT_RUN_NAME);
            run.log_param("alpha", self.alpha)
                .log_param("live_rows", live.len())
                .log_metric("drift", f64::from(u8::from(report.drift)));
            for (column, f) in features {
                run.log_metric(format!("{column}_ks_stat"), f.ks_stat)
                    .log_metric(format!("{column}_p_value"), f.p_value)
                    .log_metric(format!("{column}_drift"), f64::from(u8::from(f.drift)));
            }
            if let Ok(dict) = serde_json::to_value(&report) {
                run.log_dict("drift_report", dict);
            }
            run.finish();
        }

        info!(
            drift = report.drift,
            live_rows = live.len(),
            details = %report.details,
            "Drift check complete"
        );
        report
    }
}

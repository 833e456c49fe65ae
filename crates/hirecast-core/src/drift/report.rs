use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::INSUFFICIENT_DATA;

/// Per-column KS outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    pub ks_stat: f64,
    pub p_value: f64,
    pub drift: bool,
}

/// Result of one drift check. Recomputed on every query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub drift: bool,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, FeatureDrift>>,
}

impl DriftReport {
    pub fn insufficient_data() -> Self {
        Self::without_features(INSUFFICIENT_DATA)
    }

    pub fn without_features(details: impl Into<String>) -> Self {
        Self {
            drift: false,
            details: details.into(),
            features: None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.features.is_none()
    }

    /// Columns flagged as drifted, in key order.
    pub fn drifted_columns(&self) -> Vec<&str> {
        self.features
            .iter()
            .flatten()
            .filter(|(_, f)| f.drift)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

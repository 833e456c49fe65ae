use serde::{Deserialize, Serialize};

use crate::constants::{FEATURE_COLUMNS, FEATURE_COUNT};
use crate::encoding::CategoricalField;

use super::error::FeatureError;

/// The classifier input, in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Assembles a vector from the match score and the four categorical codes
    /// (in [`CategoricalField::ALL`] order).
    pub fn from_parts(match_score: f64, codes: [u32; 4]) -> Self {
        Self([
            match_score,
            f64::from(codes[0]),
            f64::from(codes[1]),
            f64::from(codes[2]),
            f64::from(codes[3]),
        ])
    }

    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Checks width and finiteness of externally supplied values.
    pub fn from_slice(values: &[f64]) -> Result<Self, FeatureError> {
        let values: [f64; FEATURE_COUNT] =
            values
                .try_into()
                .map_err(|_| FeatureError::WrongWidth {
                    expected: FEATURE_COUNT,
                    actual: values.len(),
                })?;

        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(FeatureError::NonFinite {
                column: FEATURE_COLUMNS[i],
            });
        }

        Ok(Self(values))
    }

    pub fn match_score(&self) -> f64 {
        self.0[0]
    }

    pub fn code(&self, field: CategoricalField) -> f64 {
        self.0[field.ordinal() + 1]
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Value of the named column, if it is part of the schema.
    pub fn get(&self, column: &str) -> Option<f64> {
        crate::constants::column_index(column).map(|i| self.0[i])
    }

    /// Pairs each value with its column name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }
}

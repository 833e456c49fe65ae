use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::FEATURE_COLUMNS;
use crate::features::FeatureVector;
use crate::tabular;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference snapshot not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read reference snapshot {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("reference snapshot {path} has no feature columns")]
    NoFeatureColumns { path: PathBuf },
}

/// Frozen training-time feature values, per schema column.
///
/// Only columns named in [`FEATURE_COLUMNS`] are kept; non-numeric cells are
/// dropped column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSnapshot {
    columns: Vec<(&'static str, Vec<f64>)>,
}

impl ReferenceSnapshot {
    /// Keeps the schema columns among `columns`, in schema order.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: AsRef<str>,
    {
        let mut provided: Vec<(String, Vec<f64>)> = columns
            .into_iter()
            .map(|(name, values)| (name.as_ref().to_string(), values))
            .collect();

        let columns = FEATURE_COLUMNS
            .iter()
            .filter_map(|schema| {
                let pos = provided.iter().position(|(name, _)| name == schema)?;
                let (_, values) = provided.swap_remove(pos);
                Some((*schema, values))
            })
            .collect();

        Self { columns }
    }

    /// Full-schema snapshot from vectors.
    pub fn from_rows(rows: &[FeatureVector]) -> Self {
        Self::from_columns(
            FEATURE_COLUMNS
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let values: Vec<f64> = rows.iter().map(|r| r.values()[i]).collect();
                    (*name, values)
                }),
        )
    }

    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReferenceError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ReferenceError::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        let Some(table) = tabular::parse(&text) else {
            return Err(ReferenceError::NoFeatureColumns {
                path: path.to_path_buf(),
            });
        };

        let columns: Vec<(&str, Vec<f64>)> = FEATURE_COLUMNS
            .iter()
            .filter_map(|name| {
                let idx = table.column(name)?;
                let values: Vec<f64> = table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx).and_then(|c| tabular::parse_number(c)))
                    .collect();
                if values.len() < table.rows.len() {
                    warn!(
                        column = *name,
                        dropped = table.rows.len() - values.len(),
                        "Dropped non-numeric reference cells"
                    );
                }
                Some((*name, values))
            })
            .collect();

        if columns.is_empty() {
            return Err(ReferenceError::NoFeatureColumns {
                path: path.to_path_buf(),
            });
        }

        let snapshot = Self::from_columns(columns);
        debug!(
            path = %path.display(),
            columns = snapshot.columns.len(),
            rows = table.rows.len(),
            "Loaded reference snapshot"
        );
        Ok(snapshot)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Column names present, in schema order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(n, _)| *n)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|(_, v)| v.is_empty())
    }
}

//! Append-only drift ledger.
//!
//! Every feature vector built at inference time is appended as one CSV row with
//! the [`FEATURE_COLUMNS`] header, whatever happens to the prediction afterwards.
//! The file is created on first write and is never pruned or rewritten here.
//!
//! # Write Discipline
//!
//! Each append opens the file in append mode, writes the row (and the header when
//! the file is empty) with a single `write_all`, syncs, and closes. Appends within
//! the process are serialised by a mutex so rows never interleave. Rows from
//! concurrent requests land in arbitrary relative order. A file that ends without
//! a newline is terminated first, so a torn row never merges with the next one.
//!
//! # Read Policy
//!
//! A missing file, an empty file or a header that does not match the schema reads
//! as an empty ledger. Rows that fail to parse (for example a torn trailing write)
//! are skipped. Only an I/O failure on an existing file is an error.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::StorageError;

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::constants::{FEATURE_COLUMNS, FEATURE_COUNT};
use crate::features::FeatureVector;
use crate::tabular;

#[derive(Debug)]
pub struct DriftLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DriftLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably appends one row.
    pub fn append(&self, vector: &FeatureVector) -> Result<(), StorageError> {
        let write_failed = |e: std::io::Error| StorageError::WriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        let _guard = self.write_lock.lock();

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(write_failed)?;

        let mut buf = String::new();
        let len = file.metadata().map_err(write_failed)?.len();
        if len == 0 {
            buf.push_str(&FEATURE_COLUMNS.join(","));
            buf.push('\n');
        } else if !ends_with_newline(&mut file, len).map_err(write_failed)? {
            // Isolate a torn trailing row so it is skipped on read.
            warn!(path = %self.path.display(), "Drift ledger ends mid-row; terminating it");
            buf.push('\n');
        }
        buf.push_str(&tabular::format_row(vector.values()));

        file.write_all(buf.as_bytes()).map_err(write_failed)?;
        file.sync_data().map_err(write_failed)?;

        debug!(path = %self.path.display(), "Appended feature row to drift ledger");
        Ok(())
    }

    /// All rows in append order.
    pub fn read_all(&self) -> Result<Vec<FeatureVector>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Unavailable {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
        };

        let Some(table) = tabular::parse(&text) else {
            return Ok(Vec::new());
        };

        if table.header != FEATURE_COLUMNS {
            warn!(
                path = %self.path.display(),
                header = ?table.header,
                "Drift ledger header does not match feature schema; treating as empty"
            );
            return Ok(Vec::new());
        }

        let mut skipped = 0usize;
        let rows: Vec<FeatureVector> = table
            .rows
            .iter()
            .filter_map(|cells| {
                let row = parse_row(cells);
                if row.is_none() {
                    skipped += 1;
                }
                row
            })
            .collect();

        if skipped > 0 {
            warn!(
                path = %self.path.display(),
                skipped,
                kept = rows.len(),
                "Skipped malformed drift ledger rows"
            );
        }

        Ok(rows)
    }

    /// Number of readable rows.
    pub fn row_count(&self) -> Result<usize, StorageError> {
        Ok(self.read_all()?.len())
    }

    /// `true` if the ledger can be created or appended to at its path.
    pub fn location_ready(&self) -> bool {
        if self.path.is_dir() {
            return false;
        }
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => !parent.exists() || parent.is_dir(),
            _ => true,
        }
    }
}

fn ends_with_newline(file: &mut fs::File, len: u64) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn parse_row(cells: &[String]) -> Option<FeatureVector> {
    if cells.len() != FEATURE_COUNT {
        return None;
    }
    let values: Vec<f64> = cells
        .iter()
        .map(|c| tabular::parse_number(c))
        .collect::<Option<_>>()?;
    FeatureVector::from_slice(&values).ok()
}

//! Input drift detection against the training reference.
//!
//! For every schema column present in the reference snapshot, the live ledger
//! values are compared with a two-sample Kolmogorov–Smirnov test; a column drifts
//! when its p-value falls below `alpha` (default `0.05`), and the report drifts
//! when any column does.
//!
//! # Degraded States
//!
//! No reference snapshot, an empty reference, an empty ledger or an unreadable
//! ledger all produce `{drift: false, details: "insufficient data"}`. This is the
//! normal state before traffic accumulates, and it also hides a missing reference
//! file; operators should watch the `/ready` reference status.

mod detector;
pub mod ks;
mod reference;
mod report;

#[cfg(test)]
mod tests;

pub use detector::DriftDetector;
pub use ks::{KsResult, ks_2samp};
pub use reference::{ReferenceError, ReferenceSnapshot};
pub use report::{DriftReport, FeatureDrift};

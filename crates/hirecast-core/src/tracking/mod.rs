//! Fire-and-forget experiment tracking.
//!
//! A [`Run`] buffers params, metrics and dicts under a run name and hands the
//! finished [`RunRecord`] to an [`ExperimentSink`] when it is finished or dropped.
//! Sinks never report errors back to the caller.

mod mlflow;
#[cfg(any(test, feature = "mock"))]
mod mock;


pub use mlflow::MlflowSink;
#[cfg(any(test, feature = "mock"))]
pub use mock::RecordingSink;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

/// Everything logged under one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub params: Vec<(String, String)>,
    pub metrics: Vec<(String, f64)>,
    pub dicts: Vec<(String, Value)>,
}

impl RunRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started_at: Utc::now(),
            params: Vec::new(),
            metrics: Vec::new(),
            dicts: Vec::new(),
        }
    }

    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn dict(&self, key: &str) -> Option<&Value> {
        self.dicts.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Destination for finished runs. Must tolerate concurrent submitters.
pub trait ExperimentSink: Send + Sync {
    fn submit(&self, run: RunRecord);
}

/// An open run; submitted to its sink on [`finish`](Run::finish) or drop.
pub struct Run<'a> {
    sink: &'a dyn ExperimentSink,
    record: Option<RunRecord>,
}

impl<'a> Run<'a> {
    pub fn start(sink: &'a dyn ExperimentSink, name: impl Into<String>) -> Self {
        Self {
            sink,
            record: Some(RunRecord::new(name)),
        }
    }

    pub fn log_param(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        if let Some(record) = self.record.as_mut() {
            record.params.push((key.into(), value.to_string()));
        }
        self
    }

    pub fn log_metric(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        if let Some(record) = self.record.as_mut() {
            record.metrics.push((key.into(), value));
        }
        self
    }

    pub fn log_dict(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        if let Some(record) = self.record.as_mut() {
            record.dicts.push((key.into(), value));
        }
        self
    }

    pub fn finish(mut self) {
        self.submit();
    }

    fn submit(&mut self) {
        if let Some(record) = self.record.take() {
            self.sink.submit(record);
        }
    }
}

impl Drop for Run<'_> {
    fn drop(&mut self) {
        self.submit();
    }
}

/// Emits each run as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ExperimentSink for TracingSink {
    fn submit(&self, run: RunRecord) {
        info!(
            target: "hirecast::tracking",
            run = %run.name,
            started_at = %run.started_at.to_rfc3339(),
            params = ?run.params,
            metrics = ?run.metrics,
            dicts = run.dicts.len(),
            "Experiment run"
        );
    }
}

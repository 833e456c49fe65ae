use parking_lot::Mutex;

use super::{ExperimentSink, RunRecord};

/// Keeps submitted runs in memory for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    runs: Mutex<Vec<RunRecord>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> Vec<RunRecord> {
        self.runs.lock().clone()
    }

    pub fn runs_named(&self, name: &str) -> Vec<RunRecord> {
        self.runs
            .lock()
            .iter()
            .filter(|r| r.name == name)
            .cloned()
            .collect()
    }
}

impl ExperimentSink for RecordingSink {
    fn submit(&self, run: RunRecord) {
        self.runs.lock().push(run);
    }
}

//! MLflow REST tracking client.
//!
//! Each submitted run becomes `runs/create` → `runs/log-batch` → `runs/update`,
//! shipped from a spawned task. Dicts are stored as JSON-encoded tags. Failures
//! are logged and dropped.

use std::time::Duration;

use chrono::Utc;
use serde_json::{Value, json};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::{ExperimentSink, RunRecord};

const API_PREFIX: &str = "api/2.0/mlflow";
const REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct MlflowSink {
    client: reqwest::Client,
    base_url: String,
    experiment_id: String,
    runtime: Option<Handle>,
}

impl MlflowSink {
    /// Builds a sink bound to the current tokio runtime, if any. Fails when the
    /// HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        experiment_id: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            experiment_id: experiment_id.into(),
            runtime: Handle::try_current().ok(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, method)
    }

    async fn ship(&self, run: RunRecord) -> Result<(), reqwest::Error> {
        let created: Value = self
            .client
            .post(self.endpoint("runs/create"))
            .json(&create_body(&self.experiment_id, &run))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(run_id) = created
            .pointer("/run/info/run_id")
            .and_then(Value::as_str)
            .map(str::to_string)
        else {
            warn!(run = %run.name, "MLflow runs/create response carried no run_id");
            return Ok(());
        };

        self.client
            .post(self.endpoint("runs/log-batch"))
            .json(&batch_body(&run_id, &run))
            .send()
            .await?
            .error_for_status()?;

        self.client
            .post(self.endpoint("runs/update"))
            .json(&json!({
                "run_id": run_id,
                "status": "FINISHED",
                "end_time": Utc::now().timestamp_millis(),
            }))
            .send()
            .await?
            .error_for_status()?;

        debug!(run = %run.name, run_id = %run_id, "Shipped run to MLflow");
        Ok(())
    }
}

impl ExperimentSink for MlflowSink {
    fn submit(&self, run: RunRecord) {
        let Some(runtime) = &self.runtime else {
            warn!(run = %run.name, "No tokio runtime available; dropping MLflow run");
            return;
        };

        let sink = self.clone();
        runtime.spawn(async move {
            let name = run.name.clone();
            if let Err(e) = sink.ship(run).await {
                warn!(run = %name, error = %e, "Failed to ship run to MLflow");
            }
        });
    }
}

pub(crate) fn create_body(experiment_id: &str, run: &RunRecord) -> Value {
    json!({
        "experiment_id": experiment_id,
        "run_name": run.name,
        "start_time": run.started_at.timestamp_millis(),
        "tags": [{ "key": "mlflow.runName", "value": run.name }],
    })
}

pub(crate) fn batch_body(run_id: &str, run: &RunRecord) -> Value {
    let timestamp = run.started_at.timestamp_millis();

    let metrics: Vec<Value> = run
        .metrics
        .iter()
        .filter(|(_, v)| v.is_finite())
        .map(|(k, v)| json!({ "key": k, "value": v, "timestamp": timestamp, "step": 0 }))
        .collect();
    let params: Vec<Value> = run
        .params
        .iter()
        .map(|(k, v)| json!({ "key": k, "value": v }))
        .collect();
    let tags: Vec<Value> = run
        .dicts
        .iter()
        .map(|(k, v)| json!({ "key": k, "value": v.to_string() }))
        .collect();

    json!({
        "run_id": run_id,
        "metrics": metrics,
        "params": params,
        "tags": tags,
    })
}

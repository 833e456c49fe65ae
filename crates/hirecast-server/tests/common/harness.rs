//! Test server harness.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use hirecast::encoding::{CategoricalEncoder, LabelEncoder};
use hirecast::{
    DriftLedger, EncoderSet, RecordingSink, ReferenceSnapshot, ServingContext, StubClassifier,
    StubVectorizer,
};
use hirecast_server::gateway::{HandlerState, create_router_with_state};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct TestServerConfig {
    pub label: u8,
    pub probability: Option<f64>,
    pub reference: Option<ReferenceSnapshot>,
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub ledger_path: PathBuf,
    pub sink: Arc<RecordingSink>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ledger(&self) -> DriftLedger {
        DriftLedger::new(&self.ledger_path)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn encoder(classes: &[&str]) -> Arc<dyn CategoricalEncoder> {
    Arc::new(LabelEncoder::from_classes(classes.iter().copied()).unwrap())
}

pub async fn spawn_test_server(config: TestServerConfig) -> anyhow::Result<TestServer> {
    let temp_dir = TempDir::new()?;
    let ledger_path = temp_dir.path().join("logged_features.csv");
    let sink = Arc::new(RecordingSink::new());

    let encoders = EncoderSet::new(
        encoder(&["junior", "pleno", "senior"]),
        encoder(&["avancado", "basico"]),
        encoder(&["basico", "intermediario"]),
        encoder(&["graduado", "mestre"]),
    );
    let context = ServingContext::builder(
        Arc::new(StubVectorizer::new()),
        encoders,
        Arc::new(StubClassifier::new(config.label, config.probability)),
    )
    .reference(config.reference)
    .ledger(DriftLedger::new(&ledger_path))
    .sink(sink.clone())
    .build();

    let app = create_router_with_state(HandlerState::from(context));
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(TestServer {
        addr,
        ledger_path,
        sink,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        _temp_dir: temp_dir,
    })
}

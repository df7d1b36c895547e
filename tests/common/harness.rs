//! Test server harness.

use newsrel::cache::AliasEmbeddingCache;
use newsrel::embedding::{
    MockEmbedder, MockSentimentAnalyzer, SentenceEmbedder, SentimentAnalyzer, SentimentClassifier,
    TextEmbedder,
};
use newsrel::gateway::{AppState, create_router_with_state};
use newsrel::scoring::{RelevanceScorer, ScoringConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub scoring: ScoringConfig,
    /// `None` makes every sentiment call fail.
    pub sentiment_score: Option<f32>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            scoring: ScoringConfig::default(),
            sentiment_score: Some(0.99),
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub embedder: Option<Arc<MockEmbedder>>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server backed by [`MockEmbedder`] and [`MockSentimentAnalyzer`].
///
/// The mock embedder gives every word its own axis, so similarities are exact
/// functions of word overlap. The embedder handle is returned on the server so tests
/// can inspect call counts or inject failures.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let embedder = Arc::new(MockEmbedder::new());
    let sentiment = match config.sentiment_score {
        Some(score) => MockSentimentAnalyzer::positive(score),
        None => MockSentimentAnalyzer::failing(),
    };

    let mut server = spawn_with_models(
        config.port,
        Arc::clone(&embedder),
        Arc::new(sentiment),
        config.scoring,
    )
    .await?;
    server.embedder = Some(embedder);
    Ok(server)
}

/// Spawns a server with the production model types in stub mode (feature-hashed
/// embeddings, lexicon sentiment). Exercises the same wiring as the binary.
pub async fn spawn_stub_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let embedder = SentenceEmbedder::stub()
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let sentiment = SentimentClassifier::stub()
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    spawn_with_models(
        config.port,
        Arc::new(embedder),
        Arc::new(sentiment),
        config.scoring,
    )
    .await
}

async fn spawn_with_models<E, S>(
    port: u16,
    embedder: Arc<E>,
    sentiment: Arc<S>,
    scoring: ScoringConfig,
) -> Result<TestServer, ServerStartupError>
where
    E: TextEmbedder + 'static,
    S: SentimentAnalyzer + 'static,
{
    let port = if port == 0 {
        find_available_port().await?
    } else {
        port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let cache = Arc::new(AliasEmbeddingCache::new(embedder));
    let scorer = Arc::new(RelevanceScorer::new(cache, sentiment, scoring));
    let app = create_router_with_state(AppState::new(scorer));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        embedder: None,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

//! Newsrel HTTP server entrypoint.

use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use newsrel::cache::AliasEmbeddingCache;
use newsrel::config::Config;
use newsrel::embedding::{SentenceEmbedder, SentimentAnalyzer, SentimentClassifier, TextEmbedder};
use newsrel::gateway::{AppState, create_router_with_state};
use newsrel::scoring::RelevanceScorer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr = config.socket_addr();

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        relevance_threshold = config.relevance_threshold,
        require_literal_mention = config.require_literal_mention,
        "Newsrel starting"
    );

    if config.embedding_model_path.is_none() {
        tracing::warn!("No NEWSREL_EMBEDDING_MODEL_PATH configured, running embedder in stub mode");
    }
    let embedder = Arc::new(SentenceEmbedder::load(config.embedder_config())?);

    if config.sentiment_model_path.is_none() {
        tracing::warn!("No NEWSREL_SENTIMENT_MODEL_PATH configured, running sentiment in stub mode");
    }
    let sentiment = Arc::new(SentimentClassifier::load(config.sentiment_config())?);

    tracing::info!(
        embedding_dim = embedder.embedding_dim(),
        embedder_stub = embedder.is_stub(),
        sentiment_stub = sentiment.is_stub(),
        "Models loaded"
    );

    let cache = Arc::new(AliasEmbeddingCache::new(embedder));
    let scorer = Arc::new(RelevanceScorer::new(
        cache,
        sentiment,
        config.scoring_config(),
    ));

    let app = create_router_with_state(AppState::new(scorer));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Newsrel shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var(Config::ENV_PORT)
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(Config::default().port);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

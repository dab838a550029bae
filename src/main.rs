//! Offline mood engine binary entrypoint.
//! Boots the Axum HTTP server: classifier, seeded document store, retrieval
//! orchestrator, and the Prometheus `/metrics` route.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use offline_mood_engine::api::{self, AppState};
use offline_mood_engine::metrics::Metrics;
use offline_mood_engine::retrieval::{ContextRetriever, InMemoryStore, RetrievalConfig};
use offline_mood_engine::MoodClassifier;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CORPUS_PATH: &str = "config/corpus.json";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let metrics = Metrics::init()?;

    let corpus_path = std::env::var("CORPUS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CORPUS_PATH));
    let store = if corpus_path.exists() {
        InMemoryStore::load_corpus_from(&corpus_path)?
    } else {
        tracing::warn!(path = %corpus_path.display(), "corpus not found, starting with an empty store");
        InMemoryStore::new()
    };

    let config = RetrievalConfig::load_default()?;
    tracing::info!(ranking = ?config.ranking, max_results = config.max_results, "retrieval configured");
    let retriever = ContextRetriever::with_config(Arc::new(store), config);

    // Force lexicon compilation at startup rather than on the first request.
    let classifier = MoodClassifier::new();
    tracing::info!(entries = classifier.lexicon().entries().len(), "lexicon loaded");

    let state = AppState::new(classifier, retriever);
    let app = api::router(state).merge(metrics.router());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

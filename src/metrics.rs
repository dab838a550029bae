// src/metrics.rs
//! Prometheus exposition for the classifier and retrieval counters.

use axum::{extract::State, routing::get, Router};
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Every counter the crate emits. Registered at zero on [`Metrics::init`] so a scrape
/// before the first request already lists them.
pub const COUNTERS: [&str; 5] = [
    "mood_classify_total",
    "mood_crisis_total",
    "retrieval_queries_total",
    "retrieval_empty_total",
    "retrieval_store_errors_total",
];

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and register the crate's counters.
    /// Call once per process.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
        register_counters();
        Ok(Self { handle })
    }

    /// `GET /metrics` in the Prometheus text format.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(render))
            .with_state(self.handle.clone())
    }
}

fn register_counters() {
    crate::mood::ensure_metrics_described();
    crate::retrieval::ensure_metrics_described();
    for name in COUNTERS {
        counter!(name).increment(0);
    }
}

async fn render(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

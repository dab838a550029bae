// src/api.rs
//! HTTP surface for the local app shell. Thin wrappers over the classifier and the
//! retrieval orchestrator; no business logic lives here.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::mood::{MoodClassifier, MoodResult};
use crate::retrieval::ContextRetriever;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<MoodClassifier>,
    pub retriever: Arc<ContextRetriever>,
}

impl AppState {
    pub fn new(classifier: MoodClassifier, retriever: ContextRetriever) -> Self {
        Self {
            classifier: Arc::new(classifier),
            retriever: Arc::new(retriever),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/classify", post(classify))
        .route("/crisis", post(crisis))
        .route("/context", post(context))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct TextReq {
    text: String,
}

#[derive(serde::Deserialize)]
struct ContextReq {
    query: String,
}

#[derive(serde::Serialize)]
struct CrisisResp {
    crisis: bool,
}

#[derive(serde::Serialize)]
struct ContextResp {
    context: String,
}

async fn classify(State(state): State<AppState>, Json(body): Json<TextReq>) -> Json<MoodResult> {
    Json(state.classifier.classify(&body.text))
}

async fn crisis(State(state): State<AppState>, Json(body): Json<TextReq>) -> Json<CrisisResp> {
    Json(CrisisResp {
        crisis: state.classifier.is_crisis(&body.text),
    })
}

async fn context(State(state): State<AppState>, Json(body): Json<ContextReq>) -> Json<ContextResp> {
    Json(ContextResp {
        context: state.retriever.get_context(&body.query).await,
    })
}

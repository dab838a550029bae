// src/devlog.rs
//! Per-call dev events for the classifier and the retrieval path.
//!
//! User text here is personal (mood, distress) and is never logged. Events carry an
//! anonymous message id instead: a short SHA-256 prefix of the light-normalized text, so
//! "Je suis triste" and "je suis  TRISTE !" correlate while the content stays out of logs.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use tracing::info;

use crate::mood::MoodResult;
use crate::retrieval::{Document, RankingMode};
use crate::text::normalize_light;

pub const ENV_DEV_LOG: &str = "MOOD_DEV_LOG";
pub const ENV_APP_ENV: &str = "APP_ENV";

/// Hex chars kept from the digest.
const ID_LEN: usize = 12;

fn flag_on(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

fn dev_env(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("local" | "development" | "dev")
    )
}

/// MOOD_DEV_LOG set AND a dev context (debug build, or APP_ENV local/development/dev).
pub fn dev_logging_enabled() -> bool {
    if !flag_on(std::env::var(ENV_DEV_LOG).ok().as_deref()) {
        return false;
    }
    cfg!(debug_assertions) || dev_env(std::env::var(ENV_APP_ENV).ok().as_deref())
}

/// Anonymous id of a message.
pub fn anon_id(text: &str) -> String {
    let digest = Sha256::digest(normalize_light(text).as_bytes());
    let mut out = String::with_capacity(ID_LEN);
    for b in digest.iter().take(ID_LEN / 2) {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

pub fn log_classification(text: &str, aggregate_score: f32, result: &MoodResult) {
    if !dev_logging_enabled() {
        return;
    }
    let emotions: Vec<String> = result
        .emotions
        .iter()
        .map(|e| format!("{}={:.1}", e.label, e.score))
        .collect();
    info!(
        target: "mood",
        id = %anon_id(text),
        aggregate = aggregate_score,
        mood = %result.mood,
        confidence = result.confidence,
        crisis = result.is_crisis(),
        ?emotions,
        "classified"
    );
}

/// Document ids only; passages are public but the query is not.
pub fn log_retrieval(query: &str, ranking: RankingMode, docs: &[Document]) {
    if !dev_logging_enabled() {
        return;
    }
    let ids: Vec<i64> = docs.iter().map(|d| d.id).collect();
    info!(target: "retrieval", id = %anon_id(query), ?ranking, ?ids, "context lookup");
}

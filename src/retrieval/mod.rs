// src/retrieval/mod.rs
//! Retrieval orchestrator: user query → formatted reference-text context.
//!
//! Default path (substring ranking):
//! 1) keywords via [`extract_keywords`], first `max_keywords` only
//! 2) one `search_by_substring` lookup per keyword
//! 3) concatenate, dedup by id (first occurrence wins), keep `max_results`
//! 4) header + citations joined by blank lines, or `""` when nothing matched
//!
//! Context is an optional enrichment: a failing store is logged and counted, and the
//! caller gets `""` so the response can proceed without it.

pub mod config;
pub mod store;
pub mod types;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use crate::devlog::log_retrieval;
use crate::rank::similarity::{format_citation, rank_documents};
use crate::text::extract_keywords;

pub use config::{RankingMode, RetrievalConfig};
pub use store::InMemoryStore;
pub use types::{Document, DocumentStore, NewDocument};

pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("retrieval_queries_total", "Context lookups requested.");
        describe_counter!(
            "retrieval_empty_total",
            "Context lookups that produced no passages."
        );
        describe_counter!(
            "retrieval_store_errors_total",
            "Document store failures swallowed by the orchestrator."
        );
    });
}

/// Keep the first occurrence of every id, preserving order.
pub fn dedup_by_id(docs: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    docs.into_iter().filter(|d| seen.insert(d.id)).collect()
}

#[derive(Clone)]
pub struct ContextRetriever {
    store: Arc<dyn DocumentStore>,
    config: RetrievalConfig,
}

impl ContextRetriever {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(store, RetrievalConfig::default())
    }

    pub fn with_config(store: Arc<dyn DocumentStore>, config: RetrievalConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Formatted context for `query`, or `""` if nothing relevant (or the store failed).
    pub async fn get_context(&self, query: &str) -> String {
        ensure_metrics_described();
        counter!("retrieval_queries_total").increment(1);

        let docs = match self.find_documents(query).await {
            Ok(d) => d,
            Err(e) => {
                warn!(target: "retrieval", error = ?e, store = self.store.name(), "document store error");
                counter!("retrieval_store_errors_total").increment(1);
                return String::new();
            }
        };

        log_retrieval(query, self.config.ranking, &docs);
        if docs.is_empty() {
            counter!("retrieval_empty_total").increment(1);
            return String::new();
        }
        self.format_context(&docs)
    }

    /// Relevant documents for `query` under the configured ranking, at most `max_results`.
    pub async fn find_documents(&self, query: &str) -> anyhow::Result<Vec<Document>> {
        let keywords = extract_keywords(query);
        if keywords.is_empty() {
            return Ok(Vec::new());
        }
        match self.config.ranking {
            RankingMode::Substring => self.substring_lookup(&keywords).await,
            RankingMode::Tfidf => {
                let corpus = self.store.all_documents().await?;
                Ok(rank_documents(query, &corpus, self.config.max_results)
                    .into_iter()
                    .map(|r| r.document)
                    .collect())
            }
        }
    }

    async fn substring_lookup(&self, keywords: &[String]) -> anyhow::Result<Vec<Document>> {
        let mut all = Vec::new();
        for kw in keywords.iter().take(self.config.max_keywords) {
            let mut hits = self.store.search_by_substring(kw).await?;
            all.append(&mut hits);
        }
        let mut docs = dedup_by_id(all);
        docs.truncate(self.config.max_results);
        Ok(docs)
    }

    fn format_context(&self, docs: &[Document]) -> String {
        let body = docs
            .iter()
            .map(format_citation)
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{}\n\n{}", self.config.header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64) -> Document {
        Document {
            id,
            source: "bible".into(),
            book: "Jean".into(),
            chapter: Some(14),
            verse: Some(27),
            content: format!("passage {id}"),
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let out = dedup_by_id(vec![doc(3), doc(1), doc(3), doc(2), doc(1)]);
        let ids: Vec<i64> = out.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn empty_query_skips_store() {
        let r = ContextRetriever::new(Arc::new(InMemoryStore::new()));
        assert_eq!(r.get_context("").await, "");
        assert_eq!(r.get_context("le la et").await, "");
    }

    #[tokio::test]
    async fn formats_header_and_citations() {
        let store = InMemoryStore::new();
        store.insert(NewDocument {
            source: "bible".into(),
            book: "Jean".into(),
            chapter: Some(14),
            verse: Some(27),
            content: "Je vous laisse la paix.".into(),
        });
        let r = ContextRetriever::new(Arc::new(store));
        let ctx = r.get_context("Je cherche la paix").await;
        assert_eq!(
            ctx,
            format!(
                "{}\n\n[bible - Jean 14:27] Je vous laisse la paix.",
                config::DEFAULT_HEADER
            )
        );
    }
}

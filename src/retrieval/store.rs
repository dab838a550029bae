// src/retrieval/store.rs
//! In-memory document store: the storage collaborator used by the binary and tests.
//!
//! Holds the seeded corpus behind an `RwLock`; ids are assigned sequentially on insert.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use super::types::{Document, DocumentStore, NewDocument};
use crate::text::normalize_light;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    docs: Vec<Document>,
    next_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a JSON array of `NewDocument`.
    pub fn load_corpus_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading corpus from {}", path.display()))?;
        let docs: Vec<NewDocument> = serde_json::from_str(&content)
            .with_context(|| format!("parsing corpus {}", path.display()))?;
        let store = Self::new();
        let n = store.bulk_import(docs);
        tracing::info!(target: "retrieval", documents = n, path = %path.display(), "corpus loaded");
        Ok(store)
    }

    /// Store a document and return it with its assigned id.
    pub fn insert(&self, doc: NewDocument) -> Document {
        let mut st = self.inner.write().expect("store rwlock poisoned");
        st.next_id += 1;
        let stored = doc.with_id(st.next_id);
        st.docs.push(stored.clone());
        stored
    }

    pub fn bulk_import(&self, docs: Vec<NewDocument>) -> usize {
        let mut st = self.inner.write().expect("store rwlock poisoned");
        let n = docs.len();
        for d in docs {
            st.next_id += 1;
            let id = st.next_id;
            st.docs.push(d.with_id(id));
        }
        n
    }

    /// Category lookup: every document of one source (case-insensitive).
    pub fn search_by_source(&self, source: &str) -> Vec<Document> {
        let st = self.inner.read().expect("store rwlock poisoned");
        st.docs
            .iter()
            .filter(|d| d.source.eq_ignore_ascii_case(source))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("store rwlock poisoned").docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn search_by_substring(&self, keyword: &str) -> Result<Vec<Document>> {
        let needle = normalize_light(keyword);
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let st = self.inner.read().expect("store rwlock poisoned");
        Ok(st
            .docs
            .iter()
            .filter(|d| {
                normalize_light(&d.content).contains(&needle)
                    || normalize_light(&d.book).contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn all_documents(&self) -> Result<Vec<Document>> {
        Ok(self.inner.read().expect("store rwlock poisoned").docs.clone())
    }

    fn name(&self) -> &'static str {
        "InMemoryStore"
    }
}

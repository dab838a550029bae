// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod devlog;
pub mod metrics;
pub mod mood;
pub mod rank;
pub mod retrieval;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::mood::{classify, is_crisis, MoodClassifier, MoodLevel, MoodResult};
pub use crate::rank::{compute_idf, compute_tfidf, cosine_similarity};
pub use crate::retrieval::{ContextRetriever, Document, DocumentStore, InMemoryStore};
pub use crate::text::extract_keywords;

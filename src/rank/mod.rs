// src/rank/mod.rs
//! Ranking primitives: TF-IDF weighting and cosine similarity. Pure, storage-free.

pub mod similarity;
pub mod tfidf;

pub use similarity::{cosine_similarity, format_citation, rank_documents, top_citations, Ranked};
pub use tfidf::{
    compute_idf, compute_tfidf, document_frequency, idf, term_frequency, IdfTable, TfIdfVector,
};

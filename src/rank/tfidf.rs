// src/rank/tfidf.rs
//! Term frequency / inverse document frequency over small in-memory corpora.
//!
//! - `idf(t) = ln(N / (1 + df(t)))`, so an unseen term gets `ln(N)` and a term present in
//!   every document a small negative but finite value.
//! - In [`compute_tfidf`] a term missing from the IDF table weighs 0, not `ln(N)`. This
//!   differs from [`idf`]'s own default on purpose; callers rely on absent terms
//!   contributing nothing.
//!
//! Vectors are rebuilt per retrieval call; nothing here is cached.

use std::collections::{HashMap, HashSet};

pub type TermCounts = HashMap<String, usize>;
pub type IdfTable = HashMap<String, f32>;
pub type TfIdfVector = HashMap<String, f32>;

/// Raw term counts.
pub fn term_frequency<S: AsRef<str>>(tokens: &[S]) -> TermCounts {
    let mut tf = TermCounts::new();
    for t in tokens {
        *tf.entry(t.as_ref().to_string()).or_insert(0) += 1;
    }
    tf
}

/// Number of documents containing each term at least once.
pub fn document_frequency<S: AsRef<str>>(corpus: &[Vec<S>]) -> TermCounts {
    let mut df = TermCounts::new();
    for doc in corpus {
        let unique: HashSet<&str> = doc.iter().map(|t| t.as_ref()).collect();
        for term in unique {
            *df.entry(term.to_string()).or_insert(0) += 1;
        }
    }
    df
}

/// Smoothed IDF. An empty corpus (`n == 0`) yields 0 instead of `-inf`.
pub fn idf(term: &str, n: usize, df: &TermCounts) -> f32 {
    if n == 0 {
        return 0.0;
    }
    let d = df.get(term).copied().unwrap_or(0);
    (n as f32 / (1.0 + d as f32)).ln()
}

/// IDF for every term that occurs in `corpus`.
pub fn compute_idf<S: AsRef<str>>(corpus: &[Vec<S>]) -> IdfTable {
    let n = corpus.len();
    let df = document_frequency(corpus);
    df.keys()
        .map(|term| (term.clone(), idf(term, n, &df)))
        .collect()
}

/// `(count / total) * idf(term)`; terms absent from `idf_table` weigh 0.
pub fn compute_tfidf<S: AsRef<str>>(tokens: &[S], idf_table: &IdfTable) -> TfIdfVector {
    let total = tokens.len();
    if total == 0 {
        return TfIdfVector::new();
    }
    term_frequency(tokens)
        .into_iter()
        .map(|(term, count)| {
            let w = idf_table.get(&term).copied().unwrap_or(0.0);
            let weight = (count as f32 / total as f32) * w;
            (term, weight)
        })
        .collect()
}

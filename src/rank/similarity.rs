// src/rank/similarity.rs
//! Cosine similarity over sparse TF-IDF vectors and top-K document ranking.

use std::collections::HashSet;

use super::tfidf::{compute_idf, compute_tfidf, TfIdfVector};
use crate::retrieval::types::Document;
use crate::text::extract_keywords;

/// Cosine similarity in `[0, 1]`. Zero norms (empty or all-zero vectors) give 0.
pub fn cosine_similarity(a: &TfIdfVector, b: &TfIdfVector) -> f32 {
    let keys: HashSet<&String> = a.keys().chain(b.keys()).collect();

    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for k in keys {
        let x = a.get(k).copied().unwrap_or(0.0);
        let y = b.get(k).copied().unwrap_or(0.0);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    // smoothed idf can go slightly negative for ubiquitous terms
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

/// A document with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub document: Document,
    pub similarity: f32,
}

/// Rank `docs` against `query`: IDF over `docs`, TF-IDF for query and each document,
/// keep similarity > 0, descending (ties keep input order), top `k`.
pub fn rank_documents(query: &str, docs: &[Document], k: usize) -> Vec<Ranked> {
    let query_tokens = extract_keywords(query);
    if query_tokens.is_empty() || docs.is_empty() || k == 0 {
        return Vec::new();
    }

    let corpus: Vec<Vec<String>> = docs.iter().map(|d| extract_keywords(&d.content)).collect();
    let idf_table = compute_idf(&corpus);
    let query_vec = compute_tfidf(&query_tokens, &idf_table);

    let mut ranked: Vec<Ranked> = docs
        .iter()
        .zip(corpus.iter())
        .filter_map(|(doc, tokens)| {
            let similarity = cosine_similarity(&query_vec, &compute_tfidf(tokens, &idf_table));
            (similarity > 0.0).then(|| Ranked {
                document: doc.clone(),
                similarity,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    ranked.truncate(k);
    ranked
}

/// `[{source} - {book} {chapter}:{verse}] {content}`.
///
/// Missing chapter/verse are left out rather than printed as placeholders:
/// `[bible - Psaumes 23] …`, `[note - Journal] …`.
pub fn format_citation(doc: &Document) -> String {
    let reference = match (doc.chapter, doc.verse) {
        (Some(c), Some(v)) => format!("{} {}:{}", doc.book, c, v),
        (Some(c), None) => format!("{} {}", doc.book, c),
        _ => doc.book.clone(),
    };
    format!("[{} - {}] {}", doc.source, reference, doc.content)
}

/// Top `k` matches for `query`, formatted as citations.
pub fn top_citations(query: &str, docs: &[Document], k: usize) -> Vec<String> {
    rank_documents(query, docs, k)
        .iter()
        .map(|r| format_citation(&r.document))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_of(items: &[(&str, f32)]) -> TfIdfVector {
        items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn doc(id: i64, book: &str, content: &str) -> Document {
        Document {
            id,
            source: "bible".into(),
            book: book.into(),
            chapter: Some(1),
            verse: Some(id as u32),
            content: content.into(),
        }
    }

    #[test]
    fn identical_vectors_are_one() {
        let v = vec_of(&[("paix", 0.4), ("amour", 1.2)]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_and_disjoint_are_zero() {
        let v = vec_of(&[("paix", 0.4)]);
        let empty = TfIdfVector::new();
        assert_eq!(cosine_similarity(&empty, &v), 0.0);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
        assert_eq!(cosine_similarity(&v, &vec_of(&[("chemin", 0.9)])), 0.0);
        assert_eq!(cosine_similarity(&v, &vec_of(&[("paix", 0.0)])), 0.0);
    }

    #[test]
    fn partial_overlap_is_between_zero_and_one() {
        let a = vec_of(&[("paix", 1.0), ("amour", 1.0)]);
        let b = vec_of(&[("paix", 1.0), ("chemin", 1.0)]);
        let s = cosine_similarity(&a, &b);
        assert!((s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ranks_most_specific_document_first() {
        let docs = vec![
            doc(1, "Psaumes", "Le Seigneur est mon berger, je ne manquerai de rien."),
            doc(2, "Matthieu", "Heureux ceux qui procurent la paix, la paix du coeur."),
            doc(3, "Jean", "Je vous laisse la paix, je vous donne ma paix et ma lumière."),
        ];
        let ranked = rank_documents("berger", &docs, 3);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].document.id, 1);

        assert!(rank_documents("", &docs, 3).is_empty());
        assert!(rank_documents("berger", &docs, 0).is_empty());
    }

    #[test]
    fn citation_format() {
        let d = doc(16, "Jean", "Car Dieu a tant aimé le monde");
        assert_eq!(
            format_citation(&d),
            "[bible - Jean 1:16] Car Dieu a tant aimé le monde"
        );
        let mut partial = d.clone();
        partial.verse = None;
        assert_eq!(format_citation(&partial), "[bible - Jean 1] Car Dieu a tant aimé le monde");
        partial.chapter = None;
        assert_eq!(format_citation(&partial), "[bible - Jean] Car Dieu a tant aimé le monde");
    }

    #[test]
    fn top_citations_formats_ranked() {
        let docs = vec![doc(7, "Psaumes", "Mon berger me conduit vers la lumière.")];
        let c = top_citations("lumière et berger", &docs, 3);
        assert_eq!(c, vec!["[bible - Psaumes 1:7] Mon berger me conduit vers la lumière."]);
    }
}

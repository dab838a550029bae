// src/mood/scorer.rs
//! Lexicon scorer: normalized text → per-category raw scores.
//!
//! For every lexicon entry we count whole-word matches `n`; the contribution is
//! `score * n`. Every intensifier whose `modifier <ws> word` occurs in the text then
//! multiplies the running contribution (so matching intensifiers compound). The result
//! is added to the entry's category.

use super::lexicon::{Lexicon, LexiconEntry};

/// Per-category raw scores in first-encountered order.
///
/// Only categories with at least one lexicon match are present; a missing category
/// implicitly scores 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryScores {
    items: Vec<(String, f32)>,
}

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to `category`, appending it if unseen.
    pub fn add(&mut self, category: &str, delta: f32) {
        match self.items.iter_mut().find(|(c, _)| c == category) {
            Some((_, s)) => *s += delta,
            None => self.items.push((category.to_string(), delta)),
        }
    }

    pub fn get(&self, category: &str) -> f32 {
        self.items
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, s)| *s)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.items.iter().map(|(c, s)| (c.as_str(), *s))
    }

    /// Categories that actually move the needle (score != 0).
    pub fn non_zero(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.iter().filter(|(_, s)| *s != 0.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Score already-normalized text against `lexicon`.
pub fn score(lexicon: &Lexicon, normalized_text: &str) -> CategoryScores {
    let mut scores = CategoryScores::new();
    if normalized_text.is_empty() {
        return scores;
    }

    for entry in lexicon.entries() {
        let starts: Vec<usize> = entry.find_iter(normalized_text).map(|m| m.start()).collect();
        if starts.is_empty() {
            continue;
        }

        let mut contribution = (entry.score as f32) * (starts.len() as f32);
        for int in lexicon.intensifiers() {
            if starts
                .iter()
                .any(|&s| preceded_by(normalized_text, s, &int.modifier))
            {
                contribution *= int.multiplier;
            }
        }

        scores.add(&entry.category, contribution);
        trace_hit(entry, starts.len(), contribution);
    }

    scores
}

/// True if `text[..start]` ends with `modifier` followed by at least one whitespace,
/// and the modifier itself starts on a word boundary.
fn preceded_by(text: &str, start: usize, modifier: &str) -> bool {
    let head = &text[..start];
    let trimmed = head.trim_end();
    if trimmed.len() == head.len() {
        // no whitespace between modifier and word
        return false;
    }
    if !trimmed.ends_with(modifier) {
        return false;
    }
    let before = &trimmed[..trimmed.len() - modifier.len()];
    before
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric() && c != '_')
}

fn trace_hit(entry: &LexiconEntry, count: usize, contribution: f32) {
    tracing::trace!(
        target: "mood",
        word = %entry.word,
        category = %entry.category,
        count,
        contribution,
        "lexicon hit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    fn lex() -> Lexicon {
        Lexicon::from_json_str(
            r#"{
            "entries": [
                {"word": "mal", "score": -4, "category": "pain"},
                {"word": "malheureux", "score": -6, "category": "sadness"},
                {"word": "triste", "score": -6, "category": "sadness"},
                {"word": "heureux", "score": 7, "category": "happiness"}
            ],
            "intensifiers": [
                {"modifier": "très", "multiplier": 1.5},
                {"modifier": "vraiment", "multiplier": 2.0},
                {"modifier": "pas", "multiplier": -1.0}
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn boundary_matching_not_substring() {
        let l = lex();
        let s = score(&l, &normalize("Je suis malheureux"));
        assert_eq!(s.get("pain"), 0.0);
        assert_eq!(s.get("sadness"), -6.0);

        let s = score(&l, &normalize("Je me sens mal"));
        assert_eq!(s.get("pain"), -4.0);
    }

    #[test]
    fn occurrences_multiply_and_categories_accumulate() {
        let l = lex();
        let s = score(&l, &normalize("triste, triste et malheureux"));
        assert_eq!(s.get("sadness"), -18.0);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn intensifier_and_negation() {
        let l = lex();
        assert_eq!(score(&l, &normalize("très triste")).get("sadness"), -9.0);
        assert_eq!(score(&l, &normalize("pas heureux")).get("happiness"), -7.0);
    }

    #[test]
    fn intensifiers_compound_sequentially() {
        let l = lex();
        // "vraiment heureux" and "très heureux" both occur → 7 * 1.5 * 2.0
        let s = score(&l, &normalize("très heureux, vraiment heureux"));
        assert_eq!(s.get("happiness"), 14.0 * 1.5 * 2.0);
    }

    #[test]
    fn modifier_needs_its_own_word_boundary() {
        let l = lex();
        // "apas" is not "pas"
        assert_eq!(score(&l, &normalize("apas heureux")).get("happiness"), 7.0);
        // adjacent without space is a different token entirely
        assert_eq!(score(&l, &normalize("pasheureux")).get("happiness"), 0.0);
    }

    #[test]
    fn preserves_first_encountered_order() {
        let l = lex();
        let s = score(&l, &normalize("heureux mais mal"));
        let cats: Vec<&str> = s.iter().map(|(c, _)| c).collect();
        // lexicon order: pain before happiness
        assert_eq!(cats, vec!["pain", "happiness"]);
    }

    #[test]
    fn empty_text_has_no_scores() {
        assert!(score(&lex(), "").is_empty());
    }
}

// src/mood/lexicon.rs
//! Emotion lexicon and intensifier tables.
//!
//! The tables are data, not code: `emotion_lexicon.json` at the crate root is embedded at
//! compile time and parsed once into an immutable [`Lexicon`]. Surface forms are run
//! through [`normalize`] at load so that matching is case- and accent-insensitive, and
//! each entry's word-boundary regex is compiled here rather than per call.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::text::normalize;

/// Scores outside this range are rejected at load.
pub const SCORE_RANGE: std::ops::RangeInclusive<i32> = -10..=10;

static BUILTIN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../../emotion_lexicon.json");
    Arc::new(Lexicon::from_json_str(raw).expect("valid emotion lexicon"))
});

/* ----------------------------
File schema (from JSON)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct LexiconFile {
    pub entries: Vec<EntryCfg>,
    #[serde(default)]
    pub intensifiers: Vec<IntensifierCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryCfg {
    pub word: String,
    pub score: i32,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntensifierCfg {
    pub modifier: String,
    pub multiplier: f32,
}

/* ----------------------------
Compiled tables
---------------------------- */

#[derive(Debug, Clone)]
pub struct LexiconEntry {
    /// Normalized surface form (may contain single spaces for phrases).
    pub word: String,
    pub score: i32,
    pub category: String,
    re: Regex,
}

impl LexiconEntry {
    /// Whole-word matches of this entry in already-normalized text.
    pub fn find_iter<'t>(&self, text: &'t str) -> regex::Matches<'_, 't> {
        self.re.find_iter(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intensifier {
    /// Normalized modifier (e.g. "tres", "a bit", "not").
    pub modifier: String,
    /// Negative values invert the score (negation).
    pub multiplier: f32,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    intensifiers: Vec<Intensifier>,
}

impl Lexicon {
    /// Shared compiled-in lexicon.
    pub fn builtin() -> Arc<Lexicon> {
        Arc::clone(&BUILTIN)
    }

    /// Parse and compile a lexicon from its JSON representation.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let file: LexiconFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub fn from_file(file: LexiconFile) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        let entries = file
            .entries
            .into_iter()
            .map(|e| {
                let word = normalize(&e.word);
                if word.is_empty() {
                    anyhow::bail!("lexicon entry `{}` is empty after normalization", e.word);
                }
                if !SCORE_RANGE.contains(&e.score) {
                    anyhow::bail!("lexicon entry `{}` score {} out of range", e.word, e.score);
                }
                if e.category.trim().is_empty() {
                    anyhow::bail!("lexicon entry `{}` has no category", e.word);
                }
                // Two surface forms collapsing to one key would be counted twice.
                if !seen.insert(word.clone()) {
                    anyhow::bail!("lexicon entry `{}` duplicates `{}`", e.word, word);
                }
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&word));
                let re = Regex::new(&pattern)
                    .map_err(|err| anyhow::anyhow!("lexicon entry `{}` regex error: {}", e.word, err))?;
                Ok(LexiconEntry {
                    word,
                    score: e.score,
                    category: e.category.trim().to_string(),
                    re,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let intensifiers = file
            .intensifiers
            .into_iter()
            .map(|i| {
                let modifier = normalize(&i.modifier);
                if modifier.is_empty() {
                    anyhow::bail!("intensifier `{}` is empty after normalization", i.modifier);
                }
                if !i.multiplier.is_finite() {
                    anyhow::bail!("intensifier `{}` multiplier is not finite", i.modifier);
                }
                Ok(Intensifier {
                    modifier,
                    multiplier: i.multiplier,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            intensifiers,
        })
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn intensifiers(&self) -> &[Intensifier] {
        &self.intensifiers
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.entries {
            if !out.contains(&e.category.as_str()) {
                out.push(e.category.as_str());
            }
        }
        out
    }
}

// src/mood/mod.rs
//! Mood classifier: raw text → [`MoodResult`].
//!
//! Pipeline: [`normalize`] → [`scorer::score`] against the compiled lexicon →
//! [`aggregate`] / [`to_mood`] / [`confidence`] / [`top_emotions`].
//! Stateless and infallible: any `&str`, including empty or punctuation-only input,
//! yields a valid result (no signal → neutral, confidence 0.3).

pub mod aggregate;
pub mod lexicon;
pub mod scorer;

use metrics::{counter, describe_counter};
use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::devlog::{anon_id, log_classification};
use crate::text::normalize;

pub use aggregate::{
    aggregate, confidence, to_mood, top_emotions, EmotionScore, MoodLevel, CRISIS_CATEGORY,
    NEUTRAL_LABEL,
};
pub use lexicon::Lexicon;
pub use scorer::{score, CategoryScores};

/// How many ranked emotions a result carries.
pub const TOP_EMOTIONS: usize = 3;
/// A crisis emotion above this magnitude flags the text as a crisis.
pub const CRISIS_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodResult {
    pub mood: MoodLevel,
    pub confidence: f32,
    pub emotions: Vec<EmotionScore>,
    pub dominant_emotion: String,
}

impl MoodResult {
    /// Crisis label present among the ranked emotions with a score above the threshold.
    pub fn is_crisis(&self) -> bool {
        self.emotions
            .iter()
            .any(|e| e.label == CRISIS_CATEGORY && e.score > CRISIS_THRESHOLD)
    }
}

pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("mood_classify_total", "Texts classified.");
        describe_counter!("mood_crisis_total", "Classifications flagged as crisis.");
    });
}

/// Stateless classifier over an immutable lexicon. Cheap to clone or build per call.
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    lexicon: Arc<Lexicon>,
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodClassifier {
    /// Classifier over the compiled-in lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
        }
    }

    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Per-category raw scores for `text` (normalization included).
    pub fn category_scores(&self, text: &str) -> CategoryScores {
        score(&self.lexicon, &normalize(text))
    }

    pub fn classify(&self, text: &str) -> MoodResult {
        ensure_metrics_described();
        let scores = self.category_scores(text);

        let aggregate_score = aggregate(&scores);
        let emotions = top_emotions(&scores, TOP_EMOTIONS);
        let dominant_emotion = emotions
            .first()
            .map(|e| e.label.clone())
            .unwrap_or_else(|| NEUTRAL_LABEL.to_string());

        let result = MoodResult {
            mood: to_mood(aggregate_score),
            confidence: confidence(&scores),
            emotions,
            dominant_emotion,
        };

        counter!("mood_classify_total").increment(1);
        if result.is_crisis() {
            counter!("mood_crisis_total").increment(1);
            info!(target: "mood", id = %anon_id(text), "crisis language detected");
        }
        log_classification(text, aggregate_score, &result);

        result
    }

    /// Derived from [`classify`](Self::classify) so both always agree.
    pub fn is_crisis(&self, text: &str) -> bool {
        self.classify(text).is_crisis()
    }
}

static DEFAULT_CLASSIFIER: Lazy<MoodClassifier> = Lazy::new(MoodClassifier::new);

/// Classify with the shared builtin classifier.
pub fn classify(text: &str) -> MoodResult {
    DEFAULT_CLASSIFIER.classify(text)
}

/// Crisis check with the shared builtin classifier.
pub fn is_crisis(text: &str) -> bool {
    DEFAULT_CLASSIFIER.is_crisis(text)
}

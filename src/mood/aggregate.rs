// src/mood/aggregate.rs
//! Mood aggregation: category scores → signed magnitude, mood level, confidence and
//! ranked emotions. Pure functions, no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::scorer::CategoryScores;

pub const CRISIS_CATEGORY: &str = "crisis";
pub const CRISIS_WEIGHT: f32 = 3.0;
pub const NEUTRAL_LABEL: &str = "neutral";

/// Confidence reported when nothing in the lexicon matched.
pub const CONFIDENCE_FLOOR: f32 = 0.3;

/// Five ordered mood levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLevel {
    VeryBad,
    Bad,
    Neutral,
    Good,
    VeryGood,
}

impl MoodLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            MoodLevel::VeryBad => "very_bad",
            MoodLevel::Bad => "bad",
            MoodLevel::Neutral => "neutral",
            MoodLevel::Good => "good",
            MoodLevel::VeryGood => "very_good",
        }
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked output unit: category label and non-negative magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f32,
}

fn weight(category: &str) -> f32 {
    if category == CRISIS_CATEGORY {
        CRISIS_WEIGHT
    } else {
        1.0
    }
}

/// Weighted mean of the non-zero category scores (`crisis` weighs 3, the rest 1).
/// No signal → 0.
pub fn aggregate(scores: &CategoryScores) -> f32 {
    let (mut total, mut weights) = (0.0f32, 0.0f32);
    for (cat, s) in scores.non_zero() {
        let w = weight(cat);
        total += s * w;
        weights += w;
    }
    if weights > 0.0 {
        total / weights
    } else {
        0.0
    }
}

/// Threshold mapping, first match wins.
pub fn to_mood(aggregate_score: f32) -> MoodLevel {
    if aggregate_score <= -5.0 {
        MoodLevel::VeryBad
    } else if aggregate_score <= -2.0 {
        MoodLevel::Bad
    } else if aggregate_score < 2.0 {
        MoodLevel::Neutral
    } else if aggregate_score < 5.0 {
        MoodLevel::Good
    } else {
        MoodLevel::VeryGood
    }
}

/// `0.3 + 0.4 * min(k/5, 1) + 0.3 * min(max|s|/10, 1)`, clamped to `[0, 1]`;
/// `0.3` when no category matched.
pub fn confidence(scores: &CategoryScores) -> f32 {
    let mut count = 0usize;
    let mut max_abs = 0.0f32;
    for (_, s) in scores.non_zero() {
        count += 1;
        max_abs = max_abs.max(s.abs());
    }
    if count == 0 {
        return CONFIDENCE_FLOOR;
    }
    let breadth = (count as f32 / 5.0).min(1.0);
    let strength = (max_abs / 10.0).min(1.0);
    (CONFIDENCE_FLOOR + 0.4 * breadth + 0.3 * strength).clamp(0.0, 1.0)
}

/// Top `n` categories by |score|, descending; ties keep first-encountered order.
pub fn top_emotions(scores: &CategoryScores, n: usize) -> Vec<EmotionScore> {
    let mut ranked: Vec<EmotionScore> = scores
        .non_zero()
        .map(|(label, s)| EmotionScore {
            label: label.to_string(),
            score: s.abs(),
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(n);
    ranked
}

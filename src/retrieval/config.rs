// src/retrieval/config.rs
//! Retrieval configuration: `$RETRIEVAL_CONFIG_PATH` or `config/retrieval.toml`,
//! with a `RETRIEVAL_RANKING` env override. A missing file means defaults.
//!
//! TOML shape:
//! ```toml
//! [retrieval]
//! max_keywords = 3
//! max_results = 3
//! header = "Textes de référence pertinents :"
//! ranking = "substring"   # or "tfidf"
//! ```

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RETRIEVAL_CONFIG_PATH: &str = "config/retrieval.toml";
pub const ENV_RETRIEVAL_CONFIG_PATH: &str = "RETRIEVAL_CONFIG_PATH";
pub const ENV_RETRIEVAL_RANKING: &str = "RETRIEVAL_RANKING";

pub const DEFAULT_MAX_KEYWORDS: usize = 3;
pub const DEFAULT_MAX_RESULTS: usize = 3;
pub const DEFAULT_HEADER: &str = "Textes de référence pertinents :";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Keyword substring lookups against the store, first-seen order.
    #[default]
    Substring,
    /// Full corpus scan ranked by TF-IDF cosine similarity.
    Tfidf,
}

impl RankingMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "substring" => Some(Self::Substring),
            "tfidf" | "tf-idf" => Some(Self::Tfidf),
            _ => None,
        }
    }
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default)]
    pub ranking: RankingMode,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_results: DEFAULT_MAX_RESULTS,
            header: DEFAULT_HEADER.to_string(),
            ranking: RankingMode::Substring,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RetrievalRoot {
    #[serde(default)]
    retrieval: Option<RetrievalConfig>,
}

impl RetrievalConfig {
    /// Parse from TOML; an absent `[retrieval]` table means defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let root: RetrievalRoot = toml::from_str(s)?;
        Ok(root.retrieval.unwrap_or_default().sanitized())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading retrieval config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing retrieval config {}", path.display()))
    }

    /// Env path (must exist) → default path (if present) → defaults; then env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_RETRIEVAL_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_RETRIEVAL_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let pb = PathBuf::from(DEFAULT_RETRIEVAL_CONFIG_PATH);
            if pb.exists() {
                Self::load_from(&pb)?
            } else {
                Self::default()
            }
        };

        if let Ok(raw) = std::env::var(ENV_RETRIEVAL_RANKING) {
            match RankingMode::parse(&raw) {
                Some(mode) => cfg.ranking = mode,
                None => tracing::warn!(target: "retrieval", value = %raw, "ignoring unknown ranking mode"),
            }
        }
        Ok(cfg)
    }

    /// Zero limits would silently disable retrieval; fall back to defaults.
    fn sanitized(mut self) -> Self {
        if self.max_keywords == 0 {
            self.max_keywords = DEFAULT_MAX_KEYWORDS;
        }
        if self.max_results == 0 {
            self.max_results = DEFAULT_MAX_RESULTS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn parses_full_and_partial_tables() {
        let full = r#"
[retrieval]
max_keywords = 2
max_results = 5
header = "Context:"
ranking = "tfidf"
"#;
        let cfg = RetrievalConfig::from_toml_str(full).unwrap();
        assert_eq!(cfg.max_keywords, 2);
        assert_eq!(cfg.max_results, 5);
        assert_eq!(cfg.header, "Context:");
        assert_eq!(cfg.ranking, RankingMode::Tfidf);

        let partial = RetrievalConfig::from_toml_str("[retrieval]\nmax_results = 1\n").unwrap();
        assert_eq!(partial.max_keywords, DEFAULT_MAX_KEYWORDS);
        assert_eq!(partial.max_results, 1);
        assert_eq!(partial.ranking, RankingMode::Substring);

        assert_eq!(RetrievalConfig::from_toml_str("").unwrap(), RetrievalConfig::default());
    }

    #[test]
    fn zero_limits_are_repaired() {
        let cfg = RetrievalConfig::from_toml_str("[retrieval]\nmax_keywords = 0\nmax_results = 0\n")
            .unwrap();
        assert_eq!(cfg.max_keywords, DEFAULT_MAX_KEYWORDS);
        assert_eq!(cfg.max_results, DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn ranking_mode_parse() {
        assert_eq!(RankingMode::parse(" TF-IDF "), Some(RankingMode::Tfidf));
        assert_eq!(RankingMode::parse("substring"), Some(RankingMode::Substring));
        assert_eq!(RankingMode::parse("bm25"), None);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD so the repo's config/ does not interfere
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_RETRIEVAL_CONFIG_PATH);
        env::remove_var(ENV_RETRIEVAL_RANKING);

        // No files → defaults
        assert_eq!(RetrievalConfig::load_default().unwrap(), RetrievalConfig::default());

        // Env path wins, ranking override applies on top
        let p = tmp.path().join("r.toml");
        fs::write(&p, "[retrieval]\nmax_results = 2\n").unwrap();
        env::set_var(ENV_RETRIEVAL_CONFIG_PATH, p.display().to_string());
        env::set_var(ENV_RETRIEVAL_RANKING, "tfidf");
        let cfg = RetrievalConfig::load_default().unwrap();
        assert_eq!(cfg.max_results, 2);
        assert_eq!(cfg.ranking, RankingMode::Tfidf);

        // Env path pointing nowhere is an error
        env::set_var(ENV_RETRIEVAL_CONFIG_PATH, tmp.path().join("missing.toml"));
        assert!(RetrievalConfig::load_default().is_err());

        env::remove_var(ENV_RETRIEVAL_CONFIG_PATH);
        env::remove_var(ENV_RETRIEVAL_RANKING);
        env::set_current_dir(&old).unwrap();
    }
}

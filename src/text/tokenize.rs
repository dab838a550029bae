// src/text/tokenize.rs
//! Keyword tokenizer for the retrieval path.
//!
//! Input goes through [`normalize_light`] (accents kept), is split on
//! whitespace, and tokens of two chars or fewer or present in [`STOPWORDS`]
//! are dropped. Order and duplicates are preserved since term frequency
//! depends on them.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::iter::Filter;
use std::str::SplitWhitespace;

use super::normalize::normalize_light;

/// Tokens this short never carry retrieval signal.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Bilingual (French / English) stopword list, lowercase, accents kept.
pub const STOPWORDS: &[&str] = &[
    // French
    "les", "des", "une", "est", "sont", "dans", "pour", "par", "sur", "avec", "sans", "sous",
    "mais", "donc", "car", "que", "qui", "quoi", "dont", "où", "elle", "elles", "ils", "nous",
    "vous", "leur", "leurs", "mon", "ton", "son", "mes", "tes", "ses", "nos", "vos", "notre",
    "votre", "cette", "ces", "cet", "ceci", "cela", "ça", "comme", "aussi", "très", "plus",
    "moins", "tout", "tous", "toute", "toutes", "être", "été", "était", "avoir", "avait",
    "suis", "es", "êtes", "sommes", "ont", "avons", "avez", "fait", "faire", "peut", "alors",
    "quand", "comment", "pourquoi", "entre", "vers", "chez", "depuis", "pendant", "avant",
    "après", "encore", "déjà", "bien", "même", "autre", "autres", "rien", "quelque",
    "moi", "toi", "lui", "eux", "aux", "pas", "non", "oui", "ici", "là",
    // English
    "the", "and", "for", "are", "was", "were", "been", "being", "have", "has", "had",
    "does", "did", "will", "would", "could", "should", "may", "might", "can", "shall", "not",
    "but", "from", "into", "about", "out", "its", "you", "your", "yours", "our", "ours",
    "they", "them", "their", "his", "her", "hers", "she", "him", "this", "that", "these",
    "those", "what", "which", "who", "whom", "when", "where", "why", "how", "with",
    "without", "there", "here", "then", "than", "very", "too", "just", "also", "all", "any",
    "some", "such", "only", "own", "same", "more", "most", "other", "each", "both", "few",
    "nor", "off", "over", "under", "again", "once", "because", "while", "during", "before",
    "after", "above", "below", "between", "through", "myself", "yourself", "itself",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

fn is_keyword(token: &&str) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS && !is_stopword(token)
}

/// Lazy, restartable keyword sequence. Clone it or call [`Tokens::iter`] again to
/// walk it from the start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    normalized: String,
}

pub type TokenIter<'a> = Filter<SplitWhitespace<'a>, fn(&&'a str) -> bool>;

impl Tokens {
    pub fn iter<'a>(&'a self) -> TokenIter<'a> {
        self.normalized
            .split_whitespace()
            .filter(is_keyword as fn(&&'a str) -> bool)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a str;
    type IntoIter = TokenIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Tokenize for retrieval: light normalization, length and stopword filters.
pub fn tokenize(text: &str) -> Tokens {
    Tokens {
        normalized: normalize_light(text),
    }
}

/// Keywords of `text`, left to right, duplicates kept.
pub fn extract_keywords(text: &str) -> Vec<String> {
    tokenize(text).to_vec()
}

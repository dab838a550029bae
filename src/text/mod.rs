// src/text/mod.rs
//! Text preprocessing shared by the classifier and the retrieval path.

pub mod normalize;
pub mod tokenize;

pub use normalize::{normalize, normalize_light};
pub use tokenize::{extract_keywords, is_stopword, tokenize, Tokens, STOPWORDS};

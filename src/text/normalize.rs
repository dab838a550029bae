// src/text/normalize.rs
//! Text normalization shared by the mood classifier and the retrieval path.
//!
//! Two flavours:
//! - [`normalize`]: lowercase, strip diacritics (NFD + drop combining marks),
//!   punctuation → space, collapse whitespace. Used for lexicon matching so that
//!   "très" and "tres" hit the same entry.
//! - [`normalize_light`]: same minus the accent stripping. Used for keyword
//!   extraction, where accented terms must stay intact for display and lookup.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Full normalization for lexicon matching. Never fails; empty in → empty out.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(punct_to_space)
        .collect();
    collapse_ws(&stripped)
}

/// Lowercase + NFC + punctuation → space, accents preserved.
///
/// Decomposed input ("prie\u{300}re") is composed first so the accent stays on its
/// letter. A mark with nothing to compose with stays attached to the preceding char.
pub fn normalize_light(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .nfc()
        .map(|c| if is_combining_mark(c) { c } else { punct_to_space(c) })
        .collect();
    collapse_ws(&lowered)
}

/// Anything that is neither a letter/digit nor whitespace counts as punctuation.
#[inline]
fn punct_to_space(c: char) -> char {
    if c.is_alphanumeric() || c.is_whitespace() {
        c
    } else {
        ' '
    }
}

fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_lowercases() {
        assert_eq!(normalize("Très TRISTE, à l'école!"), "tres triste a l ecole");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize("  je   suis\t\nlà  "), "je suis la");
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!... ,;"), "");
        assert_eq!(normalize_light("--"), "");
    }

    #[test]
    fn light_keeps_accents() {
        assert_eq!(
            normalize_light("La Méditation, c'est l'été."),
            "la méditation c est l été"
        );
    }

    #[test]
    fn light_composes_decomposed_accents() {
        assert_eq!(normalize_light("prie\u{300}re"), "prière");
        assert_eq!(normalize_light("E\u{301}TE\u{301}"), "été");
        assert_eq!(normalize_light("prie\u{300}re"), normalize_light("prière"));
    }

    #[test]
    fn full_folds_decomposed_and_composed_alike() {
        assert_eq!(normalize("tre\u{300}s triste"), normalize("très triste"));
    }

    #[test]
    fn odd_unicode_does_not_panic() {
        let s = normalize("trčs \u{1F600} \u{0301}ok \u{200B}");
        assert!(s.starts_with("trcs"));
        assert!(s.ends_with("ok"));
    }
}

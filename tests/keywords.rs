// tests/keywords.rs
use offline_mood_engine::extract_keywords;
use offline_mood_engine::text::{is_stopword, normalize, STOPWORDS};

#[test]
fn keywords_drop_stopwords_and_short_tokens() {
    let kws = extract_keywords("Je me sens fatigué et seul, j'ai besoin de repos");
    assert_eq!(kws, vec!["sens", "fatigué", "seul", "besoin", "repos"]);
    assert!(kws.iter().all(|k| k.chars().count() >= 3));
    assert!(kws.iter().all(|k| !is_stopword(k)));
}

#[test]
fn keywords_keep_accents_and_lowercase() {
    let kws = extract_keywords("ESPÉRANCE, Prière!");
    assert_eq!(kws, vec!["espérance", "prière"]);
}

#[test]
fn decomposed_accents_survive_extraction() {
    let decomposed = extract_keywords("prie\u{300}re patience");
    assert_eq!(decomposed, vec!["prière", "patience"]);
    assert_eq!(decomposed, extract_keywords("prière patience"));
}

#[test]
fn extraction_is_idempotent() {
    let inputs = [
        "Je cherche la paix du cœur",
        "I feel lost and I need some guidance today",
        "¿Qué? -- patience... prière; espérance!",
        "",
    ];
    for text in inputs {
        let once = extract_keywords(text);
        let twice = extract_keywords(&once.join(" "));
        assert_eq!(once, twice, "not idempotent for {text:?}");
    }
}

#[test]
fn empty_or_stopword_only_yields_nothing() {
    assert!(extract_keywords("").is_empty());
    assert!(extract_keywords("le la les et ou the and of").is_empty());
    assert!(extract_keywords("?!;:").is_empty());
}

#[test]
fn stopword_list_is_bilingual() {
    for w in ["les", "des", "pour", "the", "and", "with"] {
        assert!(STOPWORDS.contains(&w), "{w} should be a stopword");
    }
    assert!(!is_stopword("paix"));
}

#[test]
fn normalize_folds_case_accents_and_punctuation() {
    assert_eq!(normalize("  Très   HEUREUX!!  "), "tres heureux");
    assert_eq!(normalize("l'âme"), "l ame");
}

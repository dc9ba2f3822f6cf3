//! Title normalization and keyword extraction for duplicate detection.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static LEADING_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(to |platform to |app to |initiative to |create |provide |support |distribute |sponsor |fund |organize |build |install |set up |establish )",
    )
    .expect("valid leading verb regex")
});
static TRAILING_NOUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(platform|app|initiative|program|system|network|bank|support|hub|tracker|fund|leaderboard)$",
    )
    .expect("valid trailing noun regex")
});

const STOP_WORDS: &[&str] = &[
    "with", "from", "this", "that", "will", "have", "been", "they", "them", "their", "these",
    "those", "poor", "rich", "family", "families", "children", "people",
];

const MIN_KEYWORD_CHARS: usize = 4;

/// Lower-cases, collapses whitespace and strips boilerplate verbs/nouns.
///
/// `"Support  Rural Water Network"` -> `"rural water"`.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE_RE.replace_all(&lowered, " ");
    let stripped = LEADING_VERB_RE.replace(&collapsed, "");
    let stripped = TRAILING_NOUN_RE.replace(&stripped, "");
    stripped.trim().to_string()
}

/// Distinct normalized words longer than three characters, minus stop words.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    normalize_text(text)
        .split(' ')
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap of the two texts' keyword sets; `0.0` if either is empty.
pub fn keyword_overlap(left: &str, right: &str) -> f64 {
    jaccard(&extract_keywords(left), &extract_keywords(right))
}

pub(crate) fn jaccard(left: &BTreeSet<String>, right: &BTreeSet<String>) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(right).count();
    let union = left.union(right).count();
    shared as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::{extract_keywords, keyword_overlap, normalize_text};

    #[test]
    fn normalize_strips_boilerplate() {
        assert_eq!(normalize_text("Support  Rural Water Network"), "rural water");
        assert_eq!(normalize_text("To digitally connect\nworkers"), "digitally connect workers");
        assert_eq!(normalize_text("  Textbook Exchange  "), "textbook exchange");
    }

    #[test]
    fn keywords_skip_short_and_stop_words() {
        let keywords = extract_keywords("Free eye testing for poor families with kids");
        let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
        assert_eq!(keywords, vec!["free", "kids", "testing"]);
    }

    #[test]
    fn keyword_overlap_is_jaccard() {
        let overlap = keyword_overlap("school uniform drive", "school uniform donation");
        // {school, uniform, drive} vs {school, uniform, donation}
        assert!((overlap - 0.5).abs() < 1e-9);
        assert_eq!(keyword_overlap("a b", "school"), 0.0);
    }
}

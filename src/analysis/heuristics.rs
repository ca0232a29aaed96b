//! Length, keyword-density and call-to-action heuristics

use std::collections::{BTreeMap, HashMap};

use crate::analysis::content_type::ContentType;
use crate::analysis::{Priority, Suggestion, SuggestionType};
use crate::utils::math::round_to;
use crate::utils::text::{whitespace_words, word_tokens};

/// Phrases that count as a call to action (case-insensitive substring)
pub const CTA_PHRASES: &[&str] = &[
    "click",
    "buy",
    "purchase",
    "subscribe",
    "sign up",
    "learn more",
    "get started",
    "contact",
    "download",
    "try",
];

/// Densities at or below this percentage are not reported
const REPORTED_DENSITY_ABOVE: f64 = 1.0;
/// Densities above this percentage read as keyword stuffing
const STUFFING_DENSITY_ABOVE: f64 = 5.0;

pub fn word_count(content: &str) -> usize {
    whitespace_words(content).len()
}

pub fn length_suggestion(content: &str, content_type: &ContentType) -> Option<Suggestion> {
    let words = word_count(content);
    let target = content_type.length_target();
    if words < target.min {
        Some(Suggestion::new(
            SuggestionType::Length,
            Priority::High,
            format!(
                "Expand the content to at least {} words (around {} is ideal)",
                target.min, target.optimal
            ),
            format!(
                "{} content works best between {} and {} words; this has {}",
                content_type, target.min, target.max, words
            ),
        ))
    } else if words > target.max {
        Some(Suggestion::new(
            SuggestionType::Length,
            Priority::Medium,
            format!(
                "Trim the content to under {} words (around {} is ideal)",
                target.max, target.optimal
            ),
            format!(
                "{} content works best between {} and {} words; this has {}",
                content_type, target.min, target.max, words
            ),
        ))
    } else {
        None
    }
}

/// Percentage of all words taken by each word longer than three characters.
/// Only entries above 1% are kept, rounded to two decimals.
pub fn keyword_density(content: &str) -> BTreeMap<String, f64> {
    let words = word_tokens(content);
    if words.is_empty() {
        return BTreeMap::new();
    }
    let total = words.len() as f64;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words.iter().filter(|w| w.chars().count() > 3) {
        *counts.entry(word.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(word, n)| (word.to_string(), n as f64 / total * 100.0))
        .filter(|(_, density)| *density > REPORTED_DENSITY_ABOVE)
        .map(|(word, density)| (word, round_to(density, 2)))
        .collect()
}

pub fn keyword_suggestion(density: &BTreeMap<String, f64>) -> Option<Suggestion> {
    let stuffed: Vec<&str> = density
        .iter()
        .filter(|(_, d)| **d > STUFFING_DENSITY_ABOVE)
        .map(|(w, _)| w.as_str())
        .collect();
    if stuffed.is_empty() {
        return None;
    }
    Some(Suggestion::new(
        SuggestionType::Keywords,
        Priority::Medium,
        format!("Reduce repetition of: {}", stuffed.join(", ")),
        format!("Keyword density above {STUFFING_DENSITY_ABOVE:.0}% reads as keyword stuffing"),
    ))
}

pub fn has_call_to_action(content: &str) -> bool {
    let lower = content.to_lowercase();
    CTA_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

pub fn cta_suggestion(content: &str, content_type: &ContentType) -> Option<Suggestion> {
    if !content_type.requires_cta() || has_call_to_action(content) {
        return None;
    }
    Some(Suggestion::new(
        SuggestionType::Cta,
        Priority::High,
        "Add a clear call to action",
        format!("{content_type} content should tell the reader what to do next"),
    ))
}

/// Length, keyword and CTA suggestions in that order
pub fn analyze_length_and_cta(content: &str, content_type: &ContentType) -> Vec<Suggestion> {
    let density = keyword_density(content);
    [
        length_suggestion(content, content_type),
        keyword_suggestion(&density),
        cta_suggestion(content, content_type),
    ]
    .into_iter()
    .flatten()
    .collect()
}

//! Deterministic rule checks. Pure functions of the content and brand data.

use std::collections::HashMap;

use tracing::debug;

use crate::compliance::RuleOutcome;
use crate::config::ScoringPolicy;
use crate::utils::text::{char_len, whitespace_words};

/// Case-insensitive substring match of each restricted term; every hit costs
/// `restricted_term_penalty`. Blank terms are ignored.
pub fn check_restricted_terms(
    content: &str,
    restricted_terms: &[String],
    policy: &ScoringPolicy,
) -> RuleOutcome {
    let haystack = content.to_lowercase();
    let mut outcome = RuleOutcome::default();
    for term in restricted_terms {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        if haystack.contains(&term.to_lowercase()) {
            debug!("restricted term matched: {}", term);
            outcome
                .violations
                .push(format!("Contains restricted term: \"{term}\""));
            outcome
                .suggestions
                .push(format!("Replace \"{term}\" with brand-approved language"));
            outcome.deduction += policy.restricted_term_penalty;
        }
    }
    outcome
}

/// Content shorter than `min_content_chars` characters
pub fn check_min_length(content: &str, policy: &ScoringPolicy) -> RuleOutcome {
    if char_len(content) < policy.min_content_chars {
        RuleOutcome::flag(
            format!(
                "Content is too short (under {} characters)",
                policy.min_content_chars
            ),
            "Expand the content with more detail about the offer and its value",
            policy.short_content_penalty,
        )
    } else {
        RuleOutcome::default()
    }
}

/// Words longer than three characters whose count exceeds `max(2, 10% of all words)`,
/// sorted for stable output
pub fn excessively_repeated_words(content: &str) -> Vec<String> {
    let words = whitespace_words(content);
    let threshold = (0.1 * words.len() as f64).max(2.0);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words.iter().filter(|w| w.chars().count() > 3) {
        *counts.entry(word.as_str()).or_default() += 1;
    }
    let mut repeated: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n as f64 > threshold)
        .map(|(w, _)| w.to_string())
        .collect();
    repeated.sort();
    repeated
}

/// One flag for the whole content, however many words are over-used
pub fn check_repetition(content: &str, policy: &ScoringPolicy) -> RuleOutcome {
    let repeated = excessively_repeated_words(content);
    if repeated.is_empty() {
        return RuleOutcome::default();
    }
    debug!("excessive repetition: {:?}", repeated);
    RuleOutcome::flag(
        "Content contains excessive word repetition",
        "Vary word choice to keep the copy engaging",
        policy.repetition_penalty,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ScoringPolicy {
        ScoringPolicy::default()
    }

    #[test]
    fn restricted_terms_match_case_insensitively() {
        let outcome = check_restricted_terms(
            "Our CHEAP deals are Low-Cost and fun",
            &["cheap".into(), "low-cost".into(), "premium".into()],
            &policy(),
        );
        assert_eq!(
            outcome.violations,
            vec![
                "Contains restricted term: \"cheap\"",
                "Contains restricted term: \"low-cost\""
            ]
        );
        assert_eq!(outcome.suggestions.len(), 2);
        assert_eq!(outcome.deduction, 40.0);
    }

    #[test]
    fn blank_terms_never_match() {
        let outcome = check_restricted_terms("anything", &["".into(), "  ".into()], &policy());
        assert!(outcome.is_clean());
    }

    #[test]
    fn short_content_is_flagged() {
        let outcome = check_min_length("Too short.", &policy());
        assert_eq!(outcome.deduction, 15.0);
        assert!(outcome.violations[0].contains("too short"));

        let long = "x".repeat(50);
        assert!(check_min_length(&long, &policy()).is_clean());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 49 two-byte characters: 98 bytes, still short
        let content = "é".repeat(49);
        assert!(!check_min_length(&content, &policy()).is_clean());
    }

    #[test]
    fn repetition_uses_relative_threshold() {
        // "brand" 3 times in 9 words: threshold is max(2, 0.9) = 2
        let content = "brand new brand and the brand is here ok";
        assert_eq!(excessively_repeated_words(content), vec!["brand"]);

        // 3 times in 40 words: threshold is 4
        let mut words = vec!["brand"; 3];
        words.extend(std::iter::repeat_n("a", 37));
        assert!(excessively_repeated_words(&words.join(" ")).is_empty());
    }

    #[test]
    fn short_words_are_not_counted() {
        assert!(excessively_repeated_words("the the the the the the").is_empty());
    }

    #[test]
    fn repetition_fires_once() {
        let content = "super super super deal deal deal";
        assert_eq!(excessively_repeated_words(content).len(), 2);
        let outcome = check_repetition(content, &policy());
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.deduction, 10.0);
    }
}

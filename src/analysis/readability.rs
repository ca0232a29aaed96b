//! Flesch Reading Ease approximation

use crate::analysis::{Priority, Suggestion, SuggestionType};
use crate::utils::math::round_to;
use crate::utils::text::{sentence_count, syllable_count, word_tokens};

/// Scores below this get a "simplify" suggestion
pub const HARD_TO_READ_BELOW: f64 = 30.0;

/// `206.835 - 1.015 * words/sentence - 84.6 * syllables/word`, clamped to
/// [0, 100] and rounded to one decimal. Content without words scores 0.
pub fn compute_readability(content: &str) -> f64 {
    let words = word_tokens(content);
    if words.is_empty() {
        return 0.0;
    }
    let sentences = sentence_count(content) as f64;
    let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();
    let word_count = words.len() as f64;

    let score = 206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllables as f64 / word_count);
    round_to(score.clamp(0.0, 100.0), 1)
}

pub fn readability_suggestion(score: f64) -> Option<Suggestion> {
    (score < HARD_TO_READ_BELOW).then(|| {
        Suggestion::new(
            SuggestionType::Structure,
            Priority::Medium,
            "Use shorter sentences and simpler words",
            format!("Readability score is {score:.1}; content below {HARD_TO_READ_BELOW:.0} is hard for most readers"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_simple_sentences_read_easily() {
        let score = compute_readability("The cat sat. The dog ran.");
        assert!(score > 80.0, "got {score}");
        assert!(readability_suggestion(score).is_none());
    }

    #[test]
    fn dense_prose_reads_hard() {
        let score = compute_readability(
            "Organizational interoperability considerations necessitate comprehensive \
             infrastructural modernization initiatives encompassing multidimensional \
             authentication methodologies and institutionalized accountability frameworks",
        );
        assert!(score < 30.0, "got {score}");
        let suggestion = readability_suggestion(score).unwrap();
        assert_eq!(suggestion.kind, SuggestionType::Structure);
        assert_eq!(suggestion.priority, Priority::Medium);
    }

    #[test]
    fn no_words_scores_zero() {
        assert_eq!(compute_readability(""), 0.0);
        assert_eq!(compute_readability("?!..."), 0.0);
    }

    #[test]
    fn result_has_one_decimal() {
        let score = compute_readability("Simple words make reading easier for everyone here.");
        assert_eq!(score, round_to(score, 1));
    }
}

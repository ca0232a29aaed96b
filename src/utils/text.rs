//! Tokenizers shared by the rule checks and the analyzers

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));
static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));
static VOWEL_GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouy]+").expect("valid vowel regex"));

/// Lowercased whitespace-separated tokens, punctuation kept
pub fn whitespace_words(content: &str) -> Vec<String> {
    content.split_whitespace().map(str::to_lowercase).collect()
}

/// Lowercased `\b\w+\b` tokens
pub fn word_tokens(content: &str) -> Vec<String> {
    WORD_RE
        .find_iter(content)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Non-empty segments between terminal punctuation; never less than 1
pub fn sentence_count(content: &str) -> usize {
    SENTENCE_SPLIT_RE
        .split(content)
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1)
}

/// Vowel groups in a lowercased word, at least one per word
pub fn syllable_count(word: &str) -> usize {
    VOWEL_GROUP_RE.find_iter(word).count().max(1)
}

/// Character length as users see it, not bytes
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_without_terminal_punctuation_count_once() {
        assert_eq!(sentence_count("no punctuation here"), 1);
        assert_eq!(sentence_count(""), 1);
        assert_eq!(sentence_count("One. Two!! Three?"), 3);
        assert_eq!(sentence_count("Trailing dots..."), 1);
    }

    #[test]
    fn word_tokens_strip_punctuation() {
        assert_eq!(word_tokens("Hello, World!"), vec!["hello", "world"]);
        assert_eq!(whitespace_words("Hello, World!"), vec!["hello,", "world!"]);
    }

    #[test]
    fn syllables_have_a_floor_of_one() {
        assert_eq!(syllable_count("rhythm"), 1);
        assert_eq!(syllable_count("banana"), 3);
        assert_eq!(syllable_count("queue"), 1);
        assert_eq!(syllable_count("brr"), 1);
    }
}

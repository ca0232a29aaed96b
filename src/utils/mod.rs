//! Utility functions shared across the codebase

pub mod math;
pub mod text;

// Re-export commonly used utilities
pub use math::{clamp_score, round_to};
pub use text::{sentence_count, syllable_count, whitespace_words, word_tokens};

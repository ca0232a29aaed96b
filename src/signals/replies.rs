//! Decoders for the fixed-format replies requested in `prompts`.
//!
//! Decoding never fails: a field that is missing or malformed is simply
//! absent, and a reply with no recognizable field at all decodes to `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\s*SCORE:\s*(\d+(?:\.\d+)?)").expect("valid SCORE regex"));
static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\s*STATUS:\s*([A-Z_]+)").expect("valid STATUS regex"));
static REASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\s*REASON:\s*(.+?)\s*$").expect("valid REASON regex"));
static SUGGESTIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*SUGGESTIONS?:\s*(.+?)\s*$").expect("valid SUGGESTIONS regex")
});
static SENTIMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*SENTIMENT:\s*(positive|neutral|negative)\b").expect("valid SENTIMENT regex")
});
static BRAND_ALIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*BRAND_ALIGNMENT:\s*(\d+(?:\.\d+)?)").expect("valid BRAND_ALIGNMENT regex")
});
static TONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*TONE_ASSESSMENT:\s*(.+?)\s*$").expect("valid TONE_ASSESSMENT regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

/// Fields of a `SCORE/STATUS/REASON/SUGGESTIONS` reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceComplianceReply {
    /// Only set when the number is within [0, 100]
    pub score: Option<f64>,
    pub non_compliant: bool,
    pub reason: Option<String>,
    pub suggestion: Option<String>,
}

/// Fields of a `SENTIMENT/BRAND_ALIGNMENT/TONE_ASSESSMENT` reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentAlignmentReply {
    pub sentiment: Option<Sentiment>,
    /// Only set when the number is within [0, 100]
    pub brand_alignment: Option<f64>,
    pub tone_assessment: Option<String>,
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

fn capture_percent(re: &Regex, text: &str) -> Option<f64> {
    capture(re, text)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| (0.0..=100.0).contains(v))
}

impl VoiceComplianceReply {
    pub fn decode(text: &str) -> Option<Self> {
        let status = capture(&STATUS_RE, text).map(str::to_uppercase);
        let reply = Self {
            score: capture_percent(&SCORE_RE, text),
            non_compliant: status.as_deref() == Some("NON_COMPLIANT"),
            reason: capture(&REASON_RE, text).map(str::to_string),
            suggestion: capture(&SUGGESTIONS_RE, text).map(str::to_string),
        };
        let has_signal = reply.score.is_some()
            || status.is_some()
            || reply.reason.is_some()
            || reply.suggestion.is_some();
        has_signal.then_some(reply)
    }
}

impl SentimentAlignmentReply {
    pub fn decode(text: &str) -> Option<Self> {
        let reply = Self {
            sentiment: capture(&SENTIMENT_RE, text).and_then(Sentiment::parse),
            brand_alignment: capture_percent(&BRAND_ALIGNMENT_RE, text),
            tone_assessment: capture(&TONE_RE, text).map(str::to_string),
        };
        let has_signal = reply.sentiment.is_some()
            || reply.brand_alignment.is_some()
            || reply.tone_assessment.is_some();
        has_signal.then_some(reply)
    }
}

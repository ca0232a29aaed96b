//! Content-quality analysis: readability, length, keywords, CTA, and the
//! LLM-derived sentiment/brand-alignment signals.

pub mod content_type;
pub mod heuristics;
pub mod readability;

pub use content_type::{ContentType, LengthTarget};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::brand::BrandProfile;
use crate::signals::{DEFAULT_BRAND_ALIGNMENT, Sentiment, SentimentAlignment, SignalExtractor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Length,
    Tone,
    Keywords,
    Cta,
    Structure,
    Brand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub priority: Priority,
    pub suggestion: String,
    pub reason: String,
}

impl Suggestion {
    pub fn new(
        kind: SuggestionType,
        priority: Priority,
        suggestion: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            suggestion: suggestion.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub readability_score: f64,
    pub keyword_density: BTreeMap<String, f64>,
    pub brand_alignment: u8,
    pub suggestions: Vec<Suggestion>,
}

/// Alignment below this earns a `brand` suggestion
const WEAK_BRAND_ALIGNMENT_BELOW: u8 = DEFAULT_BRAND_ALIGNMENT;

/// Runs the heuristic analyzers and, when a provider is configured,
/// asks it for sentiment and brand alignment.
#[derive(Clone, Default)]
pub struct ContentAnalyzer {
    extractor: Option<SignalExtractor>,
}

impl ContentAnalyzer {
    pub fn new(extractor: SignalExtractor) -> Self {
        Self {
            extractor: Some(extractor),
        }
    }

    pub fn heuristics_only() -> Self {
        Self { extractor: None }
    }

    pub async fn analyze(
        &self,
        content: &str,
        content_type: &ContentType,
        brand: &BrandProfile,
        target_audience: Option<&str>,
    ) -> AnalysisResult {
        let readability_score = readability::compute_readability(content);
        let keyword_density = heuristics::keyword_density(content);

        let mut suggestions = Vec::new();
        suggestions.extend(heuristics::length_suggestion(content, content_type));
        suggestions.extend(readability::readability_suggestion(readability_score));
        suggestions.extend(heuristics::keyword_suggestion(&keyword_density));
        suggestions.extend(heuristics::cta_suggestion(content, content_type));

        let signals = match &self.extractor {
            Some(extractor) => extractor
                .sentiment_and_alignment(content, brand, target_audience)
                .await
                .unwrap_or_else(|e| {
                    warn!("Sentiment/alignment unavailable, using defaults: {}", e);
                    SentimentAlignment::default()
                }),
            None => SentimentAlignment::default(),
        };
        suggestions.extend(signal_suggestions(&signals, brand));

        AnalysisResult {
            sentiment: signals.sentiment,
            readability_score,
            keyword_density,
            brand_alignment: signals.brand_alignment,
            suggestions,
        }
    }
}

/// Brand then tone suggestions derived from the model's assessment
fn signal_suggestions(signals: &SentimentAlignment, brand: &BrandProfile) -> Vec<Suggestion> {
    let mut out = Vec::new();
    if signals.brand_alignment < WEAK_BRAND_ALIGNMENT_BELOW {
        out.push(Suggestion::new(
            SuggestionType::Brand,
            Priority::High,
            format!("Bring the copy closer to the {} voice and values", brand.name),
            signals.tone_assessment.clone().unwrap_or_else(|| {
                format!("Brand alignment is {}/100", signals.brand_alignment)
            }),
        ));
    }
    if signals.sentiment == Sentiment::Negative {
        out.push(Suggestion::new(
            SuggestionType::Tone,
            Priority::Medium,
            "Reframe the message in a more positive tone",
            "Marketing copy with negative sentiment tends to underperform",
        ));
    }
    out
}

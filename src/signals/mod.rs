//! LLM-assisted brand signals: voice compliance, sentiment and brand alignment.
//!
//! The extractor only fails on transport/provider errors (after retries).
//! Unparseable model output is "no signal" and maps to defaults.

pub mod prompts;
pub mod replies;

pub use replies::{Sentiment, SentimentAlignmentReply, VoiceComplianceReply};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::brand::BrandProfile;
use crate::clients::TextGenerator;
use crate::config::ProviderConfig;
use crate::error::{BrandComplianceError, Result};
use crate::retry::RetryPolicy;

/// Brand alignment assumed when the model gives nothing usable
pub const DEFAULT_BRAND_ALIGNMENT: u8 = 70;

/// Voice-compliance verdict for one piece of content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCompliance {
    pub voice_score: Option<u8>,
    pub is_non_compliant: bool,
    pub reason: Option<String>,
    pub suggestion: Option<String>,
}

impl From<VoiceComplianceReply> for VoiceCompliance {
    fn from(reply: VoiceComplianceReply) -> Self {
        Self {
            voice_score: reply.score.map(|s| s.round() as u8),
            is_non_compliant: reply.non_compliant,
            reason: reply.reason,
            suggestion: reply.suggestion,
        }
    }
}

/// Sentiment and brand alignment, always populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAlignment {
    pub sentiment: Sentiment,
    pub brand_alignment: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_assessment: Option<String>,
}

impl Default for SentimentAlignment {
    fn default() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            brand_alignment: DEFAULT_BRAND_ALIGNMENT,
            tone_assessment: None,
        }
    }
}

impl From<SentimentAlignmentReply> for SentimentAlignment {
    fn from(reply: SentimentAlignmentReply) -> Self {
        Self {
            sentiment: reply.sentiment.unwrap_or_default(),
            brand_alignment: reply
                .brand_alignment
                .map(|a| a.round() as u8)
                .unwrap_or(DEFAULT_BRAND_ALIGNMENT),
            tone_assessment: reply.tone_assessment,
        }
    }
}

/// Issues structured prompts through a [`TextGenerator`] under a [`RetryPolicy`]
#[derive(Clone)]
pub struct SignalExtractor {
    generator: Arc<dyn TextGenerator>,
    retry: RetryPolicy,
    max_tokens: u32,
    temperature: f32,
    /// Wall-clock cap on one signal, retries included
    budget: Option<Duration>,
}

impl SignalExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, retry: RetryPolicy) -> Self {
        let defaults = ProviderConfig::default();
        Self {
            generator,
            retry,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            budget: None,
        }
    }

    pub fn with_generation(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Give up on a signal once `budget` has elapsed, whatever the retry policy
    /// still has left. Expiry surfaces as `BrandComplianceError::Timeout`.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.generator.name()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    async fn ask(&self, label: &str, prompt: &str) -> Result<String> {
        let call = self.retry.run(label, || {
            self.generator
                .generate_text(prompt, self.max_tokens, self.temperature)
        });
        let generation = match self.budget {
            Some(budget) => tokio::time::timeout(budget, call).await.map_err(|_| {
                BrandComplianceError::Timeout {
                    operation: label.to_string(),
                    timeout_ms: budget.as_millis() as u64,
                }
            })??,
            None => call.await?,
        };
        Ok(generation.text)
    }

    pub async fn voice_compliance(
        &self,
        content: &str,
        brand: &BrandProfile,
    ) -> Result<VoiceCompliance> {
        let prompt = prompts::voice_compliance_prompt(content, brand);
        let text = self.ask("voice_compliance", &prompt).await?;
        match VoiceComplianceReply::decode(&text) {
            Some(reply) => Ok(reply.into()),
            None => {
                debug!("voice_compliance reply had no recognizable fields");
                Ok(VoiceCompliance::default())
            }
        }
    }

    pub async fn sentiment_and_alignment(
        &self,
        content: &str,
        brand: &BrandProfile,
        target_audience: Option<&str>,
    ) -> Result<SentimentAlignment> {
        let prompt = prompts::sentiment_alignment_prompt(content, brand, target_audience);
        let text = self.ask("sentiment_alignment", &prompt).await?;
        match SentimentAlignmentReply::decode(&text) {
            Some(reply) => Ok(reply.into()),
            None => {
                debug!("sentiment_alignment reply had no recognizable fields");
                Ok(SentimentAlignment::default())
            }
        }
    }
}

//! Combines the rule checks and the LLM voice signal into one compliance result

use tracing::{debug, warn};

use crate::brand::BrandProfile;
use crate::compliance::messaging::apply_messaging;
use crate::compliance::rules::{check_min_length, check_repetition, check_restricted_terms};
use crate::compliance::{ComplianceOptions, ComplianceResult, RuleOutcome, ScoreCard};
use crate::config::ScoringPolicy;
use crate::retry::RetryPolicy;
use crate::signals::{SignalExtractor, VoiceCompliance};

/// Runs the compliance steps in their fixed order:
/// restricted terms, brand voice, messaging, then length and repetition.
#[derive(Clone)]
pub struct ComplianceAggregator {
    extractor: Option<SignalExtractor>,
    policy: ScoringPolicy,
}

impl ComplianceAggregator {
    pub fn new(extractor: SignalExtractor, policy: ScoringPolicy) -> Self {
        Self {
            extractor: Some(extractor),
            policy,
        }
    }

    /// No LLM: the brand-voice step is skipped entirely
    pub fn rules_only(policy: ScoringPolicy) -> Self {
        Self {
            extractor: None,
            policy,
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.extractor.as_ref().map(SignalExtractor::retry_policy)
    }

    /// Never fails: provider trouble during the voice step costs
    /// `voice_failure_penalty` points and nothing else.
    pub async fn aggregate(
        &self,
        content: &str,
        brand: &BrandProfile,
        options: &ComplianceOptions,
    ) -> ComplianceResult {
        let policy = &self.policy;
        let mut card = ScoreCard::new();

        if options.check_restricted_terms {
            card = card.apply(check_restricted_terms(content, &brand.restricted_terms, policy));
        }

        if options.enforce_brand_voice
            && brand.voice().is_some()
            && let Some(extractor) = &self.extractor
        {
            card = match extractor.voice_compliance(content, brand).await {
                Ok(voice) => apply_voice(card, voice),
                Err(e) => {
                    warn!("Brand voice check unavailable, applying penalty: {}", e);
                    card.apply(RuleOutcome {
                        deduction: policy.voice_failure_penalty,
                        ..RuleOutcome::default()
                    })
                }
            };
        }

        if options.validate_messaging && !brand.messaging_framework.is_empty() {
            card = apply_messaging(card, content, &brand.messaging_framework, policy);
        }

        card = card
            .apply(check_min_length(content, policy))
            .apply(check_repetition(content, policy));

        let result = card.finish(policy.passing_score);
        debug!(
            "compliance for {}: score={} violations={}",
            brand.name,
            result.score,
            result.violations.len()
        );
        result
    }
}

/// The voice score can only pull the running score down
fn apply_voice(card: ScoreCard, voice: VoiceCompliance) -> ScoreCard {
    let card = match voice.voice_score {
        Some(voice_score) => card.rescore(|score| score.min(score * f64::from(voice_score) / 100.0)),
        None => card,
    };
    if !voice.is_non_compliant {
        return card;
    }
    let violation = match voice.reason.as_deref() {
        Some(reason) => format!("Content does not match brand voice: {reason}"),
        None => "Content does not match brand voice".to_string(),
    };
    let suggestion = voice
        .suggestion
        .unwrap_or_else(|| "Adjust the tone and wording to reflect the brand voice".to_string());
    card.apply(RuleOutcome::flag(violation, suggestion, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_score_scales_running_score() {
        let card = ScoreCard::new().rescore(|_| 80.0);
        let card = apply_voice(
            card,
            VoiceCompliance {
                voice_score: Some(50),
                ..VoiceCompliance::default()
            },
        );
        assert_eq!(card.score, 40.0);
        assert!(card.violations.is_empty());
    }

    #[test]
    fn non_compliant_status_always_flags() {
        let card = apply_voice(
            ScoreCard::new(),
            VoiceCompliance {
                voice_score: Some(100),
                is_non_compliant: true,
                reason: Some("too casual".into()),
                suggestion: None,
            },
        );
        assert_eq!(card.score, 100.0);
        assert_eq!(card.violations, vec!["Content does not match brand voice: too casual"]);
        assert_eq!(card.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn rules_only_skips_voice_step() {
        let aggregator = ComplianceAggregator::rules_only(ScoringPolicy::default());
        let brand = BrandProfile::new("Acme").with_voice("formal");
        let result = aggregator
            .aggregate(
                "A perfectly reasonable sentence describing our product in detail.",
                &brand,
                &ComplianceOptions::default(),
            )
            .await;
        assert_eq!(result.score, 100);
        assert!(result.is_compliant);
        assert!(result.suggestions.is_none());
    }
}

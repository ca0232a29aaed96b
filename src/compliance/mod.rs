//! Brand-compliance scoring.
//!
//! A compliance run threads a [`ScoreCard`] through a fixed sequence of rules.
//! Each rule inspects the content and returns a [`RuleOutcome`]; applying an
//! outcome to a card yields the next card. The final card is frozen into a
//! [`ComplianceResult`].

pub mod aggregator;
pub mod messaging;
pub mod rules;

pub use aggregator::ComplianceAggregator;
pub use messaging::messaging_alignment;

use serde::{Deserialize, Serialize};

use crate::utils::clamp_score;

/// Which optional checks to run. Length and repetition checks always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceOptions {
    pub enforce_brand_voice: bool,
    pub check_restricted_terms: bool,
    pub validate_messaging: bool,
}

impl Default for ComplianceOptions {
    fn default() -> Self {
        Self {
            enforce_brand_voice: true,
            check_restricted_terms: true,
            validate_messaging: true,
        }
    }
}

/// Findings of one rule: messages to append and points to take off
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutcome {
    pub violations: Vec<String>,
    pub suggestions: Vec<String>,
    pub deduction: f64,
}

impl RuleOutcome {
    pub fn flag(
        violation: impl Into<String>,
        suggestion: impl Into<String>,
        deduction: f64,
    ) -> Self {
        Self {
            violations: vec![violation.into()],
            suggestions: vec![suggestion.into()],
            deduction,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.suggestions.is_empty() && self.deduction == 0.0
    }
}

/// Running state of a compliance run. The score is unclamped until `finish`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    pub violations: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self {
            score: 100.0,
            violations: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome's messages and subtract its deduction
    pub fn apply(mut self, outcome: RuleOutcome) -> Self {
        self.score -= outcome.deduction;
        self.violations.extend(outcome.violations);
        self.suggestions.extend(outcome.suggestions);
        self
    }

    /// Replace the score, keeping messages
    pub fn rescore(mut self, f: impl FnOnce(f64) -> f64) -> Self {
        self.score = f(self.score);
        self
    }

    pub fn finish(self, passing_score: u8) -> ComplianceResult {
        ComplianceResult::new(self.score, self.violations, self.suggestions, passing_score)
    }
}

/// Outcome of a compliance run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub is_compliant: bool,
    pub violations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub score: u8,
}

impl ComplianceResult {
    /// Clamp and round the score, then derive compliance from it.
    /// `suggestions` is `None` rather than an empty list when nothing was suggested.
    pub fn new(
        raw_score: f64,
        violations: Vec<String>,
        suggestions: Vec<String>,
        passing_score: u8,
    ) -> Self {
        let score = clamp_score(raw_score);
        Self {
            is_compliant: violations.is_empty() && score >= passing_score,
            violations,
            suggestions: (!suggestions.is_empty()).then_some(suggestions),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compliance_boundary_at_passing_score() {
        let at = ComplianceResult::new(70.0, vec![], vec![], 70);
        assert!(at.is_compliant);
        assert_eq!(at.score, 70);

        let below = ComplianceResult::new(69.0, vec![], vec![], 70);
        assert!(!below.is_compliant);
    }

    #[test]
    fn any_violation_means_non_compliant() {
        let result = ComplianceResult::new(100.0, vec!["nope".into()], vec![], 70);
        assert!(!result.is_compliant);
    }

    #[test]
    fn empty_suggestions_are_absent() {
        let result = ComplianceResult::new(100.0, vec![], vec![], 70);
        assert!(result.suggestions.is_none());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("suggestions").is_none());
        assert_eq!(json["isCompliant"], true);
    }

    #[test]
    fn score_is_clamped_and_rounded() {
        assert_eq!(ComplianceResult::new(-35.0, vec![], vec![], 70).score, 0);
        assert_eq!(ComplianceResult::new(142.7, vec![], vec![], 70).score, 100);
        assert_eq!(ComplianceResult::new(84.6, vec![], vec![], 70).score, 85);
    }

    #[test]
    fn options_default_to_all_checks() {
        let opts: ComplianceOptions = serde_json::from_str(r#"{"validateMessaging": false}"#).unwrap();
        assert!(opts.enforce_brand_voice);
        assert!(opts.check_restricted_terms);
        assert!(!opts.validate_messaging);
    }

    #[test]
    fn card_accumulates_in_order() {
        let card = ScoreCard::new()
            .apply(RuleOutcome::flag("a", "fix a", 20.0))
            .apply(RuleOutcome::flag("b", "fix b", 15.0));
        assert_eq!(card.score, 65.0);
        assert_eq!(card.violations, vec!["a", "b"]);
        assert_eq!(card.suggestions, vec!["fix a", "fix b"]);
    }
}

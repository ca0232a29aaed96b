//! Messaging-pillar alignment

use crate::brand::MessagingPillar;
use crate::compliance::{RuleOutcome, ScoreCard};
use crate::config::ScoringPolicy;

/// Share of pillar keywords present in the content, 0-100.
///
/// Every pillar carries an equal slice of 100 points and earns the fraction of
/// its keywords found (case-insensitive substring). Empty frameworks score 0.
pub fn messaging_alignment(content: &str, pillars: &[MessagingPillar]) -> f64 {
    if pillars.is_empty() {
        return 0.0;
    }
    let haystack = content.to_lowercase();
    let weight = 100.0 / pillars.len() as f64;
    pillars
        .iter()
        .map(|pillar| {
            let keywords = pillar.effective_keywords();
            let matched = keywords
                .iter()
                .filter(|k| !k.is_empty() && haystack.contains(&k.to_lowercase()))
                .count();
            matched as f64 / keywords.len() as f64 * weight
        })
        .sum()
}

/// Penalize weak alignment, reward strong alignment.
///
/// Below `messaging_floor` the score is capped at `alignment + messaging_penalty_offset`
/// and a violation is recorded; otherwise it grows by `alignment / messaging_reward_divisor`
/// (capped at 100).
pub fn apply_messaging(
    card: ScoreCard,
    content: &str,
    pillars: &[MessagingPillar],
    policy: &ScoringPolicy,
) -> ScoreCard {
    let alignment = messaging_alignment(content, pillars);
    tracing::debug!("messaging alignment {:.1} across {} pillars", alignment, pillars.len());
    if alignment < policy.messaging_floor {
        let names: Vec<&str> = pillars.iter().map(|p| p.pillar.trim()).collect();
        card.apply(RuleOutcome::flag(
            "Content does not reinforce the brand messaging pillars",
            format!("Work in the key messaging pillars: {}", names.join(", ")),
            0.0,
        ))
        .rescore(|score| score.min(alignment + policy.messaging_penalty_offset))
    } else {
        card.rescore(|score| (score * (1.0 + alignment / policy.messaging_reward_divisor)).min(100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pillar(name: &str, keywords: &[&str]) -> MessagingPillar {
        MessagingPillar {
            pillar: name.to_string(),
            description: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn alignment_splits_weight_across_pillars() {
        let pillars = vec![
            pillar("Quality", &["durable", "handmade"]),
            pillar("Service", &["support"]),
        ];
        // Quality: 1/2 of 50, Service: 1/1 of 50
        let score = messaging_alignment("Durable goods with 24/7 support", &pillars);
        assert!((score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn pillar_text_stands_in_for_missing_keywords() {
        let pillars = vec![pillar("Sustainability", &[])];
        assert_eq!(messaging_alignment("Built for sustainability.", &pillars), 100.0);
        assert_eq!(messaging_alignment("Built to last.", &pillars), 0.0);
    }

    #[test]
    fn weak_alignment_caps_score_and_flags() {
        let pillars = vec![pillar("Quality", &["durable"]), pillar("Speed", &["fast"])];
        let card = apply_messaging(
            ScoreCard::new(),
            "Nothing relevant here",
            &pillars,
            &ScoringPolicy::default(),
        );
        assert_eq!(card.score, 50.0);
        assert_eq!(card.violations.len(), 1);
        assert_eq!(card.suggestions, vec!["Work in the key messaging pillars: Quality, Speed"]);
    }

    #[test]
    fn strong_alignment_rewards_up_to_cap() {
        let pillars = vec![pillar("Quality", &["durable"]), pillar("Speed", &["fast"])];
        let policy = ScoringPolicy::default();

        let card = ScoreCard::new().rescore(|_| 60.0);
        let card = apply_messaging(card, "Durable and fast", &pillars, &policy);
        assert!((card.score - 90.0).abs() < 1e-9);
        assert!(card.violations.is_empty());

        let full = apply_messaging(ScoreCard::new(), "Durable and fast", &pillars, &policy);
        assert_eq!(full.score, 100.0);
    }
}

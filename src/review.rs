//! Request-level entry points: validation, deadlines and concurrent review

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{AnalysisResult, ContentAnalyzer, ContentType};
use crate::brand::BrandProfile;
use crate::clients::TextGenerator;
use crate::compliance::{ComplianceAggregator, ComplianceOptions, ComplianceResult};
use crate::config::{Config, ScoringPolicy};
use crate::error::{BrandComplianceError, Result};
use crate::retry::RetryPolicy;
use crate::signals::SignalExtractor;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequest {
    pub content: String,
    pub brand: BrandProfile,
    #[serde(default)]
    pub options: ComplianceOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub content: String,
    pub brand: BrandProfile,
    pub content_type: ContentType,
    #[serde(default)]
    pub target_audience: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub content: String,
    pub brand: BrandProfile,
    #[serde(default)]
    pub options: ComplianceOptions,
    pub content_type: ContentType,
    #[serde(default)]
    pub target_audience: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    pub compliance: ComplianceResult,
    pub analysis: AnalysisResult,
}

/// Share of the request deadline each model signal may use. The remainder is
/// headroom for the aggregator to apply its provider-failure penalty.
const SIGNAL_BUDGET_SHARE: f64 = 0.8;

/// Compliance and analysis behind a per-request deadline
#[derive(Clone)]
pub struct ReviewService {
    aggregator: ComplianceAggregator,
    analyzer: ContentAnalyzer,
    deadline: Duration,
}

impl ReviewService {
    pub fn new(aggregator: ComplianceAggregator, analyzer: ContentAnalyzer, deadline: Duration) -> Self {
        Self {
            aggregator,
            analyzer,
            deadline,
        }
    }

    /// Wire everything from configuration. `generator` of `None` disables LLM-assisted steps.
    pub fn from_config(config: &Config, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let deadline = Duration::from_millis(config.server.request_timeout_ms);
        match generator {
            Some(generator) => {
                let extractor = SignalExtractor::new(generator, RetryPolicy::from_config(&config.retry))
                    .with_generation(config.provider.max_tokens, config.provider.temperature)
                    .with_budget(deadline.mul_f64(SIGNAL_BUDGET_SHARE));
                Self::new(
                    ComplianceAggregator::new(extractor.clone(), config.scoring.clone()),
                    ContentAnalyzer::new(extractor),
                    deadline,
                )
            }
            None => Self::new(
                ComplianceAggregator::rules_only(config.scoring.clone()),
                ContentAnalyzer::heuristics_only(),
                deadline,
            ),
        }
    }

    pub fn scoring(&self) -> &ScoringPolicy {
        self.aggregator.policy()
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Effective retry policy for provider calls; `None` without a provider
    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.aggregator.retry_policy()
    }

    async fn within_deadline<T>(&self, operation: &str, fut: impl Future<Output = T>) -> Result<T> {
        tokio::time::timeout(self.deadline, fut)
            .await
            .map_err(|_| BrandComplianceError::Timeout {
                operation: operation.to_string(),
                timeout_ms: self.deadline.as_millis() as u64,
            })
    }

    pub async fn check_compliance(&self, req: &ComplianceRequest) -> Result<ComplianceResult> {
        validate_input(&req.content, &req.brand)?;
        let result = self
            .within_deadline(
                "compliance",
                self.aggregator.aggregate(&req.content, &req.brand, &req.options),
            )
            .await?;
        info!(
            "compliance brand={} score={} compliant={}",
            req.brand.name, result.score, result.is_compliant
        );
        Ok(result)
    }

    pub async fn analyze(&self, req: &AnalysisRequest) -> Result<AnalysisResult> {
        validate_input(&req.content, &req.brand)?;
        let result = self
            .within_deadline(
                "analysis",
                self.analyzer.analyze(
                    &req.content,
                    &req.content_type,
                    &req.brand,
                    req.target_audience.as_deref(),
                ),
            )
            .await?;
        info!(
            "analysis brand={} type={} suggestions={}",
            req.brand.name,
            req.content_type,
            result.suggestions.len()
        );
        Ok(result)
    }

    /// Compliance and analysis share no state, so they run side by side
    pub async fn review(&self, req: &ReviewRequest) -> Result<ReviewResult> {
        validate_input(&req.content, &req.brand)?;
        let both = async {
            tokio::join!(
                self.aggregator.aggregate(&req.content, &req.brand, &req.options),
                self.analyzer.analyze(
                    &req.content,
                    &req.content_type,
                    &req.brand,
                    req.target_audience.as_deref(),
                ),
            )
        };
        let (compliance, analysis) = self.within_deadline("review", both).await?;
        info!(
            "review brand={} score={} suggestions={}",
            req.brand.name,
            compliance.score,
            analysis.suggestions.len()
        );
        Ok(ReviewResult {
            compliance,
            analysis,
        })
    }
}

fn validate_input(content: &str, brand: &BrandProfile) -> Result<()> {
    if content.trim().is_empty() {
        return Err(BrandComplianceError::validation("content must not be empty"));
    }
    brand.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_content_is_rejected_before_any_work() {
        let service = ReviewService::from_config(&Config::default(), None);
        let err = service
            .check_compliance(&ComplianceRequest {
                content: "   ".into(),
                brand: BrandProfile::new("Acme"),
                options: ComplianceOptions::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BrandComplianceError::Validation { .. }));
    }

    #[tokio::test]
    async fn missing_brand_name_is_rejected() {
        let service = ReviewService::from_config(&Config::default(), None);
        let err = service
            .analyze(&AnalysisRequest {
                content: "Some content".into(),
                brand: BrandProfile::new(""),
                content_type: ContentType::Email,
                target_audience: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BrandComplianceError::Validation { .. }));
    }
}

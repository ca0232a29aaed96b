//! Brand-compliance scoring and content analysis for generated marketing copy.
//!
//! The crate combines deterministic rule checks with LLM-derived signals into
//! a single compliance score, and derives content-quality suggestions on a
//! separate analysis path. Both are exposed in-process through
//! [`review::ReviewService`] and over HTTP through [`http::router`].

pub mod analysis;
pub mod brand;
pub mod clients;
pub mod compliance;
pub mod config;
pub mod deserializers;
pub mod error;
pub mod http;
pub mod retry;
pub mod review;
pub mod signals;
pub mod utils;

pub use analysis::{AnalysisResult, ContentAnalyzer, ContentType, Suggestion};
pub use brand::{BrandProfile, MessagingPillar};
pub use compliance::{ComplianceAggregator, ComplianceOptions, ComplianceResult};
pub use config::{Config, ScoringPolicy};
pub use error::{BrandComplianceError, Result};
pub use retry::RetryPolicy;
pub use review::ReviewService;
pub use signals::SignalExtractor;

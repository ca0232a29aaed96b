use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Text returned by a generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
}

impl Generation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A text-generation capability. Failures surface as
/// `BrandComplianceError::Provider` carrying the provider's status code when known.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Generation>;

    /// Short provider label for logs and `/info`
    fn name(&self) -> &str;
}

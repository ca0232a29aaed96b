pub mod fake;
pub mod openai;
pub mod traits;

pub use fake::FakeGenerator;
pub use openai::OpenAiGenerator;
pub use traits::{Generation, TextGenerator};

use std::sync::Arc;

use crate::config::{Config, ProviderKind};
use crate::error::{BrandComplianceError, Result};

/// Build the configured generator.
///
/// The OpenAI-compatible provider needs an API key; without one there is no
/// generator and LLM-assisted steps are skipped.
pub fn generator_from_config(config: &Config) -> Result<Option<Arc<dyn TextGenerator>>> {
    match config.provider.kind {
        ProviderKind::Fake => Ok(Some(Arc::new(FakeGenerator::neutral()))),
        ProviderKind::OpenAi => match config.runtime.api_key.clone() {
            Some(key) => {
                let generator = OpenAiGenerator::new(
                    key,
                    config.provider.base_url.clone(),
                    config.provider.model.clone(),
                    config.provider.timeout_ms,
                )
                .map_err(|e| BrandComplianceError::Config {
                    message: e.to_string(),
                })?;
                Ok(Some(Arc::new(generator)))
            }
            None => {
                tracing::warn!(
                    "No BRAND_LLM_API_KEY/OPENAI_API_KEY set; LLM-assisted checks are disabled"
                );
                Ok(None)
            }
        },
    }
}

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::error::{BrandComplianceError, Result};

/// Main configuration structure loaded from brand_compliance.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub retry: RetryConfig,
    pub scoring: ScoringPolicy,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// HTTP service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Deadline applied to each compliance/analysis request
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8790)),
            request_timeout_ms: 30_000,
        }
    }
}

/// Which text-generation backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Fake,
}

impl ProviderKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "fake" => Some(ProviderKind::Fake),
            _ => None,
        }
    }
}

/// Text-generation provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    pub model: String,
    pub timeout_ms: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_ms: 20_000,
            max_tokens: 300,
            temperature: 0.3,
        }
    }
}

/// Retry/backoff settings for provider calls
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_ms: u64,
    /// Test/CI mode: retries are disabled so runs stay fast and deterministic
    pub non_interactive: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
            jitter_ms: 1000,
            non_interactive: false,
        }
    }
}

/// Tunable constants of the compliance score.
///
/// Defaults reproduce the production arithmetic. The messaging constants in
/// particular are product policy and may be adjusted per deployment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub passing_score: u8,
    pub restricted_term_penalty: f64,
    pub min_content_chars: usize,
    pub short_content_penalty: f64,
    pub repetition_penalty: f64,
    pub voice_failure_penalty: f64,
    pub messaging_floor: f64,
    pub messaging_penalty_offset: f64,
    pub messaging_reward_divisor: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            passing_score: 70,
            restricted_term_penalty: 20.0,
            min_content_chars: 50,
            short_content_penalty: 15.0,
            repetition_penalty: 10.0,
            voice_failure_penalty: 5.0,
            messaging_floor: 30.0,
            messaging_penalty_offset: 50.0,
            messaging_reward_divisor: 200.0,
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            log_level: "brand_compliance=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            api_key: std::env::var("BRAND_LLM_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .filter(|k| !k.trim().is_empty()),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "brand_compliance=info".to_string()),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses BRAND_CONFIG or defaults to "brand_compliance.toml"; a missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        // Load environment variables:
        // 1) BRAND_ENV_FILE if set
        // 2) ./.env
        if let Ok(env_path) = std::env::var("BRAND_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }

        let path = std::env::var("BRAND_CONFIG").unwrap_or_else(|_| "brand_compliance.toml".into());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => Self::from_toml_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path);
                Self::default()
            }
            Err(e) => anyhow::bail!("Failed to read config file {}: {}", path, e),
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; sections and fields left out keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply BRAND_* environment overrides on top of file values
    pub fn apply_env_overrides(&mut self) {
        if let Some(bind) = env_parse::<SocketAddr>("BRAND_HTTP_BIND") {
            self.server.bind = bind;
        }
        if let Some(timeout) = env_parse::<u64>("BRAND_REQUEST_TIMEOUT_MS") {
            self.server.request_timeout_ms = timeout;
        }
        if let Some(kind) = std::env::var("BRAND_PROVIDER")
            .ok()
            .and_then(|v| ProviderKind::parse(&v))
        {
            self.provider.kind = kind;
        }
        if let Ok(url) = std::env::var("BRAND_LLM_BASE_URL") {
            self.provider.base_url = url;
        }
        if let Ok(model) = std::env::var("BRAND_LLM_MODEL") {
            self.provider.model = model;
        }
        if let Some(retries) = env_parse::<u32>("BRAND_RETRY_MAX") {
            self.retry.max_retries = retries;
        }
        if let Some(delay) = env_parse::<u64>("BRAND_RETRY_BASE_DELAY_MS") {
            self.retry.base_delay_ms = delay;
        }
        if let Some(delay) = env_parse::<u64>("BRAND_RETRY_MAX_DELAY_MS") {
            self.retry.max_delay_ms = delay;
        }
        // Either flag switches to non-interactive mode; neither can switch it back off
        if env_flag("BRAND_NON_INTERACTIVE").unwrap_or(false) || env_flag("CI").unwrap_or(false) {
            self.retry.non_interactive = true;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let fail = |message: &str| {
            Err(BrandComplianceError::Config {
                message: message.to_string(),
            })
        };
        if self.server.request_timeout_ms == 0 {
            return fail("server.request_timeout_ms must be > 0");
        }
        if self.provider.timeout_ms == 0 {
            return fail("provider.timeout_ms must be > 0");
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return fail("provider.temperature must be between 0.0 and 2.0");
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return fail("retry.base_delay_ms must not exceed retry.max_delay_ms");
        }
        if self.scoring.passing_score > 100 {
            return fail("scoring.passing_score must be between 0 and 100");
        }
        if self.scoring.messaging_reward_divisor <= 0.0 {
            return fail("scoring.messaging_reward_divisor must be > 0");
        }
        let scoring = &self.scoring;
        let non_negative = [
            ("scoring.restricted_term_penalty", scoring.restricted_term_penalty),
            ("scoring.short_content_penalty", scoring.short_content_penalty),
            ("scoring.repetition_penalty", scoring.repetition_penalty),
            ("scoring.voice_failure_penalty", scoring.voice_failure_penalty),
            ("scoring.messaging_floor", scoring.messaging_floor),
            ("scoring.messaging_penalty_offset", scoring.messaging_penalty_offset),
        ];
        if let Some((name, _)) = non_negative
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return fail(&format!("{name} must be a non-negative number"));
        }
        Ok(())
    }
}

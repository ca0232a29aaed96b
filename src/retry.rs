//! Retry with exponential backoff for text-generation calls

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::error::Result;

/// How often and how patiently a failing provider call is retried.
///
/// Built once from configuration and handed to whatever talks to the
/// provider; nothing reads retry settings from the environment at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
            jitter: Duration::from_millis(1000),
        }
    }

    /// Non-interactive mode pins retries to zero
    pub fn from_config(cfg: &RetryConfig) -> Self {
        let max_retries = if cfg.non_interactive {
            0
        } else {
            cfg.max_retries
        };
        Self {
            max_retries,
            base_delay: Duration::from_millis(cfg.base_delay_ms),
            max_delay: Duration::from_millis(cfg.max_delay_ms),
            jitter: Duration::from_millis(cfg.jitter_ms),
        }
    }

    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// `min(base * 2^attempt + rand(0..=jitter), max)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(31)));
        let jitter_ms = self.jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
        };
        exp.saturating_add(jitter).min(self.max_delay)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or retries are exhausted; the last error is returned in the latter cases.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("{} succeeded after {} retries", label, attempt);
                    }
                    return Ok(value);
                }
                Err(err) if !err.is_retryable() => {
                    debug!("{} failed with non-retryable error: {}", label, err);
                    return Err(err);
                }
                Err(err) if attempt >= self.max_retries => {
                    if self.max_retries > 0 {
                        warn!("{} giving up after {} retries: {}", label, attempt, err);
                    }
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        "{} attempt {} failed: {}. Retrying in {}ms...",
                        label,
                        attempt,
                        err,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_and_caps() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100), Duration::from_millis(500))
            .with_jitter(Duration::ZERO);
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for(3), Duration::from_millis(500));
        assert_eq!(policy.delay_for(40), Duration::from_millis(500));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100), Duration::from_secs(10))
            .with_jitter(Duration::from_millis(1000));
        for _ in 0..50 {
            let d = policy.delay_for(0);
            assert!(d >= Duration::from_millis(100));
            assert!(d <= Duration::from_millis(1100));
        }
    }

    #[test]
    fn non_interactive_config_disables_retries() {
        let cfg = RetryConfig {
            max_retries: 4,
            non_interactive: true,
            ..RetryConfig::default()
        };
        assert_eq!(RetryPolicy::from_config(&cfg).max_retries, 0);
        let cfg = RetryConfig {
            max_retries: 4,
            ..RetryConfig::default()
        };
        assert_eq!(RetryPolicy::from_config(&cfg).max_retries, 4);
    }
}

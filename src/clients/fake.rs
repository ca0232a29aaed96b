//! Deterministic, local text generator for testing/dev (no network)

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::clients::traits::{Generation, TextGenerator};
use crate::error::{BrandComplianceError, Result};

/// Reply that satisfies every structured prompt without moving any score
const NEUTRAL_REPLY: &str = "SCORE: 100\nSTATUS: COMPLIANT\nSENTIMENT: neutral\nBRAND_ALIGNMENT: 70\nTONE_ASSESSMENT: not assessed (fake provider)";

#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    Fail {
        status_code: Option<u16>,
        message: String,
    },
}

impl FakeReply {
    fn into_result(self) -> Result<Generation> {
        match self {
            FakeReply::Text(text) => Ok(Generation { text }),
            FakeReply::Fail {
                status_code,
                message,
            } => Err(BrandComplianceError::provider(message, status_code)),
        }
    }
}

/// Replays scripted replies in order, then keeps returning the fallback
#[derive(Debug)]
pub struct FakeGenerator {
    script: Mutex<VecDeque<FakeReply>>,
    fallback: FakeReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn with_fallback(fallback: FakeReply) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same text
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_fallback(FakeReply::Text(text.into()))
    }

    /// Answers every prompt with neutral signals
    pub fn neutral() -> Self {
        Self::replying(NEUTRAL_REPLY)
    }

    /// Every call fails with a provider error
    pub fn failing(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::with_fallback(FakeReply::Fail {
            status_code,
            message: message.into(),
        })
    }

    /// Queue a reply ahead of the fallback
    pub fn then(self, reply: FakeReply) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.then(FakeReply::Text(text.into()))
    }

    pub fn then_fail(self, status_code: Option<u16>, message: impl Into<String>) -> Self {
        self.then(FakeReply::Fail {
            status_code,
            message: message.into(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_text(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<Generation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());
        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.unwrap_or_else(|| self.fallback.clone()).into_result()
    }

    fn name(&self) -> &str {
        "fake"
    }
}

//! Brand profile as handed over by the web application.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::deserializers::{de_maybe_json_array, de_maybe_json_map};
use crate::error::{BrandComplianceError, Result};

/// Read-only description of a brand's voice, values, pillars and restricted vocabulary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub name: String,
    #[serde(default)]
    pub voice_description: Option<String>,
    #[serde(default)]
    pub communication_style: Option<String>,
    #[serde(default, deserialize_with = "de_maybe_json_map")]
    pub tone_attributes: Map<String, Value>,
    #[serde(default, deserialize_with = "de_maybe_json_array")]
    pub values: Vec<String>,
    #[serde(default, deserialize_with = "de_maybe_json_array")]
    pub messaging_framework: Vec<MessagingPillar>,
    #[serde(default, deserialize_with = "de_maybe_json_array")]
    pub restricted_terms: Vec<String>,
}

/// A theme brand content is expected to reinforce
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingPillar {
    pub pillar: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_maybe_json_array")]
    pub keywords: Vec<String>,
}

impl MessagingPillar {
    /// Keywords to look for; the pillar text itself when none are listed
    pub fn effective_keywords(&self) -> Vec<&str> {
        let explicit: Vec<&str> = self
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();
        if explicit.is_empty() {
            vec![self.pillar.trim()]
        } else {
            explicit
        }
    }
}

impl BrandProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice_description = Some(voice.into());
        self
    }

    pub fn with_restricted_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restricted_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pillar(mut self, pillar: MessagingPillar) -> Self {
        self.messaging_framework.push(pillar);
        self
    }

    /// Voice description if present and non-blank
    pub fn voice(&self) -> Option<&str> {
        self.voice_description
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Tone attributes rendered as `key: value` pairs for prompts
    pub fn tone_summary(&self) -> Option<String> {
        if self.tone_attributes.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .tone_attributes
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}: {s}"),
                other => format!("{k}: {other}"),
            })
            .collect();
        Some(parts.join(", "))
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BrandComplianceError::validation("brand name is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_database_row_with_encoded_columns() {
        let brand: BrandProfile = serde_json::from_value(json!({
            "name": "Acme",
            "voiceDescription": "Warm and direct",
            "toneAttributes": "{\"formality\": \"casual\"}",
            "values": "[\"honesty\", \"craft\"]",
            "messagingFramework": "[{\"pillar\": \"Quality\", \"keywords\": \"[\\\"durable\\\"]\"}]",
            "restrictedTerms": ["cheap"]
        }))
        .unwrap();
        assert_eq!(brand.values, vec!["honesty", "craft"]);
        assert_eq!(brand.restricted_terms, vec!["cheap"]);
        assert_eq!(brand.messaging_framework[0].keywords, vec!["durable"]);
        assert_eq!(brand.tone_summary().as_deref(), Some("formality: casual"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let brand: BrandProfile = serde_json::from_value(json!({"name": "Acme"})).unwrap();
        assert!(brand.voice().is_none());
        assert!(brand.messaging_framework.is_empty());
        assert!(brand.validate().is_ok());
    }

    #[test]
    fn pillar_without_keywords_uses_its_own_text() {
        let pillar = MessagingPillar {
            pillar: "Sustainability".into(),
            description: None,
            keywords: vec![" ".into()],
        };
        assert_eq!(pillar.effective_keywords(), vec!["Sustainability"]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = BrandProfile::new("  ").validate().unwrap_err();
        assert!(matches!(err, BrandComplianceError::Validation { .. }));
    }
}

//! Domain-specific error types for brand-compliance

use axum::{
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the compliance and analysis pipeline
#[derive(Error, Debug)]
pub enum BrandComplianceError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {message}")]
    Provider {
        message: String,
        status_code: Option<u16>,
        code: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BrandComplianceError {
    pub fn validation(message: impl Into<String>) -> Self {
        BrandComplianceError::Validation {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>, status_code: Option<u16>) -> Self {
        BrandComplianceError::Provider {
            message: message.into(),
            status_code,
            code: None,
        }
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// Validation and configuration problems never fix themselves. Provider
    /// client errors (4xx) are final too, except 429 which is a rate limit.
    pub fn is_retryable(&self) -> bool {
        match self {
            BrandComplianceError::Validation { .. } | BrandComplianceError::Config { .. } => false,
            BrandComplianceError::Provider {
                status_code: Some(status),
                ..
            } => !(400..500).contains(status) || *status == 429,
            _ => true,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            BrandComplianceError::Config { .. } => "config",
            BrandComplianceError::Validation { .. } => "validation",
            BrandComplianceError::Provider { .. } => "provider",
            BrandComplianceError::Timeout { .. } => "timeout",
            BrandComplianceError::Serialization { .. } => "serialization",
            BrandComplianceError::Internal { .. } => "internal",
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            BrandComplianceError::Validation { .. } => StatusCode::BAD_REQUEST,
            BrandComplianceError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            BrandComplianceError::Provider { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for BrandComplianceError {
    fn from(err: anyhow::Error) -> Self {
        BrandComplianceError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BrandComplianceError {
    fn from(err: serde_json::Error) -> Self {
        BrandComplianceError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for BrandComplianceError {
    fn from(err: reqwest::Error) -> Self {
        BrandComplianceError::Provider {
            message: format!("HTTP request failed: {}", err),
            status_code: err.status().map(|s| s.as_u16()),
            code: if err.is_timeout() {
                Some("timeout".to_string())
            } else {
                None
            },
        }
    }
}

impl From<toml::de::Error> for BrandComplianceError {
    fn from(err: toml::de::Error) -> Self {
        BrandComplianceError::Config {
            message: err.to_string(),
        }
    }
}

/// Unreadable request bodies (bad JSON, missing `brand`, wrong content type)
/// are caller errors like any other validation failure
impl From<JsonRejection> for BrandComplianceError {
    fn from(rejection: JsonRejection) -> Self {
        BrandComplianceError::Validation {
            message: rejection.body_text(),
        }
    }
}

/// Convert BrandComplianceError to an HTTP JSON response
impl IntoResponse for BrandComplianceError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        });
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

/// Result type alias for brand-compliance operations
pub type Result<T> = std::result::Result<T, BrandComplianceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_final_except_rate_limits() {
        assert!(!BrandComplianceError::provider("bad request", Some(400)).is_retryable());
        assert!(!BrandComplianceError::provider("unauthorized", Some(401)).is_retryable());
        assert!(BrandComplianceError::provider("slow down", Some(429)).is_retryable());
        assert!(BrandComplianceError::provider("upstream", Some(503)).is_retryable());
        assert!(BrandComplianceError::provider("connection reset", None).is_retryable());
    }

    #[test]
    fn validation_is_never_retried() {
        assert!(!BrandComplianceError::validation("missing brand").is_retryable());
        let timeout = BrandComplianceError::Timeout {
            operation: "generate_text".into(),
            timeout_ms: 10,
        };
        assert!(timeout.is_retryable());
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(
            BrandComplianceError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        let timeout = BrandComplianceError::Timeout {
            operation: "review".into(),
            timeout_ms: 5,
        };
        assert_eq!(timeout.http_status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            BrandComplianceError::provider("x", Some(502)).http_status(),
            StatusCode::BAD_GATEWAY
        );
    }
}

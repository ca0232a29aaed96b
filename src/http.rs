//! HTTP transport for brand-compliance
//!
//! Axum service exposing compliance, analysis and combined review endpoints.
//! Health and info are plain JSON. Authentication is handled upstream.

use axum::{
    Json, Router,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;

use crate::analysis::AnalysisResult;
use crate::compliance::ComplianceResult;
use crate::config::Config;
use crate::error::{BrandComplianceError, Result};
use crate::review::{AnalysisRequest, ComplianceRequest, ReviewRequest, ReviewResult, ReviewService};

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<Config>,
    pub service: Arc<ReviewService>,
    /// Provider label, or "none" when LLM-assisted checks are disabled
    pub provider: String,
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Info endpoint
pub async fn info_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let retry = state.service.retry_policy().map(|policy| {
        json!({
            "max_retries": policy.max_retries,
            "base_delay_ms": policy.base_delay.as_millis() as u64,
            "max_delay_ms": policy.max_delay.as_millis() as u64,
            "jitter_ms": policy.jitter.as_millis() as u64,
        })
    });
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "provider": {
                "kind": state.provider,
                "model": state.config.provider.model,
            },
            "retry": retry,
            "non_interactive": state.config.retry.non_interactive,
            "scoring": state.service.scoring(),
            "server": {
                "bind": state.config.server.bind.to_string(),
                "request_timeout_ms": state.config.server.request_timeout_ms,
            }
        })
        .to_string(),
    )
}

pub async fn compliance_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<ComplianceRequest>, JsonRejection>,
) -> Result<Json<ComplianceResult>> {
    let Json(req) = payload?;
    Ok(Json(state.service.check_compliance(&req).await?))
}

pub async fn analysis_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>> {
    let Json(req) = payload?;
    Ok(Json(state.service.analyze(&req).await?))
}

pub async fn review_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewResult>> {
    let Json(req) = payload?;
    Ok(Json(state.service.review(&req).await?))
}

/// Run every request inside a span tagged with a fresh request id
async fn request_span(req: Request<Body>, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        id = %request_id,
        method = %req.method(),
        path = %req.uri().path()
    );
    async move {
        let start = std::time::Instant::now();
        let resp = next.run(req).await;
        tracing::debug!(
            "completed status={} latency_ms={}",
            resp.status().as_u16(),
            start.elapsed().as_millis()
        );
        resp
    }
    .instrument(span)
    .await
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .route("/v1/compliance", post(compliance_handler))
        .route("/v1/analysis", post(analysis_handler))
        .route("/v1/review", post(review_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(request_span))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(state: HttpState) -> Result<()> {
    let bind = state.config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| BrandComplianceError::Config {
            message: format!("failed to bind {}: {}", bind, e),
        })?;
    tracing::info!("brand-compliance listening on http://{}", bind);
    axum::serve(listener, router(state))
        .await
        .map_err(|e| BrandComplianceError::Internal {
            message: format!("server error: {}", e),
        })
}

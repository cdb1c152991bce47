//! Readiness probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Model identifier this process is configured for.
    pub model: String,
    /// False until a model credential is configured; report and chat answer
    /// 503 while this is false.
    pub model_configured: bool,
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
        model: ctx.config.model.clone(),
        model_configured: ctx.model_configured(),
    })
}

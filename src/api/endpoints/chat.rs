//! Chat endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chat::{self, ChatMessage};

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Full conversation so far, oldest first.
    pub history: Vec<ChatMessage>,
    /// Summary of the previously generated report this conversation is about.
    #[serde(default)]
    pub report_summary: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// `POST /api/chat` — answer one follow-up turn about a prior report.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let model = ctx.model()?;
    let reply = chat::answer(model, &req.history, &req.report_summary).await?;
    Ok(Json(ChatResponse { reply }))
}

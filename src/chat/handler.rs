//! Chat turn orchestration: sanitize the history, assemble the bounded
//! knowledge base, make exactly one model call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{Content, ModelClient, ModelError, ModelRequest, Part};

use super::sanitize::sanitize_user_text;
use super::topics;

/// Chat turns are short; one minute is generous next to the report stages.
const CHAT_TIMEOUT: Duration = Duration::from_secs(60);

/// Substituted when a successful response carries no text.
const MISSING_REPLY_FALLBACK: &str =
    "The assistant could not produce a reply. Please ask again.";

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the conversation, as round-tripped by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat history is empty")]
    EmptyHistory,
    #[error("chat model call failed: {0}")]
    Upstream(#[from] ModelError),
}

/// System instruction: link policy over the fixed topic table, with the
/// prior report's summary as read-only context.
pub fn system_instruction(report_summary: &str) -> String {
    let summary = if report_summary.trim().is_empty() {
        "(no report summary was provided)"
    } else {
        report_summary
    };

    format!(
        "You are the follow-up assistant for a directional room assessment \
         service. Answer questions about the report summarized below.\n\n\
         Link policy:\n\
         - You may share links ONLY from this list, and only when the user's \
         question matches the topic:\n{links}\n\
         - When a topic matches, reply with the exact link as written above.\n\
         - When no topic matches, say plainly that no link is available for \
         that topic.\n\
         - NEVER invent, modify, or guess a link that is not in the list.\n\n\
         Report summary (read-only context, do not revise it):\n{summary}",
        links = topics::knowledge_base(),
    )
}

/// Answer one chat turn. User-authored entries are sanitized before
/// forwarding; model-authored entries pass through unmodified.
pub async fn answer(
    client: &dyn ModelClient,
    history: &[ChatMessage],
    report_summary: &str,
) -> Result<String, ChatError> {
    if history.is_empty() {
        return Err(ChatError::EmptyHistory);
    }

    let contents = history
        .iter()
        .map(|message| match message.role {
            ChatRole::User => Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(sanitize_user_text(&message.text))],
            },
            ChatRole::Model => Content {
                role: Some("model".to_string()),
                parts: vec![Part::text(message.text.clone())],
            },
        })
        .collect();

    let request = ModelRequest {
        contents,
        system_instruction: Some(system_instruction(report_summary)),
        timeout: CHAT_TIMEOUT,
    };

    tracing::debug!(turns = history.len(), "chat turn dispatched");
    let reply = client.generate(request).await?;
    Ok(reply.unwrap_or_else(|| MISSING_REPLY_FALLBACK.to_string()))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

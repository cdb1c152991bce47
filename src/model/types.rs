//! Wire types and error taxonomy for the hosted generation API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Content parts
// ──────────────────────────────────────────────

/// A single content part: text, or inline base64 image data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Inline image part. `data` must already be base64-encoded; scan
    /// submissions carry frames in that form end to end.
    pub fn inline_image(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

/// Base64 image payload with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// An ordered group of parts with an optional conversational role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// User-role content from a list of parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

// ──────────────────────────────────────────────
// Safety settings
// ──────────────────────────────────────────────

/// Per-category content-safety threshold.
#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Every category set to never auto-block. A blocked candidate would abort a
/// whole report over a benign interior photograph; the service never wants
/// the hosted side filtering on its behalf.
pub fn block_none_safety() -> Vec<SafetySetting> {
    SAFETY_CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_NONE",
        })
        .collect()
}

// ──────────────────────────────────────────────
// Request / response bodies
// ──────────────────────────────────────────────

/// Request body for `POST /v1beta/models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub safety_settings: Vec<SafetySetting>,
}

/// Response body. Fields the service does not consume are left unmapped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `None` when the
    /// response carries no text at all.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ──────────────────────────────────────────────
// Transport-agnostic request
// ──────────────────────────────────────────────

/// One request to the model boundary, as assembled by callers. The client
/// fills in safety settings and credentials when it goes on the wire.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Option<String>,
    /// Per-call deadline; exceeding it fails the enclosing request.
    pub timeout: Duration,
}

impl ModelRequest {
    /// Every text part of the request, concatenated. Test helper for
    /// asserting what a stage actually sent.
    pub fn text_of(&self) -> String {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of inline image parts across all contents.
    pub fn image_part_count(&self) -> usize {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter(|p| p.inline_data.is_some())
            .count()
    }
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors from the model boundary. A response that parses but carries no
/// text is NOT an error; callers receive `None` and substitute a fallback.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cannot reach the model endpoint at {0}")]
    Connect(String),
    #[error("model call timed out after {0}s")]
    Timeout(u64),
    #[error("model endpoint returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to decode model response: {0}")]
    ResponseParsing(String),
    #[error("failed to send model request: {0}")]
    Transport(String),
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

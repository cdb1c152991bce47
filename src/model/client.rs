//! HTTP client for the hosted generateContent endpoint, plus the mock used
//! throughout the test suite.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::types::{
    block_none_safety, Content, GenerateContentRequest, GenerateContentResponse, ModelError,
    ModelRequest, Part,
};

/// Connect timeout, distinct from the per-request deadline callers choose
/// per pipeline stage.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ──────────────────────────────────────────────
// ModelClient trait
// ──────────────────────────────────────────────

/// The model boundary: submit one multimodal prompt, receive text.
///
/// Returns `Ok(None)` when the call succeeded but the response carried no
/// text; callers substitute their fallback placeholder in that case.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: ModelRequest) -> Result<Option<String>, ModelError>;
}

// ──────────────────────────────────────────────
// GeminiClient
// ──────────────────────────────────────────────

/// Production client over the hosted generation API.
pub struct GeminiClient {
    api_base: String,
    model: String,
    api_key: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_base: &str, model: &str, api_key: &str) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            http,
        }
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: ModelRequest) -> Result<Option<String>, ModelError> {
        let timeout_secs = request.timeout.as_secs();
        let body = GenerateContentRequest {
            contents: request.contents,
            system_instruction: request.system_instruction.map(|text| Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            safety_settings: block_none_safety(),
        };

        let response = self
            .http
            .post(self.endpoint_url())
            // Credential goes in a header so it never lands in access logs.
            .header("x-goog-api-key", &self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(timeout_secs)
                } else if e.is_connect() {
                    ModelError::Connect(self.api_base.clone())
                } else {
                    ModelError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::ResponseParsing(e.to_string()))?;

        Ok(parsed.first_text())
    }
}

// ──────────────────────────────────────────────
// MockModelClient (testing)
// ──────────────────────────────────────────────

/// Scripted outcome for one mock call.
enum ScriptedOutcome {
    Text(String),
    Empty,
    Fail(ModelError),
}

/// Mock model client — plays back scripted outcomes in order and records
/// every request it receives, so tests can assert on what each pipeline
/// stage actually sent. When the script runs dry it returns the fallback
/// reply (empty text response if none was configured).
#[derive(Default)]
pub struct MockModelClient {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    fallback_reply: Option<String>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers every call with the same text.
    pub fn replying(text: &str) -> Self {
        Self {
            fallback_reply: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Queue a text reply for the next unscripted call.
    pub fn then_text(self, text: &str) -> Self {
        self.push(ScriptedOutcome::Text(text.to_string()))
    }

    /// Queue a successful call that carries no text.
    pub fn then_empty(self) -> Self {
        self.push(ScriptedOutcome::Empty)
    }

    /// Queue a failure.
    pub fn then_error(self, err: ModelError) -> Self {
        self.push(ScriptedOutcome::Fail(err))
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    fn push(self, outcome: ScriptedOutcome) -> Self {
        self.script
            .lock()
            .expect("mock lock poisoned")
            .push_back(outcome);
        self
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(&self, request: ModelRequest) -> Result<Option<String>, ModelError> {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        let scripted = self.script.lock().expect("mock lock poisoned").pop_front();
        match scripted {
            Some(ScriptedOutcome::Text(text)) => Ok(Some(text)),
            Some(ScriptedOutcome::Empty) => Ok(None),
            Some(ScriptedOutcome::Fail(err)) => Err(err),
            None => Ok(self.fallback_reply.clone()),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

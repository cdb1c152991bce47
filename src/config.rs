//! Process configuration, read once from the environment at startup.
//!
//! The model credential is deliberately carried as `Option<String>` instead
//! of failing startup: the service comes up without it and every endpoint
//! that would call out answers 503 until the key is provided. This keeps the
//! credential-absent path testable without touching the process environment.

use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Orienta";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const ENV_API_KEY: &str = "ORIENTA_API_KEY";
const ENV_API_BASE: &str = "ORIENTA_API_BASE";
const ENV_MODEL: &str = "ORIENTA_MODEL";
const ENV_BIND: &str = "ORIENTA_BIND";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Immutable process configuration, injected into the API layer at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Hosted model credential. Absent means report/chat answer 503.
    pub api_key: Option<String>,
    /// Base URL of the hosted generation API.
    pub api_base: String,
    /// Model identifier passed in the request path.
    pub model: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the environment. Never fails: a missing key
    /// is recorded as `None`, an unparseable bind address falls back to the
    /// default with a warning.
    pub fn from_env() -> Self {
        let bind_addr = match std::env::var(ENV_BIND) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(%raw, "invalid {ENV_BIND}, using default {DEFAULT_BIND}");
                default_bind_addr()
            }),
            Err(_) => default_bind_addr(),
        };

        Self {
            api_key: env_nonempty(ENV_API_KEY),
            api_base: env_nonempty(ENV_API_BASE)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: env_nonempty(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            bind_addr,
        }
    }

    /// Config with a credential set, used by tests and embedders.
    pub fn with_api_key(key: &str) -> Self {
        Self {
            api_key: Some(key.to_string()),
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}

/// Env var as `Some` only when set and non-empty after trimming.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Default log filter for `tracing_subscriber` when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,orienta=debug"
}

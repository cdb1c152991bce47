//! Shared state for the API layer.

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::config::AppConfig;
use crate::model::{GeminiClient, ModelClient};

/// Shared context for all API routes. Built once at startup and cloned per
/// request; everything inside is immutable. The model client exists only
/// when a credential was configured.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    model: Option<Arc<dyn ModelClient>>,
}

impl ApiContext {
    /// Production constructor: wires the hosted client when the credential
    /// is present, leaves the boundary unconfigured otherwise.
    pub fn from_config(config: AppConfig) -> Self {
        let model = config.api_key.as_ref().map(|key| {
            Arc::new(GeminiClient::new(&config.api_base, &config.model, key))
                as Arc<dyn ModelClient>
        });
        Self {
            config: Arc::new(config),
            model,
        }
    }

    /// Constructor with an injected model client. Used by tests and by
    /// embedders that bring their own boundary implementation.
    pub fn with_model(config: AppConfig, model: Arc<dyn ModelClient>) -> Self {
        Self {
            config: Arc::new(config),
            model: Some(model),
        }
    }

    /// Whether a model client is wired at all.
    pub fn model_configured(&self) -> bool {
        self.model.is_some()
    }

    /// The model boundary, or the configuration error every calling
    /// endpoint maps to 503.
    pub fn model(&self) -> Result<&dyn ModelClient, ApiError> {
        self.model
            .as_deref()
            .ok_or(ApiError::ModelUnconfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockModelClient;

    #[test]
    fn no_credential_means_no_model() {
        let ctx = ApiContext::from_config(AppConfig::default());
        assert!(!ctx.model_configured());
        assert!(ctx.model().is_err());
    }

    #[test]
    fn credential_wires_the_hosted_client() {
        let ctx = ApiContext::from_config(AppConfig::with_api_key("key"));
        assert!(ctx.model_configured());
        assert!(ctx.model().is_ok());
    }

    #[test]
    fn injected_model_is_used_regardless_of_credential() {
        let ctx = ApiContext::with_model(
            AppConfig::default(),
            Arc::new(MockModelClient::replying("ok")),
        );
        assert!(ctx.model_configured());
    }
}

//! Hosted chat-completion client
//!
//! Sends a single user turn to the configured provider's OpenAI-style endpoint and returns the
//! first choice's text. A reply that is not JSON is taken verbatim as the completion.

use super::client::CompletionClient;
use super::error::ProviderError;
use super::provider::Provider;
use super::types::{ChatCompletion, ChatRequest};
use crate::config::{ConfigError, LaunchpadConfig};
use crate::http::{HttpError, HttpRequest, HttpTransport};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Fixed low sampling temperature for scaffold generation
pub const SAMPLING_TEMPERATURE: f64 = 0.2;

pub struct ProviderClient {
    provider: Provider,
    model: String,
    api_key: String,
    transport: Arc<dyn HttpTransport>,
}

impl ProviderClient {
    /// Builds a client for the configured provider
    ///
    /// Fails with [`ConfigError::MissingVariable`] when the provider's credential is absent.
    pub fn from_config(
        config: &LaunchpadConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ConfigError> {
        let api_key = config
            .provider_api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingVariable(config.provider.api_key_var().to_string()))?;

        Ok(Self::new(config.provider, config.model.clone(), api_key, transport))
    }

    pub fn new(
        provider: Provider,
        model: String,
        api_key: String,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            provider,
            model,
            api_key,
            transport,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    fn extract_text(&self, body: &str, is_json: bool) -> Result<String, ProviderError> {
        if !is_json {
            if let Ok(completion) = serde_json::from_str::<ChatCompletion>(body) {
                if let Some(choice) = completion.choices.into_iter().next() {
                    return Ok(choice.message.content.trim().to_string());
                }
            }
            return Ok(body.trim().to_string());
        }

        let completion: ChatCompletion =
            serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse {
                message: format!("malformed completion JSON: {}", e),
                raw_response: Some(body.to_string()),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| ProviderError::InvalidResponse {
                message: "completion has no choices".to_string(),
                raw_response: Some(body.to_string()),
            })
    }
}

impl CompletionClient for ProviderClient {
    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let start = Instant::now();
        let payload = ChatRequest::single_turn(&self.model, prompt, SAMPLING_TEMPERATURE);
        let body = serde_json::to_value(&payload).map_err(|e| ProviderError::Other {
            message: e.to_string(),
        })?;

        let request = HttpRequest::post(self.provider.endpoint())
            .bearer(&self.api_key)
            .json(body);

        debug!(provider = %self.provider, model = %self.model, prompt_len = prompt.len(), "Requesting completion");

        let response = self
            .transport
            .send_checked(&request)
            .map_err(|e| match e {
                HttpError::Status { status, body, .. } => ProviderError::Http { status, body },
                other => ProviderError::Transport {
                    message: other.to_string(),
                },
            })?;

        let text = self.extract_text(&response.body, response.is_json())?;

        info!(
            provider = %self.provider,
            chars = text.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Completion received"
        );

        Ok(text)
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI, Google Gemini,
//! Mistral and any self-hosted endpoint that speaks the chat completions
//! protocol, via configurable base URLs and factory functions.
//!
//! The provider only opens the exchange: it POSTs the request, maps error
//! statuses and hands the raw body to the engine as a byte stream.

pub mod config;

use std::time::Duration;

use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use hydrowatt_core::llm::provider::{ByteStream, LlmProvider};
use hydrowatt_types::llm::{CompletionRequest, LlmError};

use self::config::{OpenAiCompatConfig, completions_url};

/// Longest error body excerpt carried into an [`LlmError`].
const MAX_ERROR_BODY: usize = 300;

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and only exposed when the
/// `Authorization` header is built. The type does NOT derive Debug.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    provider_name: String,
    completions_url: String,
    api_key: SecretString,
}

impl OpenAiCompatibleProvider {
    /// Create a provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        // No overall timeout: a streamed reply may legitimately run for minutes.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            completions_url: completions_url(&config.base_url),
            provider_name: config.provider_name,
            api_key: config.api_key,
        })
    }

    /// Create an OpenAI provider.
    pub fn openai(api_key: SecretString) -> Result<Self, LlmError> {
        Self::new(config::openai_defaults(api_key))
    }

    /// Create a Google Gemini provider (OpenAI-compatible beta endpoint).
    pub fn gemini(api_key: SecretString) -> Result<Self, LlmError> {
        Self::new(config::gemini_defaults(api_key))
    }

    /// Create a Mistral AI provider.
    pub fn mistral(api_key: SecretString) -> Result<Self, LlmError> {
        Self::new(config::mistral_defaults(api_key))
    }

    /// Full URL requests are sent to.
    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn open_stream(&self, request: &CompletionRequest) -> Result<ByteStream, LlmError> {
        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(self.api_key.expose_secret())
            .header("accept", "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("{} request failed: {e}", self.provider_name),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs * 1000);
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_status(status.as_u16(), retry_after_ms, &error_body));
        }

        debug!(
            provider = %self.provider_name,
            status = status.as_u16(),
            "Completion stream opened"
        );

        let body = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| LlmError::Stream(format!("response body read: {e}")))
        });
        Ok(Box::pin(body))
    }
}

/// Map a non-success HTTP status to an [`LlmError`].
fn map_status(status: u16, retry_after_ms: Option<u64>, body: &str) -> LlmError {
    match status {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited { retry_after_ms },
        _ => {
            let excerpt: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
            LlmError::Provider {
                message: format!("HTTP {status}: {excerpt}"),
            }
        }
    }
}

//! Generic client for OpenAI-compatible APIs.

use super::conversions::{self, SamplingDefaults};
use super::dto::{ChatRequest, ChatResponse};
use crate::GatewayConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use storyagent_core::{GenerateRequest, GenerateResponse};
use storyagent_error::{GatewayError, GatewayErrorKind, RetryableError, StoryResult};
use storyagent_interface::ModelGateway;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialFactorBackoff, strategy::jitter};
use tracing::{debug, error, instrument, warn};

/// Generic client for any OpenAI-compatible API.
///
/// Transient failures (transport errors, rate limits, 5xx statuses) are
/// retried with exponential backoff, so one call makes at most
/// `1 + max_retries` requests. Everything else fails on the first attempt.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider_name: &'static str,
    sampling: SamplingDefaults,
    max_retries: usize,
    retry_backoff_ms: u64,
    retry_max_delay_ms: u64,
}

impl OpenAICompatibleClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `model` - Model used when a request does not name one
    /// * `provider_name` - Name of the provider (for logging/tracing)
    /// * `config` - Endpoint, timeout, sampling and retry settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[instrument(skip(api_key, config), fields(provider = provider_name, model = %model))]
    pub fn new(
        api_key: String,
        model: String,
        provider_name: &'static str,
        config: &GatewayConfig,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| {
                GatewayError::new(GatewayErrorKind::Request(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        debug!(
            provider = provider_name,
            model = %model,
            url = %config.base_url(),
            max_retries = *config.max_retries(),
            "Created OpenAI-compatible client"
        );

        Ok(Self {
            client,
            api_key,
            model,
            base_url: config.base_url().clone(),
            provider_name,
            sampling: SamplingDefaults {
                temperature: *config.temperature(),
                max_tokens: *config.max_tokens(),
            },
            max_retries: *config.max_retries(),
            retry_backoff_ms: *config.retry_backoff_ms(),
            retry_max_delay_ms: *config.retry_max_delay_ms(),
        })
    }

    /// Sends one request without retrying.
    async fn send_once(&self, chat_request: &ChatRequest) -> Result<GenerateResponse, GatewayError> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.provider_name, error = ?e, "HTTP request failed");
                GatewayError::new(GatewayErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                provider = self.provider_name,
                status = %status,
                error = %error_text,
                "API error"
            );
            return Err(GatewayError::new(conversions::classify_status(
                status.as_u16(),
                &error_text,
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "Failed to parse response");
            GatewayError::new(GatewayErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        debug!(
            provider = self.provider_name,
            choices = chat_response.choices.len(),
            "Received response"
        );

        conversions::from_chat_response(&chat_response)
    }

    /// Sends a request, retrying transient failures.
    #[instrument(skip(self, req), fields(provider = self.provider_name))]
    pub async fn send(&self, req: &GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        let chat_request = conversions::to_chat_request(req, &self.model, self.sampling)?;

        debug!(
            provider = self.provider_name,
            model = %chat_request.model(),
            message_count = chat_request.messages().len(),
            "Sending request"
        );

        // First delay is retry_backoff_ms, doubling on each further retry.
        let retry_strategy = ExponentialFactorBackoff::from_millis(self.retry_backoff_ms, 2.0)
            .max_delay_millis(self.retry_max_delay_ms)
            .map(jitter)
            .take(self.max_retries);

        let chat_request = &chat_request;
        Retry::spawn(retry_strategy, move || async move {
            match self.send_once(chat_request).await {
                Ok(response) => Ok(response),
                Err(e) if e.is_retryable() => {
                    warn!(
                        error = %e,
                        max_retries = self.max_retries,
                        "Transient gateway error, will retry if attempts remain"
                    );
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    debug!(error = %e, "Permanent gateway error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }

    /// Returns the default model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ModelGateway for OpenAICompatibleClient {
    async fn generate(&self, req: &GenerateRequest) -> StoryResult<GenerateResponse> {
        Ok(self.send(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.provider_name
    }
}

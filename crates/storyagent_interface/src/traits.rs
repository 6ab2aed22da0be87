//! Trait definitions for the model gateway and turn observers.

use crate::TurnRecord;
use async_trait::async_trait;
use storyagent_core::{GenerateRequest, GenerateResponse, Message};
use storyagent_error::{GatewayError, GatewayErrorKind, StoryResult};

/// Text-in, text-out access to a language model.
///
/// Implementations own their credentials and connection settings; callers
/// only pass prompts and a model identifier. Calls are made one at a time.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generate a completion for a chat request.
    async fn generate(&self, req: &GenerateRequest) -> StoryResult<GenerateResponse>;

    /// Provider name (e.g., "deepseek").
    fn provider_name(&self) -> &'static str;

    /// Single round-trip completion of one prompt against `model`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the call fails or the completion is
    /// empty or whitespace.
    async fn complete(&self, prompt: &str, model: &str) -> StoryResult<String> {
        let request = GenerateRequest::builder()
            .messages(vec![Message::user(prompt)])
            .model(model.to_string())
            .build()
            .map_err(|e| {
                GatewayError::new(GatewayErrorKind::Request(format!(
                    "Invalid completion request: {}",
                    e
                )))
            })?;

        let response = self.generate(&request).await?;
        if response.text().trim().is_empty() {
            tracing::error!(
                provider = self.provider_name(),
                model,
                "Model returned an empty completion"
            );
            return Err(GatewayError::new(GatewayErrorKind::EmptyResponse).into());
        }

        if let Some(usage) = response.usage() {
            tracing::debug!(
                provider = self.provider_name(),
                input_tokens = *usage.input_tokens(),
                output_tokens = *usage.output_tokens(),
                "Completion token usage"
            );
        }

        Ok(response.text().clone())
    }
}

/// Receives every committed turn, in order.
pub trait TurnObserver: Send + Sync {
    /// Called after a turn's new state has been committed.
    fn on_turn(&self, record: &TurnRecord);
}

//! Request and response types for model gateway calls.

use crate::Message;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A text generation request.
///
/// # Examples
///
/// ```
/// use storyagent_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .model("deepseek-chat".to_string())
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(request.model().as_deref(), Some("deepseek-chat"));
/// assert!(request.temperature().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Conversation messages
    messages: Vec<Message>,
    /// Model identifier; the gateway's default when absent
    #[builder(default)]
    model: Option<String>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
}

impl GenerateRequest {
    /// Creates a builder for GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct TokenUsage {
    /// Tokens in the prompt
    input_tokens: u64,
    /// Tokens in the completion
    output_tokens: u64,
    /// Total tokens billed
    total_tokens: u64,
}

impl TokenUsage {
    /// Creates new token usage data.
    pub fn new(input_tokens: u64, output_tokens: u64, total_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// A completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerateResponse {
    /// Completion text
    text: String,
    /// Why the model stopped, as reported by the provider
    finish_reason: Option<String>,
    /// Token accounting, when reported
    usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Create a response.
    pub fn new(
        text: impl Into<String>,
        finish_reason: Option<String>,
        usage: Option<TokenUsage>,
    ) -> Self {
        Self {
            text: text.into(),
            finish_reason,
            usage,
        }
    }

    /// A response carrying only text.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, None, None)
    }
}

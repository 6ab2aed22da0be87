//! DeepSeek model gateway.

use crate::{GatewayConfig, OpenAICompatibleClient};
use async_trait::async_trait;
use storyagent_core::{GenerateRequest, GenerateResponse};
use storyagent_error::{GatewayError, GatewayErrorKind, StoryResult};
use storyagent_interface::ModelGateway;
use tracing::{debug, instrument};

/// Models served by the DeepSeek chat-completions endpoint.
const SUPPORTED_MODELS: &[&str] = &["deepseek-chat", "deepseek-reasoner"];

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "deepseek-chat";

/// Gateway to DeepSeek's OpenAI-compatible API.
///
/// The API key is read from the environment variable named by
/// [`GatewayConfig::api_key_env`] (`DEEPSEEK_API_KEY` by default).
#[derive(Debug, Clone)]
pub struct DeepSeekGateway {
    inner: OpenAICompatibleClient,
}

impl DeepSeekGateway {
    /// Creates a gateway, reading the API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayErrorKind::MissingApiKey`] if the variable is unset
    /// or empty.
    #[instrument(skip(config), fields(api_key_env = %config.api_key_env()))]
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = std::env::var(config.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::new(GatewayErrorKind::MissingApiKey(format!(
                    "environment variable {} is not set",
                    config.api_key_env()
                )))
            })?;

        Self::with_api_key(api_key, config)
    }

    /// Creates a gateway with an explicit API key.
    pub fn with_api_key(
        api_key: impl Into<String>,
        config: &GatewayConfig,
    ) -> Result<Self, GatewayError> {
        let inner = OpenAICompatibleClient::new(
            api_key.into(),
            DEFAULT_MODEL.to_string(),
            "deepseek",
            config,
        )?;
        debug!(url = %inner.base_url(), "Created DeepSeek gateway");
        Ok(Self { inner })
    }

    /// Model identifiers this gateway knows about.
    pub fn supported_models() -> &'static [&'static str] {
        SUPPORTED_MODELS
    }

    /// Whether `model` is one of [`supported_models`](Self::supported_models).
    pub fn is_supported(model: &str) -> bool {
        SUPPORTED_MODELS.contains(&model)
    }
}

#[async_trait]
impl ModelGateway for DeepSeekGateway {
    async fn generate(&self, req: &GenerateRequest) -> StoryResult<GenerateResponse> {
        self.inner.generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        "deepseek"
    }
}

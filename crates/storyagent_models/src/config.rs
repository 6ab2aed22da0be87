//! Gateway connection settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Default chat-completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/chat/completions";

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Connection and sampling settings owned by a gateway client.
///
/// Credentials are not stored here; only the name of the environment
/// variable to read them from.
///
/// # Examples
///
/// ```
/// use storyagent_models::GatewayConfig;
///
/// let config = GatewayConfig::builder()
///     .max_retries(0usize)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_key_env(), "DEEPSEEK_API_KEY");
/// assert_eq!(*config.max_retries(), 0);
/// assert_eq!(*config.temperature(), Some(0.0));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Chat-completions endpoint URL
    base_url: String,
    /// Environment variable holding the bearer token
    api_key_env: String,
    /// Sampling temperature sent with every request
    temperature: Option<f32>,
    /// Completion length cap sent with every request
    max_tokens: Option<u32>,
    /// Per-request timeout
    timeout_secs: u64,
    /// Retries for transient failures; 0 disables retrying
    max_retries: usize,
    /// Delay before the first retry; doubles on each further retry
    retry_backoff_ms: u64,
    /// Cap on a single retry delay
    retry_max_delay_ms: u64,
}

impl GatewayConfig {
    /// Creates a builder for GatewayConfig.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: Some(0.0),
            max_tokens: None,
            timeout_secs: 120,
            max_retries: 2,
            retry_backoff_ms: 1000,
            retry_max_delay_ms: 30_000,
        }
    }
}

//! Live DeepSeek tests.
//!
//! These make real API calls and only run with `--features api`.

use storyagent_interface::ModelGateway;
use storyagent_models::{DeepSeekGateway, GatewayConfig};

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)] // Requires DEEPSEEK_API_KEY
async fn test_deepseek_completes_a_prompt() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = GatewayConfig::builder()
        .max_tokens(Some(32u32))
        .build()?;
    let gateway = DeepSeekGateway::new(&config)?;

    let text = gateway
        .complete("Reply with the single word: ready", "deepseek-chat")
        .await?;

    assert!(!text.trim().is_empty());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_deepseek_rejects_bad_key() -> anyhow::Result<()> {
    let gateway = DeepSeekGateway::with_api_key("sk-invalid", &GatewayConfig::default())?;

    let result = gateway.complete("Hello", "deepseek-chat").await;
    assert!(result.is_err());
    Ok(())
}

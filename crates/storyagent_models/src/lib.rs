//! Model gateway implementations for StoryAgent.
//!
//! The story engine only needs text-in, text-out completions. This crate
//! provides a client for any OpenAI-compatible chat-completions endpoint,
//! and a DeepSeek gateway built on it.
//!
//! ```no_run
//! use storyagent_interface::ModelGateway;
//! use storyagent_models::{DeepSeekGateway, GatewayConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = DeepSeekGateway::new(&GatewayConfig::default())?;
//! let text = gateway.complete("Describe a misty forest.", "deepseek-chat").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod deepseek;
mod openai_compat;

pub use config::{GatewayConfig, GatewayConfigBuilder};
pub use deepseek::DeepSeekGateway;
pub use openai_compat::{ChatMessage, ChatRequest, ChatResponse, OpenAICompatibleClient};

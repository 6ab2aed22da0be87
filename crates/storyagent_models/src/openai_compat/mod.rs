//! Generic OpenAI-compatible API client.
//!
//! Any provider that speaks the OpenAI chat-completions format can be
//! reached through [`OpenAICompatibleClient`]. DeepSeek is one of them.

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{ChatMessage, ChatRequest, ChatResponse};

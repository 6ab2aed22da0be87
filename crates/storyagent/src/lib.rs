//! StoryAgent: turn-based role-play story generation.
//!
//! A controller, a cast of characters and a writer take turns calling a
//! language model. The controller keeps the world state current and picks
//! who acts next, each character speaks and acts in role, and once the
//! acting budget is spent the writer turns the transcript into a story.
//!
//! This crate re-exports the workspace crates and adds run configuration
//! loading and logging setup for the `storyagent` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{CastConfig, ConfigOverrides, LogConfig, StoryConfig};
pub use observability::{ObservabilityConfig, init_observability};

pub use storyagent_core::*;
pub use storyagent_error::*;
pub use storyagent_interface::*;
pub use storyagent_models::{DeepSeekGateway, GatewayConfig, OpenAICompatibleClient};
pub use storyagent_narrative::*;

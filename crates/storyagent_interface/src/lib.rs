//! Trait definitions for the StoryAgent story engine.
//!
//! This crate provides the seams between the turn-taking core and its
//! collaborators: the model gateway that turns prompts into text, and
//! observers that watch each committed turn.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ModelGateway, TurnObserver};
pub use types::{TurnRecord, UnitKind};

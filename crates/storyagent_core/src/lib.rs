//! Core data types for the StoryAgent story engine.
//!
//! This crate holds the shared narrative state threaded through every turn:
//! participant descriptors, the append-only transcript, the story state
//! itself, and the tag grammar used to exchange structured data with the
//! language model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actor;
mod message;
mod registry;
mod request;
mod state;
mod tags;
mod transcript;
mod world;

pub use actor::{ActorDescriptor, ActorDescriptorBuilder, ActorId};
pub use message::{Message, MessageBuilder, Role};
pub use registry::ActorRegistry;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, TokenUsage};
pub use state::{CurrentActor, StoryState};
pub use tags::{ControllerDirective, Tag, extract_first, regions, strip_regions};
pub use transcript::{Speaker, Transcript, TranscriptEntry, WRITER_LABEL};
pub use world::WorldDescriptor;

//! Shared story state threaded through every turn.

use crate::{ActorId, ActorRegistry, Transcript, TranscriptEntry, WorldDescriptor};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Who the story is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum CurrentActor {
    /// The controller has not yet chosen a speaker
    #[display("controller")]
    Controller,
    /// An actor, either chosen by the controller or the one that just acted
    #[display("{}", _0)]
    Actor(ActorId),
    /// The writer has finished; nothing else runs
    #[display("END")]
    Finished,
}

/// The unit of exchange between every participant.
///
/// Participants never mutate a state in place: each transition reads a
/// state and returns a brand-new one.
///
/// # Examples
///
/// ```
/// use storyagent_core::{ActorRegistry, CurrentActor, StoryState, WorldDescriptor};
///
/// let world = WorldDescriptor::new("Borderlands", vec![], "Calm");
/// let state = StoryState::new(ActorRegistry::new(), world);
///
/// assert!(state.messages().is_empty());
/// assert_eq!(state.current_actor(), &CurrentActor::Controller);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct StoryState {
    /// Append-only transcript
    messages: Transcript,
    /// Participant registry
    actors: ActorRegistry,
    /// Who acts next, or who just acted
    current_actor: CurrentActor,
    /// World descriptor with the current situation
    world: WorldDescriptor,
}

impl StoryState {
    /// Initial state: empty transcript, waiting on the controller.
    pub fn new(actors: ActorRegistry, world: WorldDescriptor) -> Self {
        Self {
            messages: Transcript::new(),
            actors,
            current_actor: CurrentActor::Controller,
            world,
        }
    }

    /// A new state with `entry` appended and `current_actor` replaced.
    pub fn with_entry(&self, entry: TranscriptEntry, current_actor: CurrentActor) -> Self {
        Self {
            messages: self.messages.appended(entry),
            actors: self.actors.clone(),
            current_actor,
            world: self.world.clone(),
        }
    }

    /// A new state with the world and `current_actor` replaced; transcript unchanged.
    pub fn with_routing(&self, world: WorldDescriptor, current_actor: CurrentActor) -> Self {
        Self {
            messages: self.messages.clone(),
            actors: self.actors.clone(),
            current_actor,
            world,
        }
    }
}

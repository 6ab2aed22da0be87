//! Character unit.

use crate::{TurnOutcome, prompt};
use std::sync::Arc;
use storyagent_core::{ActorDescriptor, ActorId, CurrentActor, Speaker, StoryState, TranscriptEntry};
use storyagent_error::StoryResult;
use storyagent_interface::{ModelGateway, UnitKind};
use tracing::{debug, info, instrument};

/// Plays one character.
///
/// Built once per registered actor and closed over that actor's id and
/// descriptor. The unit assumes the scheduler only dispatches it when its
/// actor was selected.
#[derive(Debug)]
pub struct ActorUnit<G: ModelGateway> {
    id: ActorId,
    descriptor: ActorDescriptor,
    gateway: Arc<G>,
    model: String,
}

impl<G: ModelGateway> ActorUnit<G> {
    /// Create a unit for one actor.
    pub fn new(
        id: ActorId,
        descriptor: ActorDescriptor,
        gateway: Arc<G>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id,
            descriptor,
            gateway,
            model: model.into(),
        }
    }

    /// The actor this unit plays.
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Which unit this is, for turn records and error context.
    pub fn unit(&self) -> UnitKind {
        UnitKind::Actor(self.id.clone())
    }

    /// Take one acting turn.
    ///
    /// Appends `(self, raw response)` to the transcript and records this
    /// actor as the one who last acted. The world is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the model call fails or the completion is
    /// empty.
    #[instrument(skip(self, state), fields(actor_id = %self.id, model = %self.model))]
    pub async fn act(&self, state: &StoryState) -> StoryResult<TurnOutcome> {
        let prompt = prompt::actor_prompt(&self.id, &self.descriptor, state);
        debug!(prompt_len = prompt.len(), "Built actor prompt");

        let response = self.gateway.complete(&prompt, &self.model).await?;
        debug!(response = %response, "Actor response");
        info!(name = %self.descriptor.name(), "Actor took a turn");

        let entry = TranscriptEntry::new(
            Speaker::Actor {
                id: self.id.clone(),
                name: self.descriptor.name().clone(),
            },
            response.clone(),
        );
        let next = state.with_entry(entry, CurrentActor::Actor(self.id.clone()));
        Ok(TurnOutcome::new(next, response))
    }
}

//! Routing unit.

use crate::{TurnOutcome, prompt};
use std::sync::Arc;
use storyagent_core::{ControllerDirective, CurrentActor, StoryState};
use storyagent_error::StoryResult;
use storyagent_interface::{ModelGateway, UnitKind};
use tracing::{debug, info, instrument};

/// Updates the world's current state and selects who acts next.
///
/// The selected id is not checked against the registry here; the scheduler
/// does that before dispatching.
#[derive(Debug)]
pub struct ControllerUnit<G: ModelGateway> {
    gateway: Arc<G>,
    model: String,
}

impl<G: ModelGateway> ControllerUnit<G> {
    /// Create the controller.
    pub fn new(gateway: Arc<G>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
        }
    }

    /// Which unit this is, for turn records and error context.
    pub fn unit(&self) -> UnitKind {
        UnitKind::Controller
    }

    /// Take one routing turn.
    ///
    /// Replaces `world.state` with the parsed `<state>` block and sets the
    /// current actor to the parsed `<actor>` block. The transcript and the
    /// world's description and rules are carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the model call fails, or a parse error if
    /// either tag is missing or empty.
    #[instrument(skip(self, state), fields(model = %self.model, transcript_len = state.messages().len()))]
    pub async fn route(&self, state: &StoryState) -> StoryResult<TurnOutcome> {
        let prompt = prompt::controller_prompt(state);
        debug!(prompt_len = prompt.len(), "Built controller prompt");

        let response = self.gateway.complete(&prompt, &self.model).await?;
        debug!(response = %response, "Controller response");

        let directive = ControllerDirective::parse(&response)?;
        info!(
            next_actor = %directive.actor,
            world_state = %directive.state,
            "Controller routed"
        );

        let world = state.world().with_state(directive.state);
        let next = state.with_routing(world, CurrentActor::Actor(directive.actor));
        Ok(TurnOutcome::new(next, response))
    }
}

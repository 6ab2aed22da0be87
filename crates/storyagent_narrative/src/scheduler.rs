//! The turn-taking state machine.

use crate::{ActorUnit, ControllerUnit, RunConfig, TurnOutcome, WriterUnit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use storyagent_core::{ActorId, ActorRegistry, CurrentActor, StoryState, Transcript, WorldDescriptor};
use storyagent_error::{
    BudgetExceededError, ConfigError, ConfigErrorKind, RoutingError, StoryError, StoryResult,
    TurnError,
};
use storyagent_interface::{ModelGateway, TurnObserver, TurnRecord, UnitKind};
use tracing::{debug, error, info, instrument};

/// Where the scheduler is in a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum SchedulerState {
    /// Controller about to run
    #[display("ROUTING")]
    Routing,
    /// One actor about to run
    #[display("ACTING({})", _0)]
    Acting(ActorId),
    /// Writer about to run
    #[display("WRITING")]
    Writing,
    /// Terminal
    #[display("DONE")]
    Done,
}

/// Continuation predicate evaluated after every acting turn.
///
/// True once the writer has already spoken or `max_iterations` acting turns
/// have been taken.
///
/// # Examples
///
/// ```
/// use storyagent_core::{ActorId, Speaker, Transcript, TranscriptEntry};
/// use storyagent_narrative::should_write;
///
/// let entry = TranscriptEntry::new(
///     Speaker::Actor { id: ActorId::from("thorn"), name: "Thorn".to_string() },
///     "<speak>Hm.</speak>",
/// );
/// let one = Transcript::new().appended(entry.clone());
/// let two = one.appended(entry);
///
/// assert!(!should_write(&one, 2));
/// assert!(should_write(&two, 2));
/// ```
pub fn should_write(transcript: &Transcript, max_iterations: u32) -> bool {
    transcript.has_writer_entry() || transcript.acting_turns() >= max_iterations as usize
}

/// Drives one story run from the first routing turn to the writer.
///
/// Units are built once from the registry: one [`ActorUnit`] per actor id,
/// plus the controller and writer, all sharing the same gateway.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use storyagent_core::{ActorRegistry, WorldDescriptor};
/// use storyagent_models::{DeepSeekGateway, GatewayConfig};
/// use storyagent_narrative::{RunConfig, StoryScheduler};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = Arc::new(DeepSeekGateway::new(&GatewayConfig::default())?);
/// let registry = ActorRegistry::new();
/// let world = WorldDescriptor::new("A quiet valley", vec![], "Morning");
///
/// let scheduler = StoryScheduler::new(gateway, registry, RunConfig::new("deepseek-chat", 4)?);
/// let finished = scheduler.run(scheduler.initial_state(world)).await?;
/// println!("{}", finished.messages().len());
/// # Ok(())
/// # }
/// ```
pub struct StoryScheduler<G: ModelGateway> {
    registry: ActorRegistry,
    controller: ControllerUnit<G>,
    actors: BTreeMap<ActorId, ActorUnit<G>>,
    writer: WriterUnit<G>,
    config: RunConfig,
    observers: Vec<Arc<dyn TurnObserver>>,
}

impl<G: ModelGateway> StoryScheduler<G> {
    /// Build every unit for a run.
    pub fn new(gateway: Arc<G>, registry: ActorRegistry, config: RunConfig) -> Self {
        let model = config.model().clone();

        let actors = registry
            .iter()
            .map(|(id, descriptor)| {
                let unit = ActorUnit::new(
                    id.clone(),
                    descriptor.clone(),
                    Arc::clone(&gateway),
                    model.clone(),
                );
                (id.clone(), unit)
            })
            .collect();

        let controller = ControllerUnit::new(Arc::clone(&gateway), model.clone());
        let writer = WriterUnit::new(gateway, model, config.language().clone());

        Self {
            registry,
            controller,
            actors,
            writer,
            config,
            observers: Vec::new(),
        }
    }

    /// Register an observer that sees every committed turn.
    pub fn with_observer(mut self, observer: Arc<dyn TurnObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run configuration in effect.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The starting state for `world`: empty transcript, waiting on the controller.
    pub fn initial_state(&self, world: WorldDescriptor) -> StoryState {
        StoryState::new(self.registry.clone(), world)
    }

    /// Run the story to completion.
    ///
    /// # Errors
    ///
    /// Any failure aborts the run immediately and is returned wrapped in a
    /// [`TurnError`] naming the unit and the 1-based turn index: gateway
    /// failures, controller parse failures, routing to an unregistered
    /// actor, and exceeding the turn ceiling. Nothing is retried here.
    ///
    /// An `initial` state whose cast differs from the scheduler's registry
    /// is rejected with a [`ConfigError`] before any turn runs.
    #[instrument(
        skip(self, initial),
        fields(
            max_iterations = *self.config.max_iterations(),
            max_turns = self.config.max_turns(),
            actor_count = self.actors.len()
        )
    )]
    pub async fn run(&self, initial: StoryState) -> StoryResult<StoryState> {
        if initial.actors() != &self.registry {
            error!(
                state_actors = initial.actors().len(),
                scheduler_actors = self.registry.len(),
                "Initial state cast does not match the scheduler registry"
            );
            return Err(ConfigError::new(ConfigErrorKind::Cast(
                "initial state lists a different cast than the scheduler".to_string(),
            ))
            .into());
        }

        let max_turns = self.config.max_turns();
        let mut phase = SchedulerState::Routing;
        let mut state = initial;
        let mut turn: u32 = 0;

        info!("Story run started");

        while phase != SchedulerState::Done {
            let unit = self.unit_for(&phase);
            if turn >= max_turns {
                error!(turn, max_turns, unit = %unit, "Turn budget exhausted");
                return Err(TurnError::new(
                    unit.to_string(),
                    turn + 1,
                    BudgetExceededError::new(turn, max_turns),
                )
                .into());
            }
            turn += 1;
            debug!(turn, phase = %phase, "Dispatching");

            let outcome = self
                .dispatch(&phase, &state)
                .await
                .map_err(|e| self.turn_failed(&unit, turn, e))?;

            let next_phase = match &phase {
                SchedulerState::Routing => self
                    .validate_route(&outcome)
                    .map_err(|e| self.turn_failed(&unit, turn, e))?,
                SchedulerState::Acting(_) => {
                    if should_write(outcome.state().messages(), *self.config.max_iterations()) {
                        SchedulerState::Writing
                    } else {
                        SchedulerState::Routing
                    }
                }
                SchedulerState::Writing | SchedulerState::Done => SchedulerState::Done,
            };

            let (new_state, raw_output) = outcome.into_parts();
            self.notify(&TurnRecord::new(turn, unit, raw_output));
            state = new_state;
            phase = next_phase;
        }

        info!(
            turns = turn,
            acting_turns = state.messages().acting_turns(),
            "Story run finished"
        );
        Ok(state)
    }

    fn unit_for(&self, phase: &SchedulerState) -> UnitKind {
        match phase {
            SchedulerState::Routing => self.controller.unit(),
            SchedulerState::Acting(id) => UnitKind::Actor(id.clone()),
            SchedulerState::Writing | SchedulerState::Done => self.writer.unit(),
        }
    }

    async fn dispatch(&self, phase: &SchedulerState, state: &StoryState) -> StoryResult<TurnOutcome> {
        match phase {
            SchedulerState::Routing => self.controller.route(state).await,
            SchedulerState::Acting(id) => match self.actors.get(id) {
                Some(actor) => actor.act(state).await,
                None => Err(RoutingError::new(id.to_string(), self.registered_ids(), "").into()),
            },
            SchedulerState::Writing | SchedulerState::Done => self.writer.finalize(state).await,
        }
    }

    /// Next phase after a routing turn, rejecting unregistered actors before dispatch.
    fn validate_route(&self, outcome: &TurnOutcome) -> StoryResult<SchedulerState> {
        match outcome.state().current_actor() {
            CurrentActor::Actor(id) if self.actors.contains_key(id) => {
                Ok(SchedulerState::Acting(id.clone()))
            }
            other => Err(RoutingError::new(
                other.to_string(),
                self.registered_ids(),
                outcome.raw_output().clone(),
            )
            .into()),
        }
    }

    fn registered_ids(&self) -> Vec<String> {
        self.actors.keys().map(|id| id.to_string()).collect()
    }

    fn turn_failed(&self, unit: &UnitKind, turn: u32, err: StoryError) -> StoryError {
        error!(turn, unit = %unit, error = %err, "Turn failed, aborting run");
        TurnError::new(unit.to_string(), turn, err).into()
    }

    fn notify(&self, record: &TurnRecord) {
        for observer in &self.observers {
            observer.on_turn(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyagent_core::{Speaker, TranscriptEntry};

    fn actor_entry(id: &str) -> TranscriptEntry {
        TranscriptEntry::new(
            Speaker::Actor {
                id: ActorId::from(id),
                name: id.to_uppercase(),
            },
            "<speak>...</speak>",
        )
    }

    #[test]
    fn predicate_counts_acting_turns_only() {
        let transcript = Transcript::new()
            .appended(actor_entry("ash"))
            .appended(actor_entry("thorn"));

        assert!(!should_write(&transcript, 3));
        assert!(should_write(&transcript, 2));
        assert!(should_write(&transcript, 1));
    }

    #[test]
    fn predicate_stops_once_writer_has_spoken() {
        let transcript = Transcript::new()
            .appended(actor_entry("ash"))
            .appended(TranscriptEntry::new(Speaker::Writer, "The end."));

        assert_eq!(transcript.acting_turns(), 1);
        assert!(should_write(&transcript, 10));
    }

    #[test]
    fn empty_transcript_keeps_going() {
        assert!(!should_write(&Transcript::new(), 1));
    }

    #[test]
    fn states_display_like_the_state_machine() {
        assert_eq!(SchedulerState::Routing.to_string(), "ROUTING");
        assert_eq!(
            SchedulerState::Acting(ActorId::from("thorn")).to_string(),
            "ACTING(thorn)"
        );
        assert_eq!(SchedulerState::Done.to_string(), "DONE");
    }
}

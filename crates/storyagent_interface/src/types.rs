//! Types shared between the scheduler and its observers.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyagent_core::ActorId;

/// Which kind of participant took a turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum UnitKind {
    /// The routing controller
    #[display("controller")]
    Controller,
    /// A character
    #[display("actor:{}", _0)]
    Actor(ActorId),
    /// The final narrative writer
    #[display("writer")]
    Writer,
}

/// A committed turn as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TurnRecord {
    /// 1-based turn index within the run
    turn: u32,
    /// Participant that took the turn
    unit: UnitKind,
    /// Raw model output for the turn
    raw_output: String,
}

impl TurnRecord {
    /// Create a turn record.
    pub fn new(turn: u32, unit: UnitKind, raw_output: impl Into<String>) -> Self {
        Self {
            turn,
            unit,
            raw_output: raw_output.into(),
        }
    }
}

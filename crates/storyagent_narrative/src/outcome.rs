//! Result of a single participant turn.

use derive_getters::Getters;
use storyagent_core::StoryState;

/// New state produced by a turn, with the raw model output behind it.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct TurnOutcome {
    /// State after the turn
    state: StoryState,
    /// Untruncated model output
    raw_output: String,
}

impl TurnOutcome {
    /// Create a turn outcome.
    pub fn new(state: StoryState, raw_output: impl Into<String>) -> Self {
        Self {
            state,
            raw_output: raw_output.into(),
        }
    }

    /// Split into the new state and the raw output.
    pub fn into_parts(self) -> (StoryState, String) {
        (self.state, self.raw_output)
    }
}

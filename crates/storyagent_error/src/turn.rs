//! Turn context for failures raised inside a participant.

use crate::StoryError;

/// A failure raised while a participant was taking its turn.
///
/// Records the failing unit and the 1-based turn index around the
/// underlying cause.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Turn {} ({}) failed: {}", turn, unit, source)]
pub struct TurnError {
    /// Label of the failing unit, e.g. `controller` or `actor:royal_advisor`
    pub unit: String,
    /// 1-based turn index within the run
    pub turn: u32,
    /// Underlying cause
    pub source: Box<StoryError>,
}

impl TurnError {
    /// Wrap a failure with the unit and turn that produced it.
    pub fn new(unit: impl Into<String>, turn: u32, source: impl Into<StoryError>) -> Self {
        Self {
            unit: unit.into(),
            turn,
            source: Box::new(source.into()),
        }
    }
}

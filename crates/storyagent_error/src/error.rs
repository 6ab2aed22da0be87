//! Top-level error wrapper types.

use crate::{
    BudgetExceededError, ConfigError, ExportError, GatewayError, JsonError, ParseError,
    RoutingError, TurnError,
};

/// Every error condition the story engine can report.
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryErrorKind {
    /// Model gateway call failed
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Controller output did not follow the tag grammar
    #[from(ParseError)]
    Parse(ParseError),
    /// Controller selected an unregistered actor
    #[from(RoutingError)]
    Routing(RoutingError),
    /// Run-level turn ceiling reached
    #[from(BudgetExceededError)]
    BudgetExceeded(BudgetExceededError),
    /// Failure wrapped with unit and turn context
    #[from(TurnError)]
    Turn(TurnError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Participant descriptor could not be deserialized
    #[from(JsonError)]
    Json(JsonError),
    /// Finished story could not be written
    #[from(ExportError)]
    Export(ExportError),
}

/// StoryAgent error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyagent_error::{StoryError, StoryResult, ConfigError};
///
/// fn might_fail() -> StoryResult<()> {
///     Err(ConfigError::invalid("max_iterations", "must be at least 1"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("StoryAgent Error: {}", _0)]
pub struct StoryError(Box<StoryErrorKind>);

impl StoryError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryErrorKind {
        &self.0
    }

    /// Get the underlying kind, looking through any turn context.
    pub fn root_kind(&self) -> &StoryErrorKind {
        match self.kind() {
            StoryErrorKind::Turn(turn) => turn.source.root_kind(),
            kind => kind,
        }
    }

    /// Turn context of the outermost turn failure, if any.
    pub fn turn(&self) -> Option<&TurnError> {
        match self.kind() {
            StoryErrorKind::Turn(turn) => Some(turn),
            _ => None,
        }
    }

    /// Raw model output attached to the failure, if the failure carries one.
    pub fn raw_output(&self) -> Option<&str> {
        match self.root_kind() {
            StoryErrorKind::Parse(e) => Some(&e.raw_output),
            StoryErrorKind::Routing(e) => Some(&e.raw_output),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to StoryErrorKind
impl<T> From<T> for StoryError
where
    T: Into<StoryErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for StoryAgent operations.
pub type StoryResult<T> = std::result::Result<T, StoryError>;

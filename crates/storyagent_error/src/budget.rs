//! Turn budget error types.

/// The run-level turn ceiling was reached before the story finished.
///
/// # Examples
///
/// ```
/// use storyagent_error::BudgetExceededError;
///
/// let err = BudgetExceededError::new(9, 9);
/// assert!(err.to_string().contains("9 of 9"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Budget Exceeded: {} of {} turns used before the story finished at line {} in {}",
    turns_taken,
    max_turns,
    line,
    file
)]
pub struct BudgetExceededError {
    /// Turns already executed
    pub turns_taken: u32,
    /// Hard ceiling for the run
    pub max_turns: u32,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl BudgetExceededError {
    /// Create a new BudgetExceededError with automatic location tracking.
    #[track_caller]
    pub fn new(turns_taken: u32, max_turns: u32) -> Self {
        let location = std::panic::Location::caller();
        Self {
            turns_taken,
            max_turns,
            line: location.line(),
            file: location.file(),
        }
    }
}

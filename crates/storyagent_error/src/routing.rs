//! Routing error types.

/// The controller selected an actor id that is not registered.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Routing Error: controller selected unknown actor '{}' at line {} in {}",
    selected,
    line,
    file
)]
pub struct RoutingError {
    /// The actor id the controller produced
    pub selected: String,
    /// Actor ids present in the registry
    pub registered: Vec<String>,
    /// Raw controller output that produced the selection
    pub raw_output: String,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RoutingError {
    /// Create a new RoutingError with automatic location tracking.
    #[track_caller]
    pub fn new(
        selected: impl Into<String>,
        registered: Vec<String>,
        raw_output: impl Into<String>,
    ) -> Self {
        let location = std::panic::Location::caller();
        Self {
            selected: selected.into(),
            registered,
            raw_output: raw_output.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

//! Tag parsing error types.

/// Specific tag parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ParseErrorKind {
    /// No `<tag>...</tag>` block was found
    #[display("missing <{}>...</{}> block", _0, _0)]
    MissingTag(String),
    /// The block was present but held only whitespace
    #[display("<{}> block is empty", _0)]
    EmptyTag(String),
}

/// Model output did not follow the required tag grammar.
///
/// Carries the raw model output, untruncated, for diagnosis.
///
/// # Examples
///
/// ```
/// use storyagent_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::MissingTag("actor".to_string()), "<state>calm</state>");
/// assert!(err.to_string().contains("missing <actor>"));
/// assert_eq!(err.raw_output, "<state>calm</state>");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The specific error condition
    pub kind: ParseErrorKind,
    /// The model output that failed to parse
    pub raw_output: String,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind, raw_output: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            raw_output: raw_output.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

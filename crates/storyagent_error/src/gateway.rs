//! Model gateway error types.

/// Specific error conditions for model gateway calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GatewayErrorKind {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Provider returned a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Provider rejected the request because of rate limits or quota
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// Credentials were rejected
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),
    /// Credentials could not be found
    #[display("API key not available: {}", _0)]
    MissingApiKey(String),
    /// Provider answered but the completion text was empty
    #[display("Model returned an empty completion")]
    EmptyResponse,
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Request could not be assembled
    #[display("Invalid request: {}", _0)]
    Request(String),
}

impl GatewayErrorKind {
    /// Whether a retry has a reasonable chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayErrorKind::Http(_) | GatewayErrorKind::RateLimited(_) => true,
            GatewayErrorKind::Api { status, .. } => *status >= 500,
            GatewayErrorKind::Unauthorized(_)
            | GatewayErrorKind::MissingApiKey(_)
            | GatewayErrorKind::EmptyResponse
            | GatewayErrorKind::ResponseParsing(_)
            | GatewayErrorKind::Request(_) => false,
        }
    }
}

/// Error type for model gateway calls.
///
/// # Examples
///
/// ```
/// use storyagent_error::{GatewayError, GatewayErrorKind, RetryableError};
///
/// let err = GatewayError::new(GatewayErrorKind::Api {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = GatewayError::new(GatewayErrorKind::Unauthorized("bad key".to_string()));
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    /// The specific error condition
    pub kind: GatewayErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Errors that can tell a retry loop whether to try again.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GatewayError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

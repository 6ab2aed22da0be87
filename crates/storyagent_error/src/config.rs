//! Errors raised while assembling a run from settings and cast files.

/// What was wrong with the run setup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A run setting is out of range
    #[display("Invalid {}: {}", setting, reason)]
    InvalidSetting {
        /// Setting name as written in the config file
        setting: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The requested model is not served by the gateway
    #[display("Unsupported model '{}' (supported: {})", model, supported)]
    UnsupportedModel {
        /// Requested model id
        model: String,
        /// Comma-separated supported ids
        supported: String,
    },

    /// Config layers could not be merged or deserialized
    #[display("Unreadable configuration: {}", _0)]
    Layers(String),

    /// The cast is incomplete (no world, no actors)
    #[display("Incomplete cast: {}", _0)]
    Cast(String),

    /// A descriptor file could not be read
    #[display("Cannot read descriptor {}: {}", path, reason)]
    Descriptor {
        /// Path as given in the cast
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// Log filter or subscriber could not be installed
    #[display("Logging setup failed: {}", _0)]
    Logging(String),
}

/// Run setup error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// What went wrong
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyagent_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::invalid("max_iterations", "must be at least 1");
    /// assert!(matches!(err.kind, ConfigErrorKind::InvalidSetting { .. }));
    /// assert!(err.to_string().contains("max_iterations"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an out-of-range setting.
    #[track_caller]
    pub fn invalid(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidSetting {
            setting: setting.into(),
            reason: reason.into(),
        })
    }
}

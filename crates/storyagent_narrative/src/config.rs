//! Run configuration consumed by the scheduler.

use derive_getters::Getters;
use storyagent_error::ConfigError;

/// Smallest ceiling that still fits one routing, one acting and one writing turn.
const MIN_TURN_CEILING: u32 = 3;

/// Per-run settings.
///
/// # Examples
///
/// ```
/// use storyagent_narrative::RunConfig;
///
/// let config = RunConfig::new("deepseek-chat", 2)
///     .unwrap()
///     .with_language("English");
///
/// assert_eq!(*config.max_iterations(), 2);
/// assert_eq!(config.max_turns(), 5);
/// assert_eq!(config.language().as_deref(), Some("English"));
///
/// assert!(RunConfig::new("deepseek-chat", 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RunConfig {
    /// Model identifier forwarded to every gateway call
    model: String,
    /// Acting turns before the writer takes over
    max_iterations: u32,
    /// Target narrative language forwarded to the writer
    language: Option<String>,
    /// Explicit hard ceiling on unit invocations
    #[getter(skip)]
    max_turns: Option<u32>,
}

impl RunConfig {
    /// Create a run configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `max_iterations` is zero.
    #[track_caller]
    pub fn new(model: impl Into<String>, max_iterations: u32) -> Result<Self, ConfigError> {
        if max_iterations == 0 {
            return Err(ConfigError::invalid("max_iterations", "must be at least 1"));
        }
        Ok(Self {
            model: model.into(),
            max_iterations,
            language: None,
            max_turns: None,
        })
    }

    /// Set the narrative language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the hard ceiling on unit invocations.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the ceiling cannot fit a single
    /// routing, acting and writing turn.
    #[track_caller]
    pub fn with_max_turns(mut self, max_turns: u32) -> Result<Self, ConfigError> {
        if max_turns < MIN_TURN_CEILING {
            return Err(ConfigError::invalid(
                "max_turns",
                format!("must be at least {}, got {}", MIN_TURN_CEILING, max_turns),
            ));
        }
        self.max_turns = Some(max_turns);
        Ok(self)
    }

    /// Hard ceiling on unit invocations (controller, actor and writer turns).
    ///
    /// Defaults to one routing turn per acting turn plus the writer.
    pub fn max_turns(&self) -> u32 {
        self.max_turns
            .unwrap_or_else(|| self.max_iterations.saturating_mul(2).saturating_add(1))
    }
}

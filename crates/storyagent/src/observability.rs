//! Logging setup for the binary.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use storyagent_error::{ConfigError, ConfigErrorKind};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log level filter (e.g., "info", "debug")
    pub log_level: String,
    /// Ignore `RUST_LOG` and use `log_level` as given
    pub force_level: bool,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
    /// Also append plain-text logs to this file
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Configuration honouring `RUST_LOG`, falling back to "info".
    pub fn new() -> Self {
        Self {
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            force_level: false,
            json_logs: false,
            log_file: None,
        }
    }

    /// Set the log level, overriding `RUST_LOG`.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self.force_level = true;
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Append logs to a file as well as stderr.
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so the story on stdout stays clean, and optionally
/// to an append-only log file without ANSI colors.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log file cannot be
/// opened, or a subscriber is already set.
pub fn init_observability(config: &ObservabilityConfig) -> Result<(), ConfigError> {
    let env_filter = if config.force_level {
        EnvFilter::try_new(&config.log_level)
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))
    }
    .map_err(|e| {
        ConfigError::new(ConfigErrorKind::Logging(format!(
            "invalid filter '{}': {}",
            config.log_level, e
        )))
    })?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    ConfigError::new(ConfigErrorKind::Logging(format!(
                        "cannot open log file {}: {}",
                        path.display(),
                        e
                    )))
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::new(ConfigErrorKind::Logging(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_forces_filter() {
        let config = ObservabilityConfig::new()
            .with_log_level("debug")
            .with_json_logs(true);
        assert_eq!(config.log_level, "debug");
        assert!(config.force_level);
        assert!(config.json_logs);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn unopenable_log_file_is_a_logging_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ObservabilityConfig::new()
            .with_log_level("info")
            .with_log_file(Some(dir.path().join("missing").join("story.log")));

        let err = init_observability(&config).unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::Logging(_)));
        assert!(err.to_string().contains("story.log"));
    }
}

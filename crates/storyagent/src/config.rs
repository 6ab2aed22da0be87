//! Run configuration loading.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Built-in defaults
//! 2. User config (`~/.config/storyagent/storyagent.toml`)
//! 3. Project config in the current directory (`./storyagent.toml`)
//! 4. An explicit `--config` file
//! 5. Environment variables prefixed `STORYAGENT__` (e.g. `STORYAGENT__MAX_ITERATIONS=4`)
//! 6. Command-line flags, applied with [`StoryConfig::with_overrides`]

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storyagent_core::{ActorRegistry, WorldDescriptor};
use storyagent_error::{ConfigError, ConfigErrorKind, StoryError, StoryResult};
use storyagent_models::GatewayConfig;
use storyagent_narrative::RunConfig;
use tracing::{debug, instrument};

/// Where the cast is loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastConfig {
    /// World descriptor JSON file
    pub world: Option<PathBuf>,
    /// Actor descriptor JSON files keyed by actor id
    pub actors: BTreeMap<String, PathBuf>,
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Emit JSON log lines
    pub json: bool,
    /// Append logs to this file as well as stderr
    pub file: Option<PathBuf>,
}

/// Values supplied on the command line; `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Model identifier
    pub model: Option<String>,
    /// Narrative language
    pub language: Option<String>,
    /// Acting-turn budget
    pub max_iterations: Option<u32>,
    /// Hard turn ceiling
    pub max_turns: Option<u32>,
    /// World descriptor file
    pub world: Option<PathBuf>,
    /// Actor descriptor files, added to (or replacing) configured ones
    pub actors: Vec<(String, PathBuf)>,
}

/// Complete configuration of a story run.
///
/// # Examples
///
/// ```
/// use storyagent::StoryConfig;
///
/// let config = StoryConfig::default();
/// assert_eq!(config.model(), "deepseek-chat");
/// assert_eq!(*config.max_iterations(), 6);
/// assert_eq!(config.run_config().unwrap().max_turns(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StoryConfig {
    /// Model identifier forwarded to every gateway call
    model: String,
    /// Target narrative language for the writer
    language: Option<String>,
    /// Acting turns before the writer takes over
    max_iterations: u32,
    /// Hard ceiling on unit invocations
    max_turns: Option<u32>,
    /// Gateway connection settings
    gateway: GatewayConfig,
    /// Cast descriptor files
    cast: CastConfig,
    /// Log output settings
    log: LogConfig,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".to_string(),
            language: None,
            max_iterations: 6,
            max_turns: None,
            gateway: GatewayConfig::default(),
            cast: CastConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl StoryConfig {
    /// Load configuration from every standard source.
    ///
    /// `explicit` names a file that must exist; the user and project files
    /// are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or a value has the wrong type.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> StoryResult<Self> {
        debug!("Loading configuration: env > explicit > project > user > defaults");

        let mut builder = Config::builder();

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("storyagent").join("storyagent.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyagent").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("STORYAGENT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Load configuration from files only, later files overriding earlier ones.
    ///
    /// # Errors
    ///
    /// Returns an error if any file is missing or cannot be parsed.
    #[instrument(skip(paths), fields(count = paths.len()))]
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> StoryResult<Self> {
        let builder = paths
            .iter()
            .fold(Config::builder(), |builder, path| {
                builder.add_source(File::from(path.as_ref()))
            });
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> StoryResult<Self> {
        builder
            .build()
            .map_err(|e| {
                StoryError::from(ConfigError::new(ConfigErrorKind::Layers(format!(
                    "failed to merge sources: {}",
                    e
                ))))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryError::from(ConfigError::new(ConfigErrorKind::Layers(format!(
                    "failed to deserialize: {}",
                    e
                ))))
            })
    }

    /// Apply command-line values on top of the loaded configuration.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(language) = overrides.language {
            self.language = Some(language);
        }
        if let Some(max_iterations) = overrides.max_iterations {
            self.max_iterations = max_iterations;
        }
        if let Some(max_turns) = overrides.max_turns {
            self.max_turns = Some(max_turns);
        }
        if let Some(world) = overrides.world {
            self.cast.world = Some(world);
        }
        self.cast.actors.extend(overrides.actors);
        self
    }

    /// Scheduler settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` is zero or `max_turns` is too small.
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let mut run = RunConfig::new(self.model.clone(), self.max_iterations)?;
        if let Some(language) = &self.language {
            run = run.with_language(language.clone());
        }
        if let Some(max_turns) = self.max_turns {
            run = run.with_max_turns(max_turns)?;
        }
        Ok(run)
    }

    /// Load the world and every actor descriptor named by the cast.
    ///
    /// # Errors
    ///
    /// Returns an error if no world or no actors are configured, or any
    /// descriptor file is unreadable or incomplete.
    #[instrument(skip(self), fields(actor_count = self.cast.actors.len()))]
    pub fn load_cast(&self) -> StoryResult<(ActorRegistry, WorldDescriptor)> {
        let world_path = self.cast.world.as_ref().ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::Cast(
                "no world descriptor configured (set cast.world or pass --world)".to_string(),
            ))
        })?;
        let world = WorldDescriptor::from_file(world_path)?;
        let registry = ActorRegistry::load(&self.cast.actors)?;
        debug!(actors = registry.len(), "Cast loaded");
        Ok((registry, world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_values() {
        let config = StoryConfig::default().with_overrides(ConfigOverrides {
            max_iterations: Some(2),
            actors: vec![("thorn".to_string(), PathBuf::from("thorn.json"))],
            ..Default::default()
        });

        assert_eq!(*config.max_iterations(), 2);
        assert_eq!(config.model(), "deepseek-chat");
        assert_eq!(
            config.cast().actors.get("thorn"),
            Some(&PathBuf::from("thorn.json"))
        );
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let config = StoryConfig::default().with_overrides(ConfigOverrides {
            max_iterations: Some(0),
            ..Default::default()
        });
        assert!(config.run_config().is_err());
    }

    #[test]
    fn missing_world_is_a_config_error() {
        let err = StoryConfig::default().load_cast().unwrap_err();
        assert!(matches!(
            err.kind(),
            storyagent_error::StoryErrorKind::Config(_)
        ));
    }
}

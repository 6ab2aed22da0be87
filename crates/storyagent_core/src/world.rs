//! World descriptor.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyagent_error::{ConfigError, ConfigErrorKind, JsonError, StoryResult};

/// The fictional world the story takes place in.
///
/// `description` and `rules` are fixed at load time. Only `state`, the
/// free-text summary of the current situation, is ever replaced, and only
/// through [`WorldDescriptor::with_state`], which leaves the fixed fields
/// untouched.
///
/// # Examples
///
/// ```
/// use storyagent_core::WorldDescriptor;
///
/// let world = WorldDescriptor::new(
///     "A border where three realms meet",
///     vec!["Magic has a price".to_string()],
///     "An uneasy peace",
/// );
/// let next = world.with_state("The relic has been found");
///
/// assert_eq!(next.description(), world.description());
/// assert_eq!(next.rules(), world.rules());
/// assert_eq!(next.state(), "The relic has been found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WorldDescriptor {
    /// Fixed description of the setting
    description: String,
    /// Fixed ordered rules of the world
    rules: Vec<String>,
    /// Current situation, rewritten by the controller
    state: String,
}

impl WorldDescriptor {
    /// Create a world descriptor.
    pub fn new(
        description: impl Into<String>,
        rules: Vec<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            rules,
            state: state.into(),
        }
    }

    /// A copy of this world with the current state replaced.
    pub fn with_state(&self, state: impl Into<String>) -> Self {
        Self {
            description: self.description.clone(),
            rules: self.rules.clone(),
            state: state.into(),
        }
    }

    /// Parse a world descriptor from JSON text.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, JsonError> {
        serde_json::from_str(json)
            .map_err(|e| JsonError::new(format!("Invalid world descriptor {}: {}", origin, e)))
    }

    /// Load a world descriptor from a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Descriptor {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;
        let world = Self::from_json(&content, &path.display().to_string())?;
        tracing::debug!(rules = world.rules.len(), "Loaded world descriptor");
        Ok(world)
    }
}

impl std::fmt::Display for WorldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Rules:")?;
        for rule in &self.rules {
            write!(f, "\n  - {}", rule)?;
        }
        write!(f, "\nCurrent state: {}", self.state)
    }
}

//! The participant registry.

use crate::{ActorDescriptor, ActorId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use storyagent_error::{ConfigError, ConfigErrorKind, StoryResult};

/// Actor descriptors keyed by actor id.
///
/// Built once at setup and never changed while a story runs. Iteration is
/// ordered by actor id so prompts are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorRegistry(BTreeMap<ActorId, ActorDescriptor>);

impl ActorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor, returning the descriptor previously held under the same id.
    pub fn insert(
        &mut self,
        id: impl Into<ActorId>,
        descriptor: ActorDescriptor,
    ) -> Option<ActorDescriptor> {
        self.0.insert(id.into(), descriptor)
    }

    /// Load every descriptor from its JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if no actors are given, or if any file cannot be
    /// read or is missing a required field.
    #[tracing::instrument(skip_all, fields(actor_count = sources.len()))]
    pub fn load(sources: &BTreeMap<String, PathBuf>) -> StoryResult<Self> {
        if sources.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Cast(
                "at least one actor must be configured".to_string(),
            ))
            .into());
        }

        let mut registry = Self::new();
        for (id, path) in sources {
            let descriptor = ActorDescriptor::from_file(path)?;
            tracing::info!(actor_id = %id, name = %descriptor.name(), "Registered actor");
            registry.insert(id.as_str(), descriptor);
        }
        Ok(registry)
    }

    /// Look up an actor by id.
    pub fn get(&self, id: &str) -> Option<&ActorDescriptor> {
        self.0.get(id)
    }

    /// Whether an actor id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Registered ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &ActorId> {
        self.0.keys()
    }

    /// Registered `(id, descriptor)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&ActorId, &ActorDescriptor)> {
        self.0.iter()
    }

    /// Number of registered actors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no actors are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ActorId, ActorDescriptor)> for ActorRegistry {
    fn from_iter<I: IntoIterator<Item = (ActorId, ActorDescriptor)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

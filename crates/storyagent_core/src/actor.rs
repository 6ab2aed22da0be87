//! Actor descriptors and identifiers.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::path::Path;
use storyagent_error::{ConfigError, ConfigErrorKind, JsonError, StoryResult};

/// Caller-assigned identity of an actor, unique within a run.
///
/// Distinct from the character's display name.
///
/// # Examples
///
/// ```
/// use storyagent_core::ActorId;
///
/// let id = ActorId::from("royal_advisor");
/// assert_eq!(id.as_str(), "royal_advisor");
/// assert_eq!(id.to_string(), "royal_advisor");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for ActorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Immutable description of one character.
///
/// Loaded once before the run from JSON. Every field is required.
///
/// # Examples
///
/// ```
/// use storyagent_core::ActorDescriptor;
///
/// let thorn = ActorDescriptor::builder()
///     .name("Thorn")
///     .gender("male")
///     .age(212u32)
///     .faction("Forest circle")
///     .appearance("Bark-brown skin, moss in his hair")
///     .backstory(vec!["Raised by the old oaks".to_string()])
///     .persona("Mysterious, intuitive")
///     .goal("Keep the relic away from the kingdom")
///     .build()
///     .unwrap();
///
/// assert!(thorn.brief().contains("Name: Thorn"));
/// assert!(!thorn.brief().contains("Goal"));
/// assert!(thorn.to_string().contains("Goal: Keep the relic"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ActorDescriptor {
    /// Display name
    name: String,
    /// Gender
    gender: String,
    /// Age in years
    age: u32,
    /// Race or faction the character belongs to
    #[serde(alias = "race_or_faction")]
    faction: String,
    /// Physical appearance
    appearance: String,
    /// Ordered backstory fragments
    #[serde(alias = "backstories")]
    backstory: Vec<String>,
    /// Personality traits
    persona: String,
    /// What the character wants
    goal: String,
}

impl ActorDescriptor {
    /// Creates a builder for ActorDescriptor.
    pub fn builder() -> ActorDescriptorBuilder {
        ActorDescriptorBuilder::default()
    }

    /// Parse a descriptor from JSON text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, JsonError> {
        serde_json::from_str(json)
            .map_err(|e| JsonError::new(format!("Invalid actor descriptor {}: {}", origin, e)))
    }

    /// Load a descriptor from a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Descriptor {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;
        let descriptor = Self::from_json(&content, &path.display().to_string())?;
        tracing::debug!(name = %descriptor.name, "Loaded actor descriptor");
        Ok(descriptor)
    }

    /// Short public description shown to other characters.
    pub fn brief(&self) -> String {
        format!(
            "Name: {}\nGender: {}\nAge: {}\nRace or faction: {}\nAppearance: {}",
            self.name, self.gender, self.age, self.faction, self.appearance
        )
    }
}

impl std::fmt::Display for ActorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.brief())?;
        writeln!(f, "Personality: {}", self.persona)?;
        writeln!(f, "Goal: {}", self.goal)?;
        write!(f, "Backstories:")?;
        for story in &self.backstory {
            write!(f, "\n  - {}", story)?;
        }
        Ok(())
    }
}

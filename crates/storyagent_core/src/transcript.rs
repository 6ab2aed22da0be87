//! The append-only transcript of the story.

use crate::ActorId;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Label used for the writer's entry when the transcript is rendered.
pub const WRITER_LABEL: &str = "STORY_WRITER";

/// Who authored a transcript entry.
///
/// The writer is a dedicated variant rather than a reserved string, so it
/// can never collide with an actor id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Speaker {
    /// A character, identified by id and shown by name
    Actor {
        /// Registry key of the actor
        id: ActorId,
        /// Display name at the time of speaking
        name: String,
    },
    /// The final narrative writer
    Writer,
}

impl Speaker {
    /// Whether this is the writer.
    pub fn is_writer(&self) -> bool {
        matches!(self, Speaker::Writer)
    }

    /// The actor id, if an actor spoke.
    pub fn actor_id(&self) -> Option<&ActorId> {
        match self {
            Speaker::Actor { id, .. } => Some(id),
            Speaker::Writer => None,
        }
    }

    /// Name shown in rendered rounds.
    pub fn label(&self) -> &str {
        match self {
            Speaker::Actor { name, .. } => name,
            Speaker::Writer => WRITER_LABEL,
        }
    }
}

/// One `(speaker, content)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TranscriptEntry {
    /// Author of the entry
    speaker: Speaker,
    /// Raw text as produced by the model
    content: String,
}

impl TranscriptEntry {
    /// Create an entry.
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
        }
    }
}

/// Ordered, append-only sequence of transcript entries.
///
/// There is no way to remove or reorder entries: the only way to grow a
/// transcript is [`Transcript::appended`], which returns a new value whose
/// prefix is the original.
///
/// # Examples
///
/// ```
/// use storyagent_core::{Speaker, Transcript, TranscriptEntry};
///
/// let empty = Transcript::new();
/// let one = empty.appended(TranscriptEntry::new(Speaker::Writer, "The end."));
///
/// assert_eq!(empty.len(), 0);
/// assert_eq!(one.len(), 1);
/// assert!(one.starts_with(&empty));
/// assert!(one.has_writer_entry());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<TranscriptEntry>);

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new transcript with `entry` added at the end.
    pub fn appended(&self, entry: TranscriptEntry) -> Self {
        let mut entries = self.0.clone();
        entries.push(entry);
        Self(entries)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the transcript has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.0
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptEntry> {
        self.0.iter()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.0.last()
    }

    /// Number of entries not written by the writer.
    pub fn acting_turns(&self) -> usize {
        self.0.iter().filter(|e| !e.speaker.is_writer()).count()
    }

    /// Whether the writer has already contributed.
    pub fn has_writer_entry(&self) -> bool {
        self.0.iter().any(|e| e.speaker.is_writer())
    }

    /// Whether `prefix` is an exact prefix of this transcript.
    pub fn starts_with(&self, prefix: &Transcript) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: &str, name: &str) -> Speaker {
        Speaker::Actor {
            id: ActorId::from(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn acting_turns_ignore_writer() {
        let transcript = Transcript::new()
            .appended(TranscriptEntry::new(actor("royal_advisor", "Eldara"), "a"))
            .appended(TranscriptEntry::new(actor("forest_shaman", "Thorn"), "b"))
            .appended(TranscriptEntry::new(Speaker::Writer, "story"));

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.acting_turns(), 2);
    }

    #[test]
    fn writer_label_is_not_an_actor() {
        assert_eq!(Speaker::Writer.label(), WRITER_LABEL);
        assert!(Speaker::Writer.actor_id().is_none());
        assert_eq!(actor("forest_shaman", "Thorn").label(), "Thorn");
    }

    #[test]
    fn appended_keeps_original_prefix() {
        let base = Transcript::new().appended(TranscriptEntry::new(actor("a", "A"), "first"));
        let grown = base.appended(TranscriptEntry::new(actor("b", "B"), "second"));

        assert!(grown.starts_with(&base));
        assert!(!base.starts_with(&grown));
        assert_eq!(base.len(), 1);
    }
}

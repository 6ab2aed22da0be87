//! Tag grammar embedded in model output.
//!
//! Controller output carries exactly one `<state>` and one `<actor>` block.
//! Actor output may carry any number of `<think>`, `<speak>` and `<action>`
//! regions in any order. Blocks may span lines; the first match wins.

use crate::ActorId;
use regex::Regex;
use std::sync::LazyLock;
use storyagent_error::{ParseError, ParseErrorKind};

static THINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>(.*?)</think>").expect("Valid think regex"));
static SPEAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<speak>(.*?)</speak>").expect("Valid speak regex"));
static ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<action>(.*?)</action>").expect("Valid action regex"));
static STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<state>(.*?)</state>").expect("Valid state regex"));
static ACTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<actor>(.*?)</actor>").expect("Valid actor regex"));

// An unterminated <think> hides everything after it.
static THINK_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<think>.*?(?:</think>|\z)").expect("Valid think strip regex")
});

/// Tags understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Tag {
    /// Private reasoning of an actor
    #[display("think")]
    Think,
    /// Words spoken aloud
    #[display("speak")]
    Speak,
    /// Physical actions, gestures, expressions
    #[display("action")]
    Action,
    /// Controller's updated world state
    #[display("state")]
    State,
    /// Controller's chosen actor id
    #[display("actor")]
    Actor,
}

impl Tag {
    fn pattern(self) -> &'static Regex {
        match self {
            Tag::Think => &THINK_RE,
            Tag::Speak => &SPEAK_RE,
            Tag::Action => &ACTION_RE,
            Tag::State => &STATE_RE,
            Tag::Actor => &ACTOR_RE,
        }
    }

    fn strip_pattern(self) -> &'static Regex {
        match self {
            Tag::Think => &THINK_STRIP_RE,
            other => other.pattern(),
        }
    }
}

/// Content of the first `<tag>...</tag>` block, trimmed.
///
/// # Examples
///
/// ```
/// use storyagent_core::{Tag, extract_first};
///
/// let text = "<actor> thorn </actor><actor>eldara</actor>";
/// assert_eq!(extract_first(text, Tag::Actor), Some("thorn"));
/// assert_eq!(extract_first(text, Tag::State), None);
/// ```
pub fn extract_first(text: &str, tag: Tag) -> Option<&str> {
    tag.pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Contents of every `<tag>...</tag>` block in order, trimmed.
pub fn regions(text: &str, tag: Tag) -> Vec<&str> {
    tag.pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect()
}

/// Remove every `<tag>...</tag>` block, tags included.
///
/// For [`Tag::Think`] an unterminated opening tag removes the rest of the
/// text as well.
///
/// # Examples
///
/// ```
/// use storyagent_core::{Tag, strip_regions};
///
/// let text = "<think>I distrust her.</think>\n<speak>Welcome, friend.</speak>";
/// assert_eq!(strip_regions(text, Tag::Think), "<speak>Welcome, friend.</speak>");
/// ```
pub fn strip_regions(text: &str, tag: Tag) -> String {
    tag.strip_pattern().replace_all(text, "").trim().to_string()
}

/// Parsed controller output: the new world state and the next actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerDirective {
    /// Replacement for the world's current state
    pub state: String,
    /// Actor selected to act next (not validated against any registry)
    pub actor: ActorId,
}

impl ControllerDirective {
    /// Parse controller output.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the raw output if either block is
    /// missing, or if the actor block holds only whitespace. A blank state
    /// block is accepted and clears the current situation.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyagent_core::ControllerDirective;
    ///
    /// let directive = ControllerDirective::parse("<state> calm evening </state>\n<actor> thorn </actor>").unwrap();
    /// assert_eq!(directive.state, "calm evening");
    /// assert_eq!(directive.actor.as_str(), "thorn");
    ///
    /// assert!(ControllerDirective::parse("<state>calm evening</state>").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let state = required(raw, Tag::State)?;
        let actor = required(raw, Tag::Actor)?;
        if actor.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyTag(Tag::Actor.to_string()),
                raw,
            ));
        }
        Ok(Self {
            state: state.to_string(),
            actor: ActorId::from(actor),
        })
    }
}

fn required(raw: &str, tag: Tag) -> Result<&str, ParseError> {
    extract_first(raw, tag)
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingTag(tag.to_string()), raw))
}

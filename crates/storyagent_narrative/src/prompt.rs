//! Prompt rendering for the three kinds of participants.
//!
//! Every prompt is rebuilt from scratch on each turn from the committed
//! [`StoryState`]; nothing is cached between turns.

use storyagent_core::{ActorDescriptor, ActorId, StoryState, Tag, Transcript, strip_regions};

/// Whose eyes a transcript is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility<'a> {
    /// Everything, including every actor's private reasoning
    Unfiltered,
    /// One actor: their own `<think>` regions stay, everyone else's are removed
    For(&'a ActorId),
}

/// Render the transcript as a sequence of rounds.
///
/// # Examples
///
/// ```
/// use storyagent_core::{ActorId, Speaker, Transcript, TranscriptEntry};
/// use storyagent_narrative::{Visibility, render_history};
///
/// let thorn = ActorId::from("thorn");
/// let ash = ActorId::from("ash");
/// let transcript = Transcript::new().appended(TranscriptEntry::new(
///     Speaker::Actor { id: ash.clone(), name: "Ash".to_string() },
///     "<think>She lies.</think><speak>Welcome.</speak>",
/// ));
///
/// let seen_by_thorn = render_history(&transcript, Visibility::For(&thorn));
/// assert!(seen_by_thorn.contains("### Ash's Round"));
/// assert!(!seen_by_thorn.contains("She lies."));
///
/// let seen_by_ash = render_history(&transcript, Visibility::For(&ash));
/// assert!(seen_by_ash.contains("She lies."));
/// ```
pub fn render_history(transcript: &Transcript, visibility: Visibility<'_>) -> String {
    transcript
        .iter()
        .map(|entry| {
            let content = match visibility {
                Visibility::For(viewer) if entry.speaker().actor_id() != Some(viewer) => {
                    strip_regions(entry.content(), Tag::Think)
                }
                _ => entry.content().clone(),
            };
            format!("### {}'s Round\n{}\n", entry.speaker().label(), content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full descriptions of every registered actor, keyed by id.
fn render_cast(state: &StoryState) -> String {
    state
        .actors()
        .iter()
        .map(|(id, descriptor)| format!("### ID: {}\n{}\n", id, descriptor))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Brief descriptions of every actor except `viewer`.
fn render_others(state: &StoryState, viewer: &ActorId) -> String {
    state
        .actors()
        .iter()
        .filter(|(id, _)| *id != viewer)
        .map(|(_, descriptor)| format!("### {}\n{}\n", descriptor.name(), descriptor.brief()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for an actor's turn.
pub fn actor_prompt(id: &ActorId, descriptor: &ActorDescriptor, state: &StoryState) -> String {
    format!(
        "You are participating in a role-playing game. You will be playing a character in a \
fictional world. You should act according to your character settings and respond to the world \
and other characters. Your input contains the detailed description of your character, the brief \
descriptions of other characters, the world state, and the role-playing history. The input texts \
are listed below.

## Character Description

{character}

## Other Characters

{others}

## World State

{world}

## Role Play History

{history}

Please respond as your character, maintaining your personality traits and staying in character. \
Your response should be natural and engaging, reflecting your character's unique personality. \
Your response should also advance the overall story. In your response, you are allowed to do the \
following:

1. Thinking. You may reason privately about the situation and your plans. Your thoughts must be \
placed between <think> and </think> tags. Other characters can never see your thoughts.
2. Speaking. You need to speak in first person. The words you speak must be placed between \
<speak> and </speak> tags.
3. Action. Besides physical actions, you can also take actions such as gestures, expressions, \
etc. The action you take must be placed between <action> and </action> tags.",
        character = descriptor,
        others = render_others(state, id),
        world = state.world(),
        history = render_history(state.messages(), Visibility::For(id)),
    )
}

/// Prompt for the controller's routing turn.
pub fn controller_prompt(state: &StoryState) -> String {
    format!(
        "You are the host of a role-playing game, and you are responsible for managing the flow \
of the story. In this game you have a set of characters, and they are interacting with each other \
in a fictional world round by round. In each round, you will authorize one character depending on \
the situation of the story, and only this authorized character is allowed to speak or act at this \
round. Additionally, you also need to update the world state based on the conversation history. \
Your input includes the detailed descriptions of the characters, the world state, and the \
role-playing history. The input texts are listed below.

## Characters

{cast}

## World State

{world}

## Role Play History

{history}

Please update the world state and select the character ID to authorize next. You can only update \
the \"current state\" field in the world state. You should place the updated current state in \
between <state> and </state> tags. You can only select the character ID from the list of \
characters. You should place the selected character ID in between <actor> and </actor> tags. Your \
output should be in the following format:

<state> UPDATED_CURRENT_WORLD_STATE </state>
<actor> CHARACTER_ID_TO_AUTHORIZE_NEXT </actor>

There are some IMPORTANT NOTES for you:
1. The \"description\" and the \"rules\" fields in the world state cannot be violated or changed. \
You should only output the updated current state in the <state> tags. The state should be a \
complete and brief description of the current situation.
2. You should choose the most appropriate character to respond according to the current \
situation. You need to ensure the coherence and interactivity of the role-playing game. You should \
also promote multi-party dialogue.",
        cast = render_cast(state),
        world = state.world(),
        history = render_history(state.messages(), Visibility::Unfiltered),
    )
}

/// Prompt for the writer's final turn.
pub fn writer_prompt(state: &StoryState, language: Option<&str>) -> String {
    let language_note = match language {
        Some(language) => format!("\n3. Write the story in {}.", language),
        None => String::new(),
    };

    format!(
        "You are a story writer. You will write a novel story based on the transcript of a \
role-playing game. In the role-playing game, there are several characters interacting with each \
other in a fictional world. In each round, only one character is allowed to speak or act. You are \
supposed to read the script of this whole game, and write a complete story based on the script. \
Your input includes the detailed descriptions of the characters, the world state, and the \
role-playing history. The input texts are listed below.

## Characters

{cast}

## World State

{world}

## Role Play History

{history}

Please write a complete story based on the above script. You should maintain the characters' \
personalities. You should make the story not only interesting and vivid, but also conforming to \
the script.

There are some IMPORTANT NOTES for you:
1. The contents between <think> and </think> tags are the private thoughts of the characters. \
You may use them to reveal motivations, but the other characters in the story do not know them.
2. The contents between <speak> and </speak> tags are spoken words, and the contents between \
<action> and </action> tags are actions.{language_note}",
        cast = render_cast(state),
        world = state.world(),
        history = render_history(state.messages(), Visibility::Unfiltered),
        language_note = language_note,
    )
}

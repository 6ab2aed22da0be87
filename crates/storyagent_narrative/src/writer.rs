//! Final narrative unit.

use crate::{TurnOutcome, prompt};
use std::sync::Arc;
use storyagent_core::{CurrentActor, Speaker, StoryState, TranscriptEntry};
use storyagent_error::StoryResult;
use storyagent_interface::{ModelGateway, UnitKind};
use tracing::{debug, info, instrument};

/// Turns the finished transcript into a story.
///
/// Calling it twice on the same state appends a second narrative; the
/// scheduler runs it at most once.
#[derive(Debug)]
pub struct WriterUnit<G: ModelGateway> {
    gateway: Arc<G>,
    model: String,
    language: Option<String>,
}

impl<G: ModelGateway> WriterUnit<G> {
    /// Create the writer.
    pub fn new(gateway: Arc<G>, model: impl Into<String>, language: Option<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
            language,
        }
    }

    /// Which unit this is, for turn records and error context.
    pub fn unit(&self) -> UnitKind {
        UnitKind::Writer
    }

    /// Write the narrative.
    ///
    /// Appends `(writer, narrative)` to the transcript and marks the story
    /// finished.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the model call fails or the completion is
    /// empty.
    #[instrument(skip(self, state), fields(model = %self.model, language = ?self.language))]
    pub async fn finalize(&self, state: &StoryState) -> StoryResult<TurnOutcome> {
        let prompt = prompt::writer_prompt(state, self.language.as_deref());
        debug!(prompt_len = prompt.len(), "Built writer prompt");

        let narrative = self.gateway.complete(&prompt, &self.model).await?;
        debug!(narrative = %narrative, "Writer response");
        info!(narrative_len = narrative.len(), "Writer finished the story");

        let entry = TranscriptEntry::new(Speaker::Writer, narrative.clone());
        let next = state.with_entry(entry, CurrentActor::Finished);
        Ok(TurnOutcome::new(next, narrative))
    }
}

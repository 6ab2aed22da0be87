//! Shared helpers for scheduler tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storyagent_core::{ActorDescriptor, ActorRegistry, GenerateRequest, GenerateResponse, WorldDescriptor};
use storyagent_error::{GatewayError, GatewayErrorKind, StoryResult};
use storyagent_interface::{ModelGateway, TurnObserver, TurnRecord};

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error(GatewayErrorKind),
}

/// Gateway that replays a queue of canned replies and records every prompt.
///
/// Once the queue runs dry every call fails, so a test that loops too far
/// fails loudly instead of hanging.
pub struct ScriptedGateway {
    script: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
    models: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    /// Replay `responses` in order.
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            models: Mutex::new(Vec::new()),
        }
    }

    /// Replay plain text replies in order.
    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(|t| MockResponse::Text(t.into())).collect())
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Every model id requested, in order.
    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate(&self, req: &GenerateRequest) -> StoryResult<GenerateResponse> {
        let prompt = req
            .messages()
            .iter()
            .map(|m| m.content().as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);
        self.models
            .lock()
            .unwrap()
            .push(req.model().clone().unwrap_or_default());

        match self.script.lock().unwrap().pop_front() {
            Some(MockResponse::Text(text)) => Ok(GenerateResponse::text_only(text)),
            Some(MockResponse::Error(kind)) => Err(GatewayError::new(kind).into()),
            None => Err(GatewayError::new(GatewayErrorKind::Request(
                "script exhausted".to_string(),
            ))
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Observer that keeps every record it sees.
#[derive(Default)]
pub struct RecordingObserver {
    records: Mutex<Vec<TurnRecord>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<TurnRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl TurnObserver for RecordingObserver {
    fn on_turn(&self, record: &TurnRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Controller reply routing to `actor` with a new world state.
pub fn route(state: &str, actor: &str) -> String {
    format!("<state> {} </state>\n<actor> {} </actor>", state, actor)
}

pub fn actor(name: &str, persona: &str) -> ActorDescriptor {
    ActorDescriptor::builder()
        .name(name)
        .gender("unknown")
        .age(50u32)
        .faction("Borderlands")
        .appearance("Weathered")
        .backstory(vec![format!("{} grew up near the border", name)])
        .persona(persona)
        .goal("Shape the fate of the valley")
        .build()
        .unwrap()
}

/// Registry with `royal_advisor` and `forest_shaman`.
pub fn two_actor_registry() -> ActorRegistry {
    let mut registry = ActorRegistry::new();
    registry.insert("royal_advisor", actor("Lord Aldric", "Cunning, ambitious"));
    registry.insert("forest_shaman", actor("Elder Thorn", "Mysterious, intuitive"));
    registry
}

pub fn world() -> WorldDescriptor {
    WorldDescriptor::new(
        "A kingdom bordered by an ancient forest",
        vec![
            "Magic exists but is rare".to_string(),
            "The forest is sacred".to_string(),
        ],
        "An uneasy truce holds",
    )
}

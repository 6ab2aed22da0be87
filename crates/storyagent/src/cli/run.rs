//! Story run command.

use crate::cli::RunArgs;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use storyagent::{
    ActorId, ActorRegistry, ConfigError, ConfigErrorKind, ControllerDirective, DeepSeekGateway,
    ExportError, JsonError, Speaker, StoryConfig, StoryResult, StoryScheduler, StoryState,
    TurnObserver, TurnRecord, UnitKind,
};
use tracing::{info, instrument, warn};

const TALE_BANNER: &str = "=== The Chronicler's Tale ===";

/// Prints each committed turn to stdout as the story unfolds.
struct ConsoleObserver {
    names: BTreeMap<ActorId, String>,
    show_routing: bool,
}

impl ConsoleObserver {
    fn new(registry: &ActorRegistry, show_routing: bool) -> Self {
        let names = registry
            .iter()
            .map(|(id, actor)| (id.clone(), actor.name().clone()))
            .collect();
        Self {
            names,
            show_routing,
        }
    }
}

impl TurnObserver for ConsoleObserver {
    fn on_turn(&self, record: &TurnRecord) {
        match record.unit() {
            UnitKind::Controller => {
                if !self.show_routing {
                    return;
                }
                if let Ok(directive) = ControllerDirective::parse(record.raw_output()) {
                    println!("[world] {}", directive.state);
                    println!("[next] {}\n", directive.actor);
                }
            }
            UnitKind::Actor(id) => {
                let name = self.names.get(id).map(String::as_str).unwrap_or(id.as_str());
                println!("### {}'s Round\n{}\n", name, record.raw_output());
            }
            UnitKind::Writer => {
                println!("{}\n\n{}", TALE_BANNER, record.raw_output());
            }
        }
    }
}

/// Load the cast, run the story and print it.
///
/// # Errors
///
/// Returns an error if configuration or cast is invalid, the model is not
/// supported, or any turn fails.
#[instrument(skip_all, fields(model = %config.model()))]
pub async fn run_story(config: &StoryConfig, args: &RunArgs, verbose: bool) -> StoryResult<()> {
    if !args.allow_any_model && !DeepSeekGateway::is_supported(config.model()) {
        warn!(
            model = %config.model(),
            "Unsupported model; pass --allow-any-model to use it anyway"
        );
        return Err(ConfigError::new(ConfigErrorKind::UnsupportedModel {
            model: config.model().clone(),
            supported: DeepSeekGateway::supported_models().join(", "),
        })
        .into());
    }

    let run = config.run_config()?;
    let (registry, world) = config.load_cast()?;
    let gateway = Arc::new(DeepSeekGateway::new(config.gateway())?);

    let observer = Arc::new(ConsoleObserver::new(&registry, verbose));
    let scheduler = StoryScheduler::new(gateway, registry, run).with_observer(observer);

    let finished = scheduler.run(scheduler.initial_state(world)).await?;

    if let Some(path) = &args.output {
        write_state(&finished, path)?;
    }

    let narrative_len = finished
        .messages()
        .last()
        .filter(|entry| entry.speaker() == &Speaker::Writer)
        .map(|entry| entry.content().len())
        .unwrap_or(0);
    info!(
        turns = finished.messages().len(),
        narrative_len,
        "Story complete"
    );
    Ok(())
}

fn write_state(state: &StoryState, path: &Path) -> StoryResult<()> {
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| JsonError::new(format!("Failed to serialize story state: {}", e)))?;
    std::fs::write(path, json)
        .map_err(|e| ExportError::new(path.display().to_string(), e.to_string()))?;
    info!(path = %path.display(), "Wrote story state");
    Ok(())
}

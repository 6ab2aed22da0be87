//! Configuration and cast validation.

use storyagent::{DeepSeekGateway, StoryConfig, StoryResult};
use tracing::{info, warn};

/// Load everything a run needs and print a summary, without calling the model.
pub fn check_cast(config: &StoryConfig) -> StoryResult<()> {
    let run = config.run_config()?;
    let (registry, world) = config.load_cast()?;

    if !DeepSeekGateway::is_supported(config.model()) {
        warn!(model = %config.model(), "Model is not a known DeepSeek model");
    }

    println!("World: {}", world.description());
    println!("Rules: {}", world.rules().len());
    println!("Current state: {}", world.state());
    println!("Actors:");
    for (id, actor) in registry.iter() {
        println!("  {}: {} ({})", id, actor.name(), actor.faction());
    }
    println!(
        "Model: {}, max iterations: {}, max turns: {}",
        run.model(),
        run.max_iterations(),
        run.max_turns()
    );

    info!(actors = registry.len(), "Configuration is valid");
    Ok(())
}

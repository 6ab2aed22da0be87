//! Full runs over the demo cast with a canned gateway.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use storyagent::{
    CurrentActor, GatewayError, GatewayErrorKind, GenerateRequest, GenerateResponse,
    ModelGateway, StoryConfig, StoryErrorKind, StoryResult, StoryScheduler,
};

/// Replays canned replies in order.
struct CannedGateway {
    replies: Mutex<Vec<String>>,
}

impl CannedGateway {
    fn new(replies: &[&str]) -> Self {
        let mut replies: Vec<String> = replies.iter().map(|r| r.to_string()).collect();
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
        }
    }
}

#[async_trait]
impl ModelGateway for CannedGateway {
    async fn generate(&self, _req: &GenerateRequest) -> StoryResult<GenerateResponse> {
        match self.replies.lock().unwrap().pop() {
            Some(reply) => Ok(GenerateResponse::text_only(reply)),
            None => Err(GatewayError::new(GatewayErrorKind::Request("no more replies".to_string())).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }
}

fn demo_config() -> anyhow::Result<StoryConfig> {
    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let mut config = StoryConfig::from_files(&[demos.join("storyagent.toml")])?;
    // Cast paths in the demo config are relative to the demo directory.
    let mut overrides = storyagent::ConfigOverrides {
        world: config.cast().world.as_ref().map(|p| demos.join(p)),
        ..Default::default()
    };
    overrides.actors = config
        .cast()
        .actors
        .iter()
        .map(|(id, path)| (id.clone(), demos.join(path)))
        .collect();
    config = config.with_overrides(overrides);
    Ok(config)
}

#[tokio::test]
async fn test_demo_cast_runs_to_the_writer() -> anyhow::Result<()> {
    let config = demo_config()?.with_overrides(storyagent::ConfigOverrides {
        max_iterations: Some(2),
        ..Default::default()
    });
    let (registry, world) = config.load_cast()?;
    assert_eq!(registry.len(), 3);

    let gateway = Arc::new(CannedGateway::new(&[
        "<state>The envoys sit around the artifact</state><actor>mountain_chieftain</actor>",
        "<speak>The mountains found it first.</speak><action>Slams a fist on the table.</action>",
        "<state>Tension rises</state><actor>forest_shaman</actor>",
        "<think>He lies.</think><speak>The forest remembers otherwise.</speak>",
        "At the meeting place of three realms...",
    ]));

    let scheduler = StoryScheduler::new(gateway, registry, config.run_config()?);
    let finished = scheduler.run(scheduler.initial_state(world)).await?;

    assert_eq!(finished.current_actor(), &CurrentActor::Finished);
    assert_eq!(finished.world().state(), "Tension rises");
    assert_eq!(finished.messages().acting_turns(), 2);

    let exported = serde_json::to_value(&finished)?;
    assert_eq!(exported["messages"].as_array().map(|m| m.len()), Some(3));
    assert_eq!(exported["messages"][2]["speaker"]["kind"], "writer");
    Ok(())
}

#[tokio::test]
async fn test_demo_cast_rejects_an_unknown_envoy() -> anyhow::Result<()> {
    let config = demo_config()?;
    let (registry, world) = config.load_cast()?;

    let gateway = Arc::new(CannedGateway::new(&[
        "<state>A stranger arrives</state><actor>sea_queen</actor>",
    ]));
    let scheduler = StoryScheduler::new(gateway, registry, config.run_config()?);

    let err = scheduler.run(scheduler.initial_state(world)).await.unwrap_err();
    assert!(matches!(err.root_kind(), StoryErrorKind::Routing(_)));
    assert!(err.raw_output().unwrap().contains("sea_queen"));
    Ok(())
}

//! State-transition contracts of the individual units.

mod test_utils;

use std::sync::Arc;
use storyagent_core::{ActorId, CurrentActor, Speaker, StoryState};
use storyagent_narrative::{ActorUnit, ControllerUnit, WriterUnit};
use test_utils::{ScriptedGateway, route, two_actor_registry, world};

fn initial() -> StoryState {
    StoryState::new(two_actor_registry(), world())
}

#[tokio::test]
async fn test_controller_rewrites_only_world_state() -> anyhow::Result<()> {
    let gateway = Arc::new(ScriptedGateway::texts([route(
        "Storm clouds gather\nover the grove",
        "forest_shaman",
    )]));
    let controller = ControllerUnit::new(gateway, "deepseek-chat");
    let before = initial();

    let outcome = controller.route(&before).await?;
    let after = outcome.state();

    assert_eq!(after.world().state(), "Storm clouds gather\nover the grove");
    assert_eq!(after.world().description(), before.world().description());
    assert_eq!(after.world().rules(), before.world().rules());
    assert_eq!(after.messages(), before.messages());
    assert_eq!(
        after.current_actor(),
        &CurrentActor::Actor(ActorId::from("forest_shaman"))
    );
    assert_eq!(before.world().state(), "An uneasy truce holds");
    Ok(())
}

#[tokio::test]
async fn test_actor_appends_raw_reply_under_its_name() -> anyhow::Result<()> {
    let reply = "<think>hm</think>\n<speak>Who goes there?</speak>\n<action>Raises a lantern.</action>";
    let gateway = Arc::new(ScriptedGateway::texts([reply]));
    let registry = two_actor_registry();
    let id = ActorId::from("royal_advisor");
    let descriptor = registry.get("royal_advisor").unwrap().clone();
    let unit = ActorUnit::new(id.clone(), descriptor, gateway, "deepseek-chat");

    let before = initial();
    let outcome = unit.act(&before).await?;
    let after = outcome.state();

    assert_eq!(outcome.raw_output(), reply);
    assert_eq!(after.messages().len(), before.messages().len() + 1);
    assert!(after.messages().starts_with(before.messages()));

    let entry = after.messages().last().unwrap();
    assert_eq!(entry.content(), reply);
    assert_eq!(
        entry.speaker(),
        &Speaker::Actor {
            id: id.clone(),
            name: "Lord Aldric".to_string()
        }
    );
    assert_eq!(after.current_actor(), &CurrentActor::Actor(id));
    assert_eq!(after.world(), before.world());
    Ok(())
}

#[tokio::test]
async fn test_transitions_are_append_only() -> anyhow::Result<()> {
    let gateway = Arc::new(ScriptedGateway::texts([
        "<speak>First</speak>".to_string(),
        route("Later", "royal_advisor"),
        "<speak>Second</speak>".to_string(),
        "Story".to_string(),
    ]));
    let registry = two_actor_registry();
    let advisor = ActorUnit::new(
        ActorId::from("royal_advisor"),
        registry.get("royal_advisor").unwrap().clone(),
        Arc::clone(&gateway),
        "deepseek-chat",
    );
    let controller = ControllerUnit::new(Arc::clone(&gateway), "deepseek-chat");
    let writer = WriterUnit::new(Arc::clone(&gateway), "deepseek-chat", None);

    let s0 = initial();
    let s1 = advisor.act(&s0).await?.state().clone();
    let s2 = controller.route(&s1).await?.state().clone();
    let s3 = advisor.act(&s2).await?.state().clone();
    let s4 = writer.finalize(&s3).await?.state().clone();

    let chain = [&s0, &s1, &s2, &s3, &s4];
    for pair in chain.windows(2) {
        assert!(pair[1].messages().len() >= pair[0].messages().len());
        assert!(pair[1].messages().starts_with(pair[0].messages()));
    }

    assert_eq!(s4.current_actor(), &CurrentActor::Finished);
    assert!(s4.messages().last().unwrap().speaker().is_writer());
    Ok(())
}

#[tokio::test]
async fn test_writer_twice_appends_twice() -> anyhow::Result<()> {
    let gateway = Arc::new(ScriptedGateway::texts(["One", "Two"]));
    let writer = WriterUnit::new(gateway, "deepseek-chat", Some("English".to_string()));
    let state = initial();

    let first = writer.finalize(&state).await?.state().clone();
    let second = writer.finalize(&first).await?.state().clone();

    assert_eq!(second.messages().len(), 2);
    assert!(second.messages().iter().all(|e| e.speaker().is_writer()));
    Ok(())
}

#[tokio::test]
async fn test_writer_prompt_carries_language() -> anyhow::Result<()> {
    let gateway = Arc::new(ScriptedGateway::texts(["Histoire"]));
    let writer = WriterUnit::new(Arc::clone(&gateway), "deepseek-chat", Some("French".to_string()));

    writer.finalize(&initial()).await?;
    assert!(gateway.prompts()[0].contains("Write the story in French."));
    Ok(())
}

//! Configuration file loading and cast resolution.

use std::fs;
use std::path::Path;
use storyagent::{ConfigOverrides, StoryConfig, StoryErrorKind};
use tempfile::TempDir;

const WORLD: &str = r#"{
    "description": "A kingdom bordered by an ancient forest",
    "rules": ["Magic is rare", "The forest is sacred"],
    "state": "An uneasy truce holds"
}"#;

fn actor_json(name: &str) -> String {
    format!(
        r#"{{
            "name": "{name}",
            "gender": "male",
            "age": 54,
            "race_or_faction": "Human",
            "appearance": "Tall and gaunt",
            "backstories": ["Served two kings"],
            "persona": "Cunning",
            "goal": "Secure the forest"
        }}"#
    )
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_file_values_override_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write(
        dir.path(),
        "storyagent.toml",
        r#"
model = "deepseek-reasoner"
language = "English"
max_iterations = 4

[gateway]
timeout_secs = 30
max_retries = 0

[log]
json = true
file = "story_agents.log"
"#,
    );

    let config = StoryConfig::from_files(&[path])?;

    assert_eq!(config.model(), "deepseek-reasoner");
    assert_eq!(config.language().as_deref(), Some("English"));
    assert_eq!(*config.max_iterations(), 4);
    assert_eq!(*config.gateway().timeout_secs(), 30);
    assert_eq!(*config.gateway().max_retries(), 0);
    assert_eq!(config.gateway().api_key_env(), "DEEPSEEK_API_KEY");
    assert!(config.log().json);
    assert_eq!(
        config.log().file.as_deref(),
        Some(Path::new("story_agents.log"))
    );
    assert_eq!(config.run_config()?.max_turns(), 9);
    Ok(())
}

#[test]
fn test_later_files_win() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let base = write(dir.path(), "base.toml", "max_iterations = 4\nlanguage = \"English\"\n");
    let local = write(dir.path(), "local.toml", "max_iterations = 2\n");

    let config = StoryConfig::from_files(&[base, local])?;

    assert_eq!(*config.max_iterations(), 2);
    assert_eq!(config.language().as_deref(), Some("English"));
    Ok(())
}

#[test]
fn test_missing_file_is_a_config_error() {
    let err = StoryConfig::from_files(&["/nonexistent/storyagent.toml"]).unwrap_err();
    assert!(matches!(err.kind(), StoryErrorKind::Config(_)));
}

#[test]
fn test_small_turn_ceiling_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "storyagent.toml", "max_turns = 2\n");

    let config = StoryConfig::from_files(&[path])?;
    assert!(config.run_config().is_err());
    Ok(())
}

#[test]
fn test_cast_loads_from_config_and_flags() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let world = write(dir.path(), "world.json", WORLD);
    let advisor = write(dir.path(), "advisor.json", &actor_json("Lord Aldric"));
    let shaman = write(dir.path(), "shaman.json", &actor_json("Elder Thorn"));

    let toml = format!(
        "[cast]\nworld = {:?}\n\n[cast.actors]\nroyal_advisor = {:?}\n",
        world.display().to_string(),
        advisor.display().to_string()
    );
    let path = write(dir.path(), "storyagent.toml", &toml);

    let config = StoryConfig::from_files(&[path])?.with_overrides(ConfigOverrides {
        actors: vec![("forest_shaman".to_string(), shaman)],
        ..Default::default()
    });

    let (registry, world) = config.load_cast()?;
    let ids: Vec<String> = registry.ids().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["forest_shaman", "royal_advisor"]);
    assert_eq!(registry.get("royal_advisor").unwrap().name(), "Lord Aldric");
    assert_eq!(world.rules().len(), 2);
    Ok(())
}

#[test]
fn test_cast_without_actors_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let world = write(dir.path(), "world.json", WORLD);

    let config = StoryConfig::default().with_overrides(ConfigOverrides {
        world: Some(world),
        ..Default::default()
    });

    let err = config.load_cast().unwrap_err();
    assert!(matches!(err.kind(), StoryErrorKind::Config(_)));
    Ok(())
}

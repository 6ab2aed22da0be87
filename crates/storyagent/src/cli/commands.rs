//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storyagent::ConfigOverrides;

/// StoryAgent - turn-based role-play story generation
#[derive(Parser, Debug)]
#[command(name = "storyagent")]
#[command(about = "Turn-based role-play story generation driven by a language model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a story to completion and print it
    Run(RunArgs),

    /// Validate configuration and cast without calling the model
    Check {
        #[command(flatten)]
        cast: CastArgs,
    },
}

/// Where configuration and cast come from.
#[derive(Args, Debug, Clone, Default)]
pub struct CastArgs {
    /// Configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// World descriptor JSON file
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// Actor descriptor, repeatable
    #[arg(long = "actor", value_name = "ID=PATH", value_parser = parse_actor)]
    pub actors: Vec<(String, PathBuf)>,
}

/// Options for a story run.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub cast: CastArgs,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Language the final story is written in
    #[arg(long)]
    pub language: Option<String>,

    /// Acting turns before the writer takes over
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Hard ceiling on controller, actor and writer turns
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Write the final story state as JSON
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Accept model ids the gateway does not list
    #[arg(long)]
    pub allow_any_model: bool,
}

impl CastArgs {
    /// Cast-related overrides.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            world: self.world.clone(),
            actors: self.actors.clone(),
            ..Default::default()
        }
    }
}

impl RunArgs {
    /// Every command-line override for a run.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            language: self.language.clone(),
            max_iterations: self.max_iterations,
            max_turns: self.max_turns,
            ..self.cast.overrides()
        }
    }
}

fn parse_actor(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((id, path)) if !id.trim().is_empty() && !path.trim().is_empty() => {
            Ok((id.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected ID=PATH, got '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_flag_splits_on_first_equals() {
        assert_eq!(
            parse_actor("thorn=cast/a=b.json").unwrap(),
            ("thorn".to_string(), PathBuf::from("cast/a=b.json"))
        );
        assert!(parse_actor("thorn").is_err());
        assert!(parse_actor("=path.json").is_err());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from([
            "storyagent",
            "run",
            "--world",
            "world.json",
            "--actor",
            "thorn=thorn.json",
            "--actor",
            "ash=ash.json",
            "--max-iterations",
            "3",
            "-v",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Run(args) => {
                let overrides = args.overrides();
                assert_eq!(overrides.max_iterations, Some(3));
                assert_eq!(overrides.actors.len(), 2);
                assert_eq!(overrides.world, Some(PathBuf::from("world.json")));
            }
            other => panic!("expected run, got {:?}", other),
        }
    }
}

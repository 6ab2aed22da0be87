//! StoryAgent CLI binary.
//!
//! This binary provides command-line access to StoryAgent:
//! - Run a story with a configured cast and print it
//! - Validate configuration and cast files

use clap::Parser;
use std::process::ExitCode;
use storyagent::{ObservabilityConfig, StoryConfig, StoryError, init_observability};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, check_cast, run_story};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let (cast, overrides) = match &cli.command {
        Commands::Run(args) => (&args.cast, args.overrides()),
        Commands::Check { cast } => (cast, cast.overrides()),
    };

    let config = match StoryConfig::load(cast.config.as_deref()) {
        Ok(config) => config.with_overrides(overrides),
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    let mut observability = ObservabilityConfig::new()
        .with_json_logs(cli.json_logs || config.log().json)
        .with_log_file(config.log().file.clone());
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    if let Err(e) = init_observability(&observability) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    // Execute the requested command
    let result = match &cli.command {
        Commands::Run(args) => run_story(&config, args, cli.verbose).await,
        Commands::Check { .. } => check_cast(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Print an error with the failing unit, turn and raw model output.
fn report(err: &StoryError) {
    eprintln!("Error: {}", err);
    if let Some(turn) = err.turn() {
        eprintln!("Failed unit: {}", turn.unit);
        eprintln!("Turn: {}", turn.turn);
    }
    if let Some(raw) = err.raw_output() {
        eprintln!("Raw model output:\n{}", raw);
    }
}

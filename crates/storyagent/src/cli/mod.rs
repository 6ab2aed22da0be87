//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyagent binary.

mod check;
mod commands;
mod run;

pub use check::check_cast;
pub use commands::{Cli, Commands, RunArgs};
pub use run::run_story;

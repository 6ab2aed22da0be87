//! Turn scheduling for StoryAgent.
//!
//! A story run is a fixed loop over three kinds of participants:
//!
//! - the [`ControllerUnit`] updates the world state and picks who acts next
//! - one [`ActorUnit`] per character speaks and acts in character
//! - the [`WriterUnit`] turns the finished transcript into a narrative
//!
//! [`StoryScheduler`] drives them as an explicit state machine
//! (`Routing -> Acting -> ... -> Writing -> Done`), threading a fresh
//! [`StoryState`](storyagent_core::StoryState) through every turn.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actor;
mod config;
mod controller;
mod outcome;
mod prompt;
mod scheduler;
mod writer;

pub use actor::ActorUnit;
pub use config::RunConfig;
pub use controller::ControllerUnit;
pub use outcome::TurnOutcome;
pub use prompt::{
    Visibility, actor_prompt, controller_prompt, render_history, writer_prompt,
};
pub use scheduler::{SchedulerState, StoryScheduler, should_write};
pub use writer::WriterUnit;

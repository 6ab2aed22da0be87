//! Error types for the StoryAgent story engine.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Failures raised while a participant is taking its turn are wrapped in a
//! [`TurnError`] that records which unit failed and at which turn.
//!
//! # Examples
//!
//! ```
//! use storyagent_error::{StoryErrorKind, StoryResult, RoutingError};
//!
//! fn route() -> StoryResult<()> {
//!     Err(RoutingError::new("unknown_actor", vec!["thorn".to_string()], "<actor>unknown_actor</actor>"))?
//! }
//!
//! let err = route().unwrap_err();
//! assert!(matches!(err.root_kind(), StoryErrorKind::Routing(_)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod budget;
mod config;
mod error;
mod export;
mod gateway;
mod json;
mod parse;
mod routing;
mod turn;

pub use budget::BudgetExceededError;
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{StoryError, StoryErrorKind, StoryResult};
pub use export::ExportError;
pub use gateway::{GatewayError, GatewayErrorKind, RetryableError};
pub use json::JsonError;
pub use parse::{ParseError, ParseErrorKind};
pub use routing::RoutingError;
pub use turn::TurnError;

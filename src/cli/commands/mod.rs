//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`onaptests run`, `onaptests list`)
//! - Shared settings loading
//! - Consistent exit codes: 0 passed, 1 failed, 2 configuration error

pub mod dispatcher;
pub mod list;
pub mod run;
pub mod show;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_CONFIG, EXIT_FAILED};

//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`NonInteractiveUI`] writing to the terminal
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use onaptests::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("basic_vm");
//! ui.success("Scenario passed");
//!
//! assert_eq!(ui.headers(), ["basic_vm"]);
//! assert_eq!(ui.successes(), ["Scenario passed"]);
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{format_duration, format_seconds};
pub use theme::{should_use_colors, OnapTheme};

use std::time::Duration;

use crate::reports::Report;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show one recorded step outcome.
    fn show_record(&mut self, record: &Report);

    /// Show the end-of-run summary.
    fn show_summary(&mut self, summary: &RunSummary);
}

/// Counts shown at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub usecase: String,
    pub success: bool,
    pub passed: usize,
    pub failed: usize,
    pub duration: Duration,
}

/// Create the terminal UI.
pub fn create_ui(mode: OutputMode, colors: bool) -> Box<dyn UserInterface> {
    Box::new(NonInteractiveUI::new(mode, OnapTheme::for_colors(colors)))
}

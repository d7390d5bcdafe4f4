//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Exit code for a failed scenario.
pub const EXIT_FAILED: i32 = 1;

/// Exit code for settings or template problems found before any call.
pub const EXIT_CONFIG: i32 = 2;

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher reading settings from `settings_path`, if any.
    pub fn new(settings_path: Option<PathBuf>) -> Self {
        Self { settings_path }
    }

    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.settings_path();
        match &cli.command {
            Commands::Run(args) => {
                let cmd = super::run::RunCommand::new(settings, args.clone());
                cmd.execute(ui)
            }
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(settings, args.clone());
                cmd.execute(ui)
            }
            Commands::Validate(args) => {
                let cmd = super::validate::ValidateCommand::new(settings, args.clone());
                cmd.execute(ui)
            }
            Commands::Show(args) => {
                let cmd = super::show::ShowCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(EXIT_CONFIG);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn dispatcher_keeps_settings_path() {
        let dispatcher = CommandDispatcher::new(Some(PathBuf::from("settings.yaml")));
        assert_eq!(dispatcher.settings_path(), Some(Path::new("settings.yaml")));
        assert!(CommandDispatcher::new(None).settings_path().is_none());
    }

    #[test]
    fn dispatch_routes_list() {
        let cli = Cli::parse_from(["onaptests", "list"]);
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(None).dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_output("basic_vm"));
    }

    #[test]
    fn dispatch_routes_run_with_unknown_scenario() {
        let cli = Cli::parse_from(["onaptests", "run", "nope"]);
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(None).dispatch(&cli, &mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(ui.has_output("Unknown scenario: nope"));
    }
}

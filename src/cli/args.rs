//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ui::OutputMode;

/// onaptests - End-to-end lifecycle scenarios for a network orchestration platform.
#[derive(Debug, Parser)]
#[command(name = "onaptests")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings file (defaults are used when unset)
    #[arg(short, long, global = true, env = "ONAPTESTS_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Show every recorded step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output mode: verbose, normal, quiet or silent (overrides -v/-q)
    #[arg(long, global = true)]
    pub output: Option<OutputMode>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output mode from `--output`, else from `-v`/`-q`.
    pub fn output_mode(&self) -> OutputMode {
        self.output
            .unwrap_or_else(|| OutputMode::from_flags(self.verbose, self.quiet))
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a scenario: execute, clean up, report
    Run(RunArgs),

    /// List registered scenarios
    List(ListArgs),

    /// Validate settings and the service template
    Validate(ValidateArgs),

    /// Print a previously generated JSON report
    Show(ShowArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Scenario to run
    pub scenario: String,

    /// Service template entry to use (defaults to the scenario's service)
    #[arg(long)]
    pub service: Option<String>,

    /// Keep created resources
    #[arg(long)]
    pub no_cleanup: bool,

    /// Directory for the HTML and JSON reports
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,

    /// Service template file (overrides the settings)
    #[arg(long)]
    pub service_template: Option<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Service template entry to validate (defaults to the settings' service)
    #[arg(long)]
    pub service: Option<String>,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Path to a reporting.json file
    pub report: PathBuf,

    /// Only show failed steps
    #[arg(long)]
    pub failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_options() {
        let cli = Cli::parse_from([
            "onaptests",
            "--settings",
            "s.yaml",
            "run",
            "basic_vm",
            "--no-cleanup",
            "--reports-dir",
            "out",
        ]);

        assert_eq!(cli.settings, Some(PathBuf::from("s.yaml")));
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.scenario, "basic_vm");
                assert!(args.no_cleanup);
                assert_eq!(args.reports_dir, Some(PathBuf::from("out")));
                assert!(args.service.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["onaptests", "list", "--json", "-q"]);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::List(ListArgs { json: true })));
    }

    #[test]
    fn output_flag_overrides_quiet() {
        let cli = Cli::parse_from(["onaptests", "-q", "--output", "silent", "list"]);
        assert_eq!(cli.output_mode(), OutputMode::Silent);

        let cli = Cli::parse_from(["onaptests", "-v", "list"]);
        assert_eq!(cli.output_mode(), OutputMode::Verbose);

        assert!(Cli::try_parse_from(["onaptests", "--output", "loud", "list"]).is_err());
    }

    #[test]
    fn run_requires_scenario() {
        assert!(Cli::try_parse_from(["onaptests", "run"]).is_err());
    }
}

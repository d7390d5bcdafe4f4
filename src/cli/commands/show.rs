//! Show command implementation.
//!
//! The `onaptests show` command prints a JSON report written by an earlier
//! run.

use crate::cli::args::ShowArgs;
use crate::error::Result;
use crate::reports::{JsonReport, JsonStep, ReportStepStatus};
use crate::ui::theme::OnapTheme;
use crate::ui::{format_seconds, UserInterface};

use super::dispatcher::{Command, CommandResult, EXIT_CONFIG, EXIT_FAILED};

/// The show command implementation.
pub struct ShowCommand {
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(args: ShowArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ShowArgs {
        &self.args
    }

    fn format_step(theme: &OnapTheme, step: &JsonStep) -> String {
        format!(
            "  {} {} {}",
            theme.format_status(step.status),
            step.description,
            theme
                .duration
                .apply_to(format!("({})", format_seconds(step.duration)))
        )
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = match JsonReport::load(&self.args.report) {
            Ok(r) => r,
            Err(e) => {
                ui.error(&format!(
                    "Cannot read report {}: {}",
                    self.args.report.display(),
                    e
                ));
                return Ok(CommandResult::failure(EXIT_CONFIG));
            }
        };

        let theme = OnapTheme::new();
        ui.message(&format!("{}", theme.header.apply_to(&report.usecase)));
        if !report.details.is_empty() {
            ui.message(&format!("{}", theme.dim.apply_to(&report.details)));
        }
        if !report.components.is_empty() {
            ui.message(&format!(
                "{}",
                theme
                    .dim
                    .apply_to(format!("Components: {}", report.components.join(", ")))
            ));
        }

        let failed = report
            .steps
            .iter()
            .filter(|s| s.status == ReportStepStatus::Fail)
            .count();
        for step in &report.steps {
            if self.args.failed && step.status != ReportStepStatus::Fail {
                continue;
            }
            ui.message(&Self::format_step(&theme, step));
        }
        ui.message(&format!(
            "{} steps, {} failed",
            report.steps.len(),
            failed
        ));

        // A report with failures fails the command, so it can gate a pipeline.
        if failed == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_FAILED))
        }
    }
}

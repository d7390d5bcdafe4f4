//! Terminal UI for CI and headless runs.

use super::progress::{format_duration, format_seconds};
use super::theme::OnapTheme;
use super::{OutputMode, RunSummary, UserInterface};
use crate::reports::{Report, ReportStepStatus};

/// Line-oriented UI writing to stdout and stderr.
///
/// Never prompts; every run of the harness is unattended.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: OnapTheme,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode, theme: OnapTheme) -> Self {
        Self { mode, theme }
    }

    /// Plain-text UI, used when output is not a terminal.
    pub fn plain(mode: OutputMode) -> Self {
        Self::new(mode, OnapTheme::plain())
    }

    /// Render one step line.
    pub fn format_record(&self, record: &Report) -> String {
        format!(
            "{} {} {}",
            self.theme.format_status(record.step_execution_status),
            record.step_description,
            self.theme
                .duration
                .apply_to(format!("({})", format_seconds(record.step_execution_duration)))
        )
    }

    /// Render the summary line.
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let text = format!(
            "{}: {} passed, {} failed in {}",
            summary.usecase,
            summary.passed,
            summary.failed,
            format_duration(summary.duration)
        );
        if summary.success {
            self.theme.format_success(&text)
        } else {
            self.theme.format_error(&text)
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn show_record(&mut self, record: &Report) {
        let visible = match record.step_execution_status {
            ReportStepStatus::Pass => self.mode.shows_steps(),
            _ => self.mode.shows_progress(),
        };
        if visible {
            println!("  {}", self.format_record(record));
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if self.mode.shows_status() {
            println!("{}", self.format_summary(summary));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn record_line_shows_status_description_and_duration() {
        let ui = NonInteractiveUI::plain(OutputMode::Normal);
        let record = Report::new(
            "[SO] VnfInstancesCreateStep: Create vnf instances using SO.",
            ReportStepStatus::Fail,
            Duration::from_millis(1500),
            "SO",
        );

        assert_eq!(
            ui.format_record(&record),
            "✗ FAIL [SO] VnfInstancesCreateStep: Create vnf instances using SO. (1.5s)"
        );
    }

    #[test]
    fn summary_line() {
        let ui = NonInteractiveUI::plain(OutputMode::Quiet);
        let summary = RunSummary {
            usecase: "basic_vm".to_string(),
            success: true,
            passed: 11,
            failed: 0,
            duration: Duration::from_secs(90),
        };
        assert_eq!(
            ui.format_summary(&summary),
            "✓ basic_vm: 11 passed, 0 failed in 1.5m"
        );
    }

    #[test]
    fn output_mode_is_kept() {
        let ui = NonInteractiveUI::plain(OutputMode::Silent);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}

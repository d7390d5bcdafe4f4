//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.

use super::{OutputMode, RunSummary, UserInterface};
use crate::reports::Report;

/// Captures every UI interaction.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    records: Vec<Report>,
    summaries: Vec<RunSummary>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Step records shown, in order.
    pub fn records(&self) -> &[Report] {
        &self.records
    }

    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    /// Whether any captured message of any kind contains `text`.
    pub fn has_output(&self, text: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .chain(&self.headers)
            .any(|m| m.contains(text))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_record(&mut self, record: &Report) {
        self.records.push(record.clone());
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        self.summaries.push(summary.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportStepStatus;
    use std::time::Duration;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");

        assert_eq!(ui.messages(), ["hello"]);
        assert_eq!(ui.warnings(), ["careful"]);
        assert_eq!(ui.errors(), ["broken"]);
        assert!(ui.has_output("care"));
        assert!(!ui.has_output("missing"));
    }

    #[test]
    fn captures_records_and_summaries() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        ui.show_record(&Report::new(
            "[AAI] CustomerCreateStep: Create customer in AAI.",
            ReportStepStatus::Pass,
            Duration::ZERO,
            "AAI",
        ));
        ui.show_summary(&RunSummary {
            usecase: "basic_vm".to_string(),
            success: true,
            passed: 1,
            failed: 0,
            duration: Duration::ZERO,
        });

        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        assert_eq!(ui.records().len(), 1);
        assert!(ui.summaries()[0].success);
    }
}

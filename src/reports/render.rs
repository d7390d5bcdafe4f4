//! Report formatters.
//!
//! Renders collected records as machine-readable JSON or as a
//! self-contained HTML page.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::collection::{Report, ReportStepStatus, ReportsCollection};
use crate::error::Result;

/// File name of the JSON artifact.
pub const JSON_REPORT_FILE: &str = "reporting.json";

/// File name of the HTML artifact.
pub const HTML_REPORT_FILE: &str = "reporting.html";

/// Aggregate fields rendered alongside the step records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Use-case (scenario) name.
    pub usecase: String,
    /// Free-text details.
    pub details: String,
    /// Components involved in the use case.
    pub components: Vec<String>,
}

/// Trait for formatting a report.
pub trait ReportFormatter {
    /// Format the records to the given writer.
    fn format<W: Write>(
        &self,
        summary: &ReportSummary,
        records: &[Report],
        writer: &mut W,
    ) -> std::io::Result<()>;
}

/// JSON document written to `reporting.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub usecase: String,
    pub details: String,
    pub components: Vec<String>,
    pub steps: Vec<JsonStep>,
}

/// One step entry of [`JsonReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonStep {
    pub description: String,
    pub status: ReportStepStatus,
    pub duration: f64,
    pub component: String,
}

impl JsonReport {
    /// Build the document from a summary and records.
    pub fn build(summary: &ReportSummary, records: &[Report]) -> Self {
        Self {
            usecase: summary.usecase.clone(),
            details: summary.details.clone(),
            components: summary.components.clone(),
            steps: records
                .iter()
                .map(|r| JsonStep {
                    description: r.step_description.clone(),
                    status: r.step_execution_status,
                    duration: r.step_execution_duration,
                    component: r.step_component.clone(),
                })
                .collect(),
        }
    }

    /// Load a previously written document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Formats a report as JSON.
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        summary: &ReportSummary,
        records: &[Report],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let output = JsonReport::build(summary, records);
        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;
        Ok(())
    }
}

/// Formats a report as a standalone HTML page.
pub struct HtmlFormatter {
    generated_at: DateTime<Utc>,
}

impl HtmlFormatter {
    /// Create a formatter stamped with the current time.
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
        }
    }

    /// Create a formatter with a fixed timestamp.
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at }
    }

    fn status_class(status: ReportStepStatus) -> &'static str {
        match status {
            ReportStepStatus::Pass => "pass",
            ReportStepStatus::Fail => "fail",
            ReportStepStatus::NotExecuted => "not-executed",
        }
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl ReportFormatter for HtmlFormatter {
    fn format<W: Write>(
        &self,
        summary: &ReportSummary,
        records: &[Report],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let failed = records
            .iter()
            .filter(|r| r.step_execution_status == ReportStepStatus::Fail)
            .count();
        let usecase = escape_html(&summary.usecase);

        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"en\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "<meta charset=\"utf-8\">")?;
        writeln!(writer, "<title>{} report</title>", usecase)?;
        writeln!(
            writer,
            "<style>td,th{{padding:4px 8px;text-align:left}}.pass{{color:#2e7d32}}.fail{{color:#c62828;font-weight:bold}}.not-executed{{color:#757575}}</style>"
        )?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "<h1>{}</h1>", usecase)?;
        writeln!(writer, "<p>{}</p>", escape_html(&summary.details))?;
        writeln!(
            writer,
            "<p>Components: {}</p>",
            escape_html(&summary.components.join(", "))
        )?;
        writeln!(
            writer,
            "<p>Generated at {}: {} step(s), {} failed</p>",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            records.len(),
            failed
        )?;
        writeln!(writer, "<table>")?;
        writeln!(
            writer,
            "<tr><th>Description</th><th>Component</th><th>Status</th><th>Duration (s)</th></tr>"
        )?;
        for r in records {
            writeln!(
                writer,
                "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{:.2}</td></tr>",
                escape_html(&r.step_description),
                escape_html(&r.step_component),
                Self::status_class(r.step_execution_status),
                r.step_execution_status,
                r.step_execution_duration
            )?;
        }
        writeln!(writer, "</table>")?;
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        Ok(())
    }
}

impl ReportsCollection {
    /// Render the collected records into `dir` as HTML and JSON.
    ///
    /// Returns the paths written, HTML first.
    pub fn generate_report(&self, summary: &ReportSummary, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let records = self.records();

        let html_path = dir.join(HTML_REPORT_FILE);
        let mut html = Vec::new();
        HtmlFormatter::new().format(summary, &records, &mut html)?;
        fs::write(&html_path, html)?;

        let json_path = dir.join(JSON_REPORT_FILE);
        let mut json = Vec::new();
        JsonFormatter::new().format(summary, &records, &mut json)?;
        fs::write(&json_path, json)?;

        info!(
            "Report for {} written to {}",
            summary.usecase,
            dir.display()
        );
        Ok(vec![html_path, json_path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn summary() -> ReportSummary {
        ReportSummary {
            usecase: "basic_vm".to_string(),
            details: "VM instantiation".to_string(),
            components: vec!["SDC".to_string(), "SO".to_string()],
        }
    }

    fn records() -> Vec<Report> {
        vec![
            Report::new(
                "[SDC] VendorOnboardStep: Onboard vendor in SDC",
                ReportStepStatus::Pass,
                Duration::from_secs(2),
                "SDC",
            ),
            Report::new(
                "[SO] VnfInstancesCreateStep: Create VNF instances in SO",
                ReportStepStatus::Fail,
                Duration::from_millis(500),
                "SO",
            ),
        ]
    }

    #[test]
    fn json_contains_schema_fields() {
        let mut out = Vec::new();
        JsonFormatter::new()
            .format(&summary(), &records(), &mut out)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["usecase"], "basic_vm");
        assert_eq!(value["details"], "VM instantiation");
        assert_eq!(value["components"][1], "SO");
        assert_eq!(value["steps"].as_array().unwrap().len(), 2);
        assert_eq!(value["steps"][1]["status"], "FAIL");
        assert_eq!(value["steps"][0]["duration"], 2.0);
        assert_eq!(value["steps"][0]["component"], "SDC");
    }

    #[test]
    fn html_escapes_and_marks_status() {
        let mut records = records();
        records[0].step_description = "<script>".to_string();
        let mut out = Vec::new();
        HtmlFormatter::new()
            .format(&summary(), &records, &mut out)
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("class=\"fail\">FAIL"));
        assert!(html.contains("2 step(s), 1 failed"));
    }

    #[test]
    fn generate_report_writes_both_files() {
        let temp = TempDir::new().unwrap();
        let reports = ReportsCollection::new();
        for r in records() {
            reports.put(r);
        }

        let dir = temp.path().join("out");
        let paths = reports.generate_report(&summary(), &dir).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(dir.join(HTML_REPORT_FILE).exists());
        let loaded = JsonReport::load(&dir.join(JSON_REPORT_FILE)).unwrap();
        assert_eq!(loaded, JsonReport::build(&summary(), &records()));
    }
}

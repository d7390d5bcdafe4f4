//! Step outcome reporting.
//!
//! - [`ReportsCollection`] - append-only log shared by a whole step tree
//! - [`Report`] / [`ReportStepStatus`] - one recorded outcome
//! - [`render`] - JSON and HTML artifacts
//!
//! # Example
//!
//! ```
//! use onaptests::reports::{Report, ReportStepStatus, ReportsCollection};
//! use std::time::Duration;
//!
//! let reports = ReportsCollection::new();
//! reports.put(Report::new("[SDC] Vendor: onboard", ReportStepStatus::Fail, Duration::ZERO, "SDC"));
//! reports.put(Report::new("[SDC] Vendor: onboard", ReportStepStatus::Pass, Duration::ZERO, "SDC"));
//!
//! assert_eq!(reports.records().len(), 2);
//! assert_eq!(reports.report()["[SDC] Vendor: onboard"], ReportStepStatus::Pass);
//! ```

pub mod collection;
pub mod render;

pub use collection::{Report, ReportStepStatus, ReportsCollection};
pub use render::{
    HtmlFormatter, JsonFormatter, JsonReport, JsonStep, ReportFormatter, ReportSummary,
    HTML_REPORT_FILE, JSON_REPORT_FILE,
};

//! Step outcome records and the shared collection they are appended to.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Execution status recorded for a step phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStepStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "NOT EXECUTED")]
    NotExecuted,
}

impl ReportStepStatus {
    /// Label used in rendered reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStepStatus::Pass => "PASS",
            ReportStepStatus::Fail => "FAIL",
            ReportStepStatus::NotExecuted => "NOT EXECUTED",
        }
    }
}

impl fmt::Display for ReportStepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outcome record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// `[component] name: description`, or `... name cleanup: ...` for cleanup.
    pub step_description: String,

    /// Outcome of the recorded phase.
    pub step_execution_status: ReportStepStatus,

    /// Elapsed time in seconds.
    pub step_execution_duration: f64,

    /// Platform component the step talks to.
    pub step_component: String,
}

impl Report {
    /// Create a record from a measured duration.
    pub fn new(
        description: impl Into<String>,
        status: ReportStepStatus,
        duration: Duration,
        component: impl Into<String>,
    ) -> Self {
        Self {
            step_description: description.into(),
            step_execution_status: status,
            step_execution_duration: duration.as_secs_f64(),
            step_component: component.into(),
        }
    }
}

/// Append-only, ordered log of step outcomes for one scenario run.
///
/// Owned by the root of a step tree and shared with every descendant.
/// The model is single-threaded, so appends go through a `RefCell`.
#[derive(Debug, Default)]
pub struct ReportsCollection {
    collection: RefCell<Vec<Report>>,
}

impl ReportsCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. No deduplication, no validation.
    pub fn put(&self, report: Report) {
        self.collection.borrow_mut().push(report);
    }

    /// Every record in completion order.
    pub fn records(&self) -> Vec<Report> {
        self.collection.borrow().clone()
    }

    /// Latest status per description; later records overwrite earlier ones.
    pub fn report(&self) -> HashMap<String, ReportStepStatus> {
        self.collection
            .borrow()
            .iter()
            .map(|r| (r.step_description.clone(), r.step_execution_status))
            .collect()
    }

    /// Number of FAIL records.
    pub fn failed_steps_num(&self) -> usize {
        self.collection
            .borrow()
            .iter()
            .filter(|r| r.step_execution_status == ReportStepStatus::Fail)
            .count()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.collection.borrow().len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.collection.borrow().is_empty()
    }
}

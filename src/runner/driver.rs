//! Scenario driver: execute, clean up, report.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{HarnessError, Result};
use crate::reports::{Report, ReportStepStatus, ReportSummary};
use crate::steps::{Phase, StepNode};

/// Progress events emitted while a scenario runs.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A phase is about to start.
    PhaseStarting { phase: Phase, steps: usize },
    /// A phase finished, with its error if it failed.
    PhaseFinished {
        phase: Phase,
        duration: Duration,
        error: Option<&'a HarnessError>,
    },
    /// The cleanup phase was skipped.
    CleanupSkipped,
}

/// Options for running a scenario.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Run the cleanup phase after execution.
    pub cleanup: bool,
    /// Write HTML and JSON reports here.
    pub report_dir: Option<PathBuf>,
    /// Free-text details for the report header.
    pub details: String,
    /// Components for the report header. Derived from the records if empty.
    pub components: Vec<String>,
}

/// Result of running a scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    /// Scenario name.
    pub usecase: String,
    /// Whether both phases succeeded.
    pub success: bool,
    pub execute_error: Option<HarnessError>,
    pub cleanup_error: Option<HarnessError>,
    /// Total duration, both phases included.
    pub duration: Duration,
    /// Every recorded outcome, in completion order.
    pub records: Vec<Report>,
    /// Number of FAIL records.
    pub failed_steps: usize,
    /// Report files written, if any.
    pub report_files: Vec<PathBuf>,
}

impl ScenarioResult {
    /// Number of records with `status`.
    pub fn count(&self, status: ReportStepStatus) -> usize {
        self.records
            .iter()
            .filter(|r| r.step_execution_status == status)
            .count()
    }
}

/// Drives one scenario tree through its phases.
///
/// A failed execute phase does not prevent cleanup: whatever was created
/// before the failure is still torn down when cleanup is enabled.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    usecase: String,
}

impl ScenarioRunner {
    pub fn new(usecase: impl Into<String>) -> Self {
        Self {
            usecase: usecase.into(),
        }
    }

    /// Run `tree` against `ambient`.
    pub fn run<C>(
        &self,
        tree: &mut StepNode<C>,
        ambient: &C,
        options: &RunOptions,
    ) -> Result<ScenarioResult> {
        self.run_with_progress(tree, ambient, options, |_| {})
    }

    /// Run `tree` against `ambient`, reporting phase transitions.
    ///
    /// # Errors
    ///
    /// Step failures end up in the result. Only a failure to write the
    /// report files is returned as an error.
    pub fn run_with_progress<C>(
        &self,
        tree: &mut StepNode<C>,
        ambient: &C,
        options: &RunOptions,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<ScenarioResult> {
        let start = Instant::now();
        let steps = tree.len();

        info!("Running scenario {}", self.usecase);
        on_progress(RunProgress::PhaseStarting {
            phase: Phase::Execute,
            steps,
        });
        let phase_start = Instant::now();
        let execute_error = tree.execute(ambient).err();
        if let Some(e) = &execute_error {
            warn!("Scenario {} failed: {}", self.usecase, e);
        }
        on_progress(RunProgress::PhaseFinished {
            phase: Phase::Execute,
            duration: phase_start.elapsed(),
            error: execute_error.as_ref(),
        });

        let cleanup_error = if options.cleanup {
            on_progress(RunProgress::PhaseStarting {
                phase: Phase::Cleanup,
                steps,
            });
            let phase_start = Instant::now();
            let error = tree.cleanup(ambient).err();
            if let Some(e) = &error {
                warn!("Cleanup of {} failed: {}", self.usecase, e);
            }
            on_progress(RunProgress::PhaseFinished {
                phase: Phase::Cleanup,
                duration: phase_start.elapsed(),
                error: error.as_ref(),
            });
            error
        } else {
            on_progress(RunProgress::CleanupSkipped);
            None
        };

        let reports = tree.reports_collection();
        let records = reports.records();
        let report_files = match &options.report_dir {
            Some(dir) => {
                let summary = ReportSummary {
                    usecase: self.usecase.clone(),
                    details: options.details.clone(),
                    components: if options.components.is_empty() {
                        components_of(&records)
                    } else {
                        options.components.clone()
                    },
                };
                reports.generate_report(&summary, dir)?
            }
            None => Vec::new(),
        };

        let success = execute_error.is_none() && cleanup_error.is_none();
        info!(
            "Scenario {} {} in {:.1}s",
            self.usecase,
            if success { "passed" } else { "failed" },
            start.elapsed().as_secs_f64()
        );

        Ok(ScenarioResult {
            usecase: self.usecase.clone(),
            success,
            execute_error,
            cleanup_error,
            duration: start.elapsed(),
            failed_steps: reports.failed_steps_num(),
            records,
            report_files,
        })
    }
}

/// Distinct components in first-seen order.
fn components_of(records: &[Report]) -> Vec<String> {
    let mut components: Vec<String> = Vec::new();
    for record in records {
        if !components.contains(&record.step_component) {
            components.push(record.step_component.clone());
        }
    }
    components
}

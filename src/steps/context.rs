//! Per-traversal context handed to step bodies, and the outcome recorder.

use std::ops::Deref;
use std::time::Instant;

use tracing::warn;

use super::step::{Phase, StepLabel};
use crate::error::Result;
use crate::reports::{Report, ReportStepStatus, ReportsCollection};

/// Run `body`, then append a PASS or FAIL record for it to `reports`.
///
/// The body's result is returned unchanged: errors are observed, never
/// swallowed.
pub fn store_state<T>(
    reports: &ReportsCollection,
    label: &StepLabel,
    phase: Phase,
    body: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let start = Instant::now();
    let outcome = body();
    let duration = start.elapsed();

    let status = match &outcome {
        Ok(_) => ReportStepStatus::Pass,
        Err(e) => {
            warn!("{} {} failed: {}", label.name, phase, e);
            ReportStepStatus::Fail
        }
    };
    reports.put(Report::new(
        label.report_description(phase),
        status,
        duration,
        label.component.clone(),
    ));
    outcome
}

/// What a step body can see: the ambient context and the tree's reports.
///
/// Dereferences to the ambient context.
pub struct StepContext<'a, C> {
    ambient: &'a C,
    reports: &'a ReportsCollection,
}

impl<'a, C> StepContext<'a, C> {
    /// Create a context over an ambient value and a reports collection.
    pub fn new(ambient: &'a C, reports: &'a ReportsCollection) -> Self {
        Self { ambient, reports }
    }

    /// The ambient context.
    pub fn ambient(&self) -> &'a C {
        self.ambient
    }

    /// The root's reports collection.
    pub fn reports(&self) -> &'a ReportsCollection {
        self.reports
    }

    /// Record `body` as the `phase` outcome of the step labelled `label`.
    pub fn store_state<T>(
        &self,
        label: &StepLabel,
        phase: Phase,
        body: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        store_state(self.reports, label, phase, body)
    }
}

impl<C> Deref for StepContext<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ambient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;

    fn label() -> StepLabel {
        StepLabel::new("Probe", "TEST", "probe things")
    }

    #[test]
    fn success_appends_pass_and_returns_value() {
        let reports = ReportsCollection::new();
        let value = store_state(&reports, &label(), Phase::Execute, || Ok(42)).unwrap();

        assert_eq!(value, 42);
        let records = reports.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].step_execution_status, ReportStepStatus::Pass);
        assert_eq!(records[0].step_description, "[TEST] Probe: probe things");
        assert_eq!(records[0].step_component, "TEST");
    }

    #[test]
    fn failure_appends_fail_and_reraises() {
        let reports = ReportsCollection::new();
        let result: Result<()> = store_state(&reports, &label(), Phase::Cleanup, || {
            Err(HarnessError::NotFound {
                kind: "vnf".into(),
                name: "boom".into(),
            })
        });

        match result {
            Err(HarnessError::NotFound { kind, name }) => {
                assert_eq!(kind, "vnf");
                assert_eq!(name, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        let records = reports.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].step_execution_status, ReportStepStatus::Fail);
        assert_eq!(
            records[0].step_description,
            "[TEST] Probe cleanup: probe things"
        );
    }

    #[test]
    fn context_derefs_to_ambient() {
        let reports = ReportsCollection::new();
        let ambient = String::from("service");
        let ctx = StepContext::new(&ambient, &reports);
        assert_eq!(ctx.len(), 7);
        assert_eq!(ctx.ambient(), "service");
        assert!(std::ptr::eq(ctx.reports(), &reports));
    }
}

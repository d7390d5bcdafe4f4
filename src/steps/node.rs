//! The step tree.
//!
//! A [`StepNode`] owns one [`Step`] and its ordered substeps. Ownership
//! makes the tree shape explicit: attaching a child moves it into its
//! parent, so a node can never sit in two places and cycles cannot be
//! built.
//!
//! Report storage is shared through a root link rather than a parent
//! pointer. Every node holds the link of the tree it belongs to; attaching
//! a subtree re-points all of its nodes at the parent's link, and the
//! collection itself is created on first access.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use super::context::StepContext;
use super::step::{Phase, Step, StepLabel};
use crate::error::{HarnessError, Result};
use crate::reports::{Report, ReportStepStatus, ReportsCollection};

#[derive(Debug, Default)]
struct RootLink {
    reports: OnceCell<Rc<ReportsCollection>>,
}

/// How a node reacts when one of its substeps fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildFailurePolicy {
    /// Stop at the first failing substep and propagate its error unchanged.
    #[default]
    AbortOnFirst,
    /// Run every substep, then fail with [`HarnessError::SubstepsFailed`]
    /// if any of them failed.
    ///
    /// On execute the node's own body is skipped and recorded as
    /// NOT EXECUTED. On cleanup the own body runs first and a failure there
    /// is collected too, so every substep still gets cleaned up.
    CollectFailures,
}

/// A node of a step tree.
pub struct StepNode<C> {
    step: Box<dyn Step<C>>,
    substeps: Vec<StepNode<C>>,
    cleanup: bool,
    attached: bool,
    policy: ChildFailurePolicy,
    root: Rc<RootLink>,
}

impl<C> StepNode<C> {
    /// Wrap `step` in a detached (root) node.
    ///
    /// `cleanup` gates the whole subtree during [`StepNode::cleanup`].
    pub fn new(step: impl Step<C> + 'static, cleanup: bool) -> Self {
        Self {
            step: Box::new(step),
            substeps: Vec::new(),
            cleanup,
            attached: false,
            policy: ChildFailurePolicy::default(),
            root: Rc::new(RootLink::default()),
        }
    }

    /// Switch this node to [`ChildFailurePolicy::CollectFailures`].
    pub fn collect_failures(mut self) -> Self {
        self.policy = ChildFailurePolicy::CollectFailures;
        self
    }

    /// Builder form of [`StepNode::add_step`].
    pub fn with_step(mut self, child: StepNode<C>) -> Self {
        self.add_step(child);
        self
    }

    /// Attach `child` as the next substep.
    ///
    /// The child's whole subtree starts reporting into this tree's root
    /// collection.
    pub fn add_step(&mut self, mut child: StepNode<C>) {
        child.attached = true;
        child.relink(&self.root);
        self.substeps.push(child);
    }

    fn relink(&mut self, root: &Rc<RootLink>) {
        self.root = Rc::clone(root);
        for child in &mut self.substeps {
            child.relink(root);
        }
    }

    /// Whether this node was never attached to a parent.
    pub fn is_root(&self) -> bool {
        !self.attached
    }

    /// Whether cleanup runs for this subtree.
    pub fn cleanup_enabled(&self) -> bool {
        self.cleanup
    }

    /// Failure policy for substeps.
    pub fn policy(&self) -> ChildFailurePolicy {
        self.policy
    }

    /// Ordered substeps.
    pub fn substeps(&self) -> &[StepNode<C>] {
        &self.substeps
    }

    /// Identity of the wrapped step.
    pub fn label(&self) -> StepLabel {
        self.step.label()
    }

    /// The root's collection, created on first access.
    pub fn reports_collection(&self) -> Rc<ReportsCollection> {
        Rc::clone(
            self.root
                .reports
                .get_or_init(|| Rc::new(ReportsCollection::new())),
        )
    }

    /// Number of nodes in this subtree, including this one.
    pub fn len(&self) -> usize {
        1 + self.substeps.iter().map(StepNode::len).sum::<usize>()
    }

    /// Always false: a subtree contains at least its own node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Depth-first listing of `(depth, label)` in execution order.
    pub fn outline(&self) -> Vec<(usize, StepLabel)> {
        let mut out = Vec::new();
        self.collect_outline(0, &mut out);
        out
    }

    fn collect_outline(&self, depth: usize, out: &mut Vec<(usize, StepLabel)>) {
        for child in &self.substeps {
            child.collect_outline(depth + 1, out);
        }
        out.push((depth, self.label()));
    }

    /// Execute every substep in insertion order, then this node's own body.
    pub fn execute(&mut self, ambient: &C) -> Result<()> {
        let reports = self.reports_collection();
        self.execute_with(&StepContext::new(ambient, &reports))
    }

    /// Clean this node's own body, then every substep in insertion order.
    ///
    /// Does nothing for the whole subtree when the cleanup flag is unset.
    pub fn cleanup(&mut self, ambient: &C) -> Result<()> {
        let reports = self.reports_collection();
        self.cleanup_with(&StepContext::new(ambient, &reports))
    }

    fn execute_with(&mut self, ctx: &StepContext<'_, C>) -> Result<()> {
        let mut failures = Vec::new();
        self.run_substeps(ctx, Phase::Execute, &mut failures)?;
        if !failures.is_empty() {
            self.record_skipped(ctx, Phase::Execute);
            return Err(self.substeps_failed(failures));
        }
        debug!("Executing {}", self.step.name());
        self.step.execute(ctx)
    }

    fn cleanup_with(&mut self, ctx: &StepContext<'_, C>) -> Result<()> {
        if !self.cleanup {
            debug!("Cleanup disabled for {}, skipping subtree", self.step.name());
            return Ok(());
        }
        debug!("Cleaning {}", self.step.name());
        let mut failures = Vec::new();
        if let Err(e) = self.step.cleanup(ctx) {
            match self.policy {
                ChildFailurePolicy::AbortOnFirst => return Err(e),
                ChildFailurePolicy::CollectFailures => {
                    failures.push(format!("{} cleanup: {}", self.step.name(), e));
                }
            }
        }
        self.run_substeps(ctx, Phase::Cleanup, &mut failures)?;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(self.substeps_failed(failures))
        }
    }

    /// Run every substep for `phase`.
    ///
    /// Under `AbortOnFirst` the first error is returned as is; under
    /// `CollectFailures` errors are appended to `failures` and `Ok` is
    /// returned.
    fn run_substeps(
        &mut self,
        ctx: &StepContext<'_, C>,
        phase: Phase,
        failures: &mut Vec<String>,
    ) -> Result<()> {
        for child in &mut self.substeps {
            let outcome = match phase {
                Phase::Execute => child.execute_with(ctx),
                Phase::Cleanup => child.cleanup_with(ctx),
            };
            if let Err(e) = outcome {
                match self.policy {
                    ChildFailurePolicy::AbortOnFirst => return Err(e),
                    ChildFailurePolicy::CollectFailures => {
                        failures.push(format!("{}: {}", child.step.name(), e));
                    }
                }
            }
        }
        Ok(())
    }

    fn substeps_failed(&self, failures: Vec<String>) -> HarnessError {
        HarnessError::SubstepsFailed {
            step: self.step.name(),
            failures,
        }
    }

    fn record_skipped(&self, ctx: &StepContext<'_, C>, phase: Phase) {
        let label = self.label();
        debug!("Skipping {} {}: substeps failed", label.name, phase);
        ctx.reports().put(Report::new(
            label.report_description(phase),
            ReportStepStatus::NotExecuted,
            Duration::ZERO,
            label.component,
        ));
    }
}

impl<C> fmt::Debug for StepNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepNode")
            .field("step", &self.step.name())
            .field("cleanup", &self.cleanup)
            .field("policy", &self.policy)
            .field("substeps", &self.substeps)
            .finish()
    }
}

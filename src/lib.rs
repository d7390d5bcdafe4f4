//! onaptests - End-to-end lifecycle scenarios for a network orchestration
//! platform.
//!
//! A scenario is a tree of steps. Executing the tree runs every substep
//! before its parent; cleaning it up tears down each parent before its
//! substeps. Every step body records its outcome in a reports collection
//! shared by the whole tree, which is rendered as HTML and JSON at the end
//! of a run.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings, validation and service templates
//! - [`error`] - Error types and result aliases
//! - [`reports`] - Step outcome collection and rendering
//! - [`runner`] - Scenario driver: execute, clean up, report
//! - [`scenario`] - Concrete lifecycle steps and the scenario registry
//! - [`sdk`] - Platform client traits, REST clients and an in-memory mock
//! - [`steps`] - Step trait and composition tree
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use onaptests::reports::ReportStepStatus;
//! use onaptests::steps::{Phase, Step, StepContext, StepNode};
//!
//! struct Greet;
//!
//! impl Step<String> for Greet {
//!     fn description(&self) -> &str {
//!         "Say hello."
//!     }
//!
//!     fn component(&self) -> &str {
//!         "TEST"
//!     }
//!
//!     fn execute(&mut self, ctx: &StepContext<'_, String>) -> onaptests::Result<()> {
//!         ctx.store_state(&self.label(), Phase::Execute, || {
//!             assert_eq!(ctx.as_str(), "world");
//!             Ok(())
//!         })
//!     }
//! }
//!
//! let mut tree = StepNode::new(Greet, true);
//! tree.execute(&"world".to_string()).unwrap();
//!
//! let records = tree.reports_collection().records();
//! assert_eq!(records[0].step_description, "[TEST] Greet: Say hello.");
//! assert_eq!(records[0].step_execution_status, ReportStepStatus::Pass);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod reports;
pub mod runner;
pub mod scenario;
pub mod sdk;
pub mod steps;
pub mod ui;

pub use error::{HarnessError, Result};

//! Step composition and execution.
//!
//! - [`Step`] - a unit of work with optional execute and cleanup bodies
//! - [`StepNode`] - a node of the step tree, owning ordered substeps
//! - [`StepContext`] / [`store_state`] - what bodies see, and the recorder
//!
//! Executing a node runs its substeps depth-first, in insertion order,
//! before its own body. Cleaning a node runs its own body first, then its
//! substeps in the same order. Every node of a tree reports into the
//! root's [`ReportsCollection`](crate::reports::ReportsCollection).
//!
//! # Example
//!
//! ```
//! use onaptests::error::Result;
//! use onaptests::reports::ReportStepStatus;
//! use onaptests::steps::{Phase, Step, StepContext, StepNode};
//!
//! struct Greet;
//!
//! impl Step<String> for Greet {
//!     fn description(&self) -> &str {
//!         "Say hello"
//!     }
//!
//!     fn component(&self) -> &str {
//!         "TEST"
//!     }
//!
//!     fn execute(&mut self, ctx: &StepContext<'_, String>) -> Result<()> {
//!         let label = self.label();
//!         ctx.store_state(&label, Phase::Execute, || {
//!             println!("hello {}", ctx.ambient());
//!             Ok(())
//!         })
//!     }
//! }
//!
//! let mut root = StepNode::new(Greet, true);
//! root.execute(&"world".to_string()).unwrap();
//!
//! let report = root.reports_collection().report();
//! assert_eq!(report["[TEST] Greet: Say hello"], ReportStepStatus::Pass);
//! ```

pub mod context;
pub mod node;
pub mod step;

pub use context::{store_state, StepContext};
pub use node::{ChildFailurePolicy, StepNode};
pub use step::{short_type_name, Phase, Step, StepLabel};

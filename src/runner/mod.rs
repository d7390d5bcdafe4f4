//! Scenario execution.

pub mod driver;

pub use driver::{RunOptions, RunProgress, ScenarioResult, ScenarioRunner};

//! The [`Step`] capability implemented by every unit of work.

use std::fmt;

use super::context::StepContext;
use crate::error::Result;

/// Which traversal a recorded body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Execute,
    Cleanup,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Execute => f.write_str("execute"),
            Phase::Cleanup => f.write_str("cleanup"),
        }
    }
}

/// Owned identity of a step, captured before its body runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLabel {
    pub name: String,
    pub component: String,
    pub description: String,
}

impl StepLabel {
    /// Create a label.
    pub fn new(
        name: impl Into<String>,
        component: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            component: component.into(),
            description: description.into(),
        }
    }

    /// Description stored in the reports collection for `phase`.
    pub fn report_description(&self, phase: Phase) -> String {
        match phase {
            Phase::Execute => format!("[{}] {}: {}", self.component, self.name, self.description),
            Phase::Cleanup => format!(
                "[{}] {} cleanup: {}",
                self.component, self.name, self.description
            ),
        }
    }
}

/// Short type name of `T` without its module path or generic arguments.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A unit of work in a scenario tree.
///
/// `C` is the ambient context built once by the driver and handed to every
/// step. Both bodies default to no-ops, so a composite that only groups
/// substeps implements just `description` and `component`.
///
/// A body opts into reporting by wrapping its work in
/// [`StepContext::store_state`].
pub trait Step<C> {
    /// Name used in reports. Defaults to the concrete type's name.
    fn name(&self) -> String {
        short_type_name::<Self>().to_string()
    }

    /// Human description of what the step does.
    fn description(&self) -> &str;

    /// Platform component the step targets.
    fn component(&self) -> &str;

    /// The step's own unit of work, run after all substeps.
    fn execute(&mut self, _ctx: &StepContext<'_, C>) -> Result<()> {
        Ok(())
    }

    /// The step's own teardown, run before its substeps are cleaned.
    fn cleanup(&mut self, _ctx: &StepContext<'_, C>) -> Result<()> {
        Ok(())
    }

    /// Identity snapshot for reporting.
    fn label(&self) -> StepLabel {
        StepLabel::new(self.name(), self.component(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Step<()> for Noop {
        fn description(&self) -> &str {
            "does nothing"
        }

        fn component(&self) -> &str {
            "TEST"
        }
    }

    struct Generic<T>(T);

    #[test]
    fn default_name_is_type_name() {
        assert_eq!(Noop.name(), "Noop");
    }

    #[test]
    fn short_type_name_strips_path_and_generics() {
        assert_eq!(short_type_name::<Generic<u8>>(), "Generic");
        assert_eq!(short_type_name::<String>(), "String");
    }

    #[test]
    fn report_description_per_phase() {
        let label = Noop.label();
        assert_eq!(
            label.report_description(Phase::Execute),
            "[TEST] Noop: does nothing"
        );
        assert_eq!(
            label.report_description(Phase::Cleanup),
            "[TEST] Noop cleanup: does nothing"
        );
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Execute.to_string(), "execute");
        assert_eq!(Phase::Cleanup.to_string(), "cleanup");
    }
}

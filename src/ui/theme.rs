//! Visual theme and styling.

use console::Style;

use crate::reports::ReportStepStatus;

/// Terminal styles used by the CLI.
#[derive(Debug, Clone)]
pub struct OnapTheme {
    /// Passing steps and final success (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Failures (red bold).
    pub error: Style,
    /// Secondary text.
    pub dim: Style,
    /// Emphasis (bold).
    pub highlight: Style,
    /// Headers (cyan bold).
    pub header: Style,
    /// Durations (dim).
    pub duration: Style,
}

impl Default for OnapTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl OnapTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            duration: Style::new().dim(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            duration: Style::new(),
        }
    }

    /// Colored theme when `colors` is set, plain otherwise.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("▶"), self.highlight.apply_to(title))
    }

    /// Status marker of a recorded step.
    pub fn format_status(&self, status: ReportStepStatus) -> String {
        match status {
            ReportStepStatus::Pass => format!("{}", self.success.apply_to("✓ PASS")),
            ReportStepStatus::Fail => format!("{}", self.error.apply_to("✗ FAIL")),
            ReportStepStatus::NotExecuted => {
                format!("{}", self.dim.apply_to("○ NOT EXECUTED"))
            }
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

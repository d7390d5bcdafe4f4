//! Run command implementation.
//!
//! The `onaptests run` command executes a scenario, cleans up what it
//! created and writes the reports.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::RunArgs;
use crate::config::{
    load_settings_or_default, resolve_service_model, validate, validate_model, ServiceModel,
    Settings,
};
use crate::error::{ErrorKind, Result};
use crate::reports::ReportStepStatus;
use crate::runner::{RunOptions, RunProgress, ScenarioRunner};
use crate::scenario::{find_scenario, ScenarioContext, ScenarioDefinition};
use crate::sdk::Platform;
use crate::ui::{format_duration, RunSummary, UserInterface};

use super::dispatcher::{Command, CommandResult, EXIT_CONFIG, EXIT_FAILED};

/// The run command implementation.
pub struct RunCommand {
    settings_path: Option<PathBuf>,
    args: RunArgs,
    platform: Option<Platform>,
}

impl RunCommand {
    /// Create a new run command talking to the configured endpoints.
    pub fn new(settings_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            settings_path: settings_path.map(Path::to_path_buf),
            args,
            platform: None,
        }
    }

    /// Use `platform` instead of REST clients built from the settings.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Load settings, apply command-line overrides and resolve the service.
    ///
    /// Everything here runs before the first platform call.
    fn prepare(&self, scenario: &ScenarioDefinition) -> Result<(Settings, ServiceModel)> {
        let mut settings = load_settings_or_default(self.settings_path.as_deref())?;

        settings.service_name = self
            .args
            .service
            .clone()
            .unwrap_or_else(|| scenario.service.to_string());
        if let Some(template) = &self.args.service_template {
            settings.service_template = Some(template.clone());
        }
        validate(&settings)?;

        let service = resolve_service_model(&settings)?;
        validate_model(&service)?;
        debug!(
            "Scenario {} uses service {} ({} vnfs, {} networks)",
            scenario.name,
            service.name,
            service.vnfs.len(),
            service.networks.len()
        );

        Ok((settings, service))
    }

    /// Build run options from settings and args.
    fn build_options(&self, settings: &Settings) -> RunOptions {
        RunOptions {
            cleanup: settings.cleanup && !self.args.no_cleanup,
            report_dir: self
                .args
                .reports_dir
                .clone()
                .or_else(|| settings.reporting.dir.clone()),
            details: settings.reporting.details.clone(),
            components: settings.reporting.components.clone(),
        }
    }
}

fn show_progress(ui: &mut dyn UserInterface, event: RunProgress<'_>) {
    if !ui.output_mode().shows_progress() {
        return;
    }
    match event {
        RunProgress::PhaseStarting { phase, steps } => {
            ui.message(&format!("Starting {} phase ({} steps)", phase, steps));
        }
        RunProgress::PhaseFinished {
            phase,
            duration,
            error: None,
        } => {
            ui.success(&format!(
                "{} phase finished in {}",
                capitalize(&phase.to_string()),
                format_duration(duration)
            ));
        }
        RunProgress::PhaseFinished {
            phase,
            duration,
            error: Some(e),
        } => {
            ui.warning(&format!(
                "{} phase failed after {}: {}",
                capitalize(&phase.to_string()),
                format_duration(duration),
                e
            ));
        }
        RunProgress::CleanupSkipped => ui.message("Cleanup skipped"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let scenario = match find_scenario(&self.args.scenario) {
            Ok(s) => s,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_CONFIG));
            }
        };

        let (settings, service) = match self.prepare(scenario) {
            Ok(prepared) => prepared,
            Err(e) if e.kind() == ErrorKind::Configuration => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_CONFIG));
            }
            Err(e) => return Err(e),
        };

        let platform = match &self.platform {
            Some(platform) => platform.clone(),
            None => Platform::rest(&settings)?,
        };

        let options = self.build_options(&settings);
        let mut tree = scenario.build(&settings, &service);
        let context = ScenarioContext::new(settings, service, platform);

        ui.show_header(&format!("{}: {}", scenario.name, scenario.description));

        let runner = ScenarioRunner::new(scenario.name);
        let result =
            runner.run_with_progress(&mut tree, &context, &options, |event| show_progress(ui, event))?;

        for record in &result.records {
            ui.show_record(record);
        }
        if let Some(e) = &result.execute_error {
            ui.error(&format!("Scenario failed: {}", e));
        }
        if let Some(e) = &result.cleanup_error {
            ui.error(&format!("Cleanup failed: {}", e));
        }
        for file in &result.report_files {
            ui.message(&format!("Report written to {}", file.display()));
        }

        ui.show_summary(&RunSummary {
            usecase: result.usecase.clone(),
            success: result.success,
            passed: result.count(ReportStepStatus::Pass),
            failed: result.failed_steps,
            duration: result.duration,
        });

        if result.success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_FAILED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{JsonReport, HTML_REPORT_FILE, JSON_REPORT_FILE};
    use crate::sdk::mock::{Kind, MockPlatform};
    use crate::ui::MockUI;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    const SETTINGS: &str = r#"
cloud_region:
  tenant_id: tenant-1
orchestration_wait:
  interval_secs: 0
  max_attempts: 5
distribution_wait:
  interval_secs: 0
  max_attempts: 5
"#;

    fn setup() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yaml");
        fs::write(&path, SETTINGS).unwrap();
        (temp, path)
    }

    fn run_args(scenario: &str) -> RunArgs {
        RunArgs {
            scenario: scenario.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn run_basic_vm_creates_and_cleans_up() {
        let (temp, path) = setup();
        let platform = Rc::new(MockPlatform::new().with_pending_polls(1));
        let args = RunArgs {
            reports_dir: Some(temp.path().join("reports")),
            ..run_args("basic_vm")
        };
        let cmd = RunCommand::new(Some(&path), args)
            .with_platform(Platform::from_backend(platform.clone()));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success, "errors: {:?}", ui.errors());
        assert!(platform.names(Kind::ServiceInstance).is_empty());
        assert!(platform.names(Kind::Vnf).is_empty());
        assert!(platform.names(Kind::VfModule).is_empty());
        assert!(platform.names(Kind::Customer).is_empty());
        assert!(!platform.names(Kind::Service).is_empty());

        let summary = &ui.summaries()[0];
        assert!(summary.success);
        assert_eq!(summary.failed, 0);
        assert!(summary.passed > 0);

        let report = JsonReport::load(&temp.path().join("reports").join(JSON_REPORT_FILE)).unwrap();
        assert_eq!(report.usecase, "basic_vm");
        assert!(temp.path().join("reports").join(HTML_REPORT_FILE).exists());
    }

    #[test]
    fn run_without_cleanup_keeps_resources() {
        let (_temp, path) = setup();
        let platform = Rc::new(MockPlatform::new());
        let args = RunArgs {
            no_cleanup: true,
            ..run_args("basic_network")
        };
        let cmd = RunCommand::new(Some(&path), args)
            .with_platform(Platform::from_backend(platform.clone()));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(platform.names(Kind::Network).len(), 1);
        assert_eq!(platform.names(Kind::ServiceInstance).len(), 1);
        assert!(ui.has_output("Cleanup skipped"));
    }

    #[test]
    fn failed_step_fails_run_but_still_cleans_up() {
        let (_temp, path) = setup();
        let platform = Rc::new(MockPlatform::new());
        platform.fail_on("instantiate_vnf", "no capacity");
        let cmd = RunCommand::new(Some(&path), run_args("basic_vm"))
            .with_platform(Platform::from_backend(platform.clone()));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_FAILED);
        assert!(ui.has_output("no capacity"));
        assert!(platform.names(Kind::ServiceInstance).is_empty());
        assert!(ui.records().iter().any(|r| {
            r.step_execution_status == ReportStepStatus::Fail
                && r.step_description.contains("VnfInstancesCreateStep")
        }));
    }

    #[test]
    fn unknown_scenario_is_configuration_error() {
        let cmd = RunCommand::new(None, run_args("nope"));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(ui.has_output("Unknown scenario: nope"));
    }

    #[test]
    fn invalid_settings_fail_before_any_call() {
        let platform = Rc::new(MockPlatform::new());
        // Defaults have no tenant id.
        let cmd = RunCommand::new(None, run_args("basic_vm"))
            .with_platform(Platform::from_backend(platform.clone()));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(ui.has_output("tenant_id"));
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn unknown_service_is_configuration_error() {
        let (_temp, path) = setup();
        let platform = Rc::new(MockPlatform::new());
        let args = RunArgs {
            service: Some("missing_service".to_string()),
            ..run_args("basic_vm")
        };
        let cmd = RunCommand::new(Some(&path), args)
            .with_platform(Platform::from_backend(platform.clone()));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn build_options_prefers_command_line() {
        let mut settings = Settings::default();
        settings.reporting.dir = Some(PathBuf::from("from-settings"));
        settings.reporting.details = "nightly".to_string();

        let cmd = RunCommand::new(
            None,
            RunArgs {
                reports_dir: Some(PathBuf::from("from-cli")),
                no_cleanup: true,
                ..run_args("basic_vm")
            },
        );
        let options = cmd.build_options(&settings);
        assert!(!options.cleanup);
        assert_eq!(options.report_dir, Some(PathBuf::from("from-cli")));
        assert_eq!(options.details, "nightly");

        let cmd = RunCommand::new(None, run_args("basic_vm"));
        let options = cmd.build_options(&settings);
        assert!(options.cleanup);
        assert_eq!(options.report_dir, Some(PathBuf::from("from-settings")));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("cleanup"), "Cleanup");
        assert_eq!(capitalize(""), "");
    }
}

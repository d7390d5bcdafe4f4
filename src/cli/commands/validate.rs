//! Validate command implementation.
//!
//! The `onaptests validate` command checks settings and the service
//! template without contacting the platform.

use std::path::{Path, PathBuf};

use crate::cli::args::ValidateArgs;
use crate::config::{
    load_settings_or_default, resolve_service_model, validate_service_model, validate_settings,
    ValidationError,
};
use crate::error::{ErrorKind, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_CONFIG};

/// The validate command implementation.
pub struct ValidateCommand {
    settings_path: Option<PathBuf>,
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(settings_path: Option<&Path>, args: ValidateArgs) -> Self {
        Self {
            settings_path: settings_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ValidateArgs {
        &self.args
    }
}

fn show_errors(ui: &mut dyn UserInterface, errors: &[ValidationError]) {
    for error in errors {
        match &error.field {
            Some(field) => ui.error(&format!("[{}] {}: {}", error.rule, field, error.message)),
            None => ui.error(&format!("[{}] {}", error.rule, error.message)),
        }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut settings = match load_settings_or_default(self.settings_path.as_deref()) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::Configuration => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_CONFIG));
            }
            Err(e) => return Err(e),
        };
        if let Some(service) = &self.args.service {
            settings.service_name = service.clone();
        }

        let errors = validate_settings(&settings);
        if !errors.is_empty() {
            show_errors(ui, &errors);
            ui.error(&format!("Settings have {} problem(s)", errors.len()));
            return Ok(CommandResult::failure(EXIT_CONFIG));
        }

        let service = match resolve_service_model(&settings) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::Configuration => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_CONFIG));
            }
            Err(e) => return Err(e),
        };

        let errors = validate_service_model(&service);
        if !errors.is_empty() {
            show_errors(ui, &errors);
            ui.error(&format!(
                "Service '{}' has {} problem(s)",
                service.name,
                errors.len()
            ));
            return Ok(CommandResult::failure(EXIT_CONFIG));
        }

        ui.success(&format!(
            "Settings are valid (service '{}': {} vnfs, {} networks)",
            service.name,
            service.vnfs.len(),
            service.networks.len()
        ));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn settings_file(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("settings.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn valid_settings_pass() {
        let temp = TempDir::new().unwrap();
        let path = settings_file(&temp, "cloud_region:\n  tenant_id: t1\n");
        let cmd = ValidateCommand::new(Some(&path), ValidateArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success, "errors: {:?}", ui.errors());
        assert!(ui.successes()[0].contains("basic_vm"));
    }

    #[test]
    fn every_settings_problem_is_listed() {
        let temp = TempDir::new().unwrap();
        let path = settings_file(
            &temp,
            "customer: ''\nendpoints:\n  so:\n    url: ftp://so\n",
        );
        let cmd = ValidateCommand::new(Some(&path), ValidateArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(ui.has_output("customer"));
        assert!(ui.has_output("tenant_id"));
        assert!(ui.has_output("invalid-url"));
    }

    #[test]
    fn service_override_is_checked() {
        let temp = TempDir::new().unwrap();
        let path = settings_file(&temp, "cloud_region:\n  tenant_id: t1\n");
        let args = ValidateArgs {
            service: Some("basic_network".to_string()),
        };
        let cmd = ValidateCommand::new(Some(&path), args);
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
        assert!(ui.has_output("basic_network"));
    }

    #[test]
    fn unknown_service_fails() {
        let temp = TempDir::new().unwrap();
        let path = settings_file(&temp, "cloud_region:\n  tenant_id: t1\n");
        let args = ValidateArgs {
            service: Some("nope".to_string()),
        };
        let cmd = ValidateCommand::new(Some(&path), args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(ui.has_output("nope"));
    }

    #[test]
    fn unparseable_settings_fail() {
        let temp = TempDir::new().unwrap();
        let path = settings_file(&temp, "cloud_region: [unclosed\n");
        let cmd = ValidateCommand::new(Some(&path), ValidateArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(ui.has_output("Failed to parse"));
    }
}

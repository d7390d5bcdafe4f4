//! List command implementation.
//!
//! The `onaptests list` command lists registered scenarios with the steps
//! each one runs, in execution order.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::config::{load_settings_or_default, resolve_service_model, Settings};
use crate::error::{ErrorKind, Result};
use crate::scenario::{scenarios, ScenarioDefinition};
use crate::ui::theme::OnapTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_CONFIG};

/// The list command implementation.
pub struct ListCommand {
    settings_path: Option<PathBuf>,
    args: ListArgs,
}

#[derive(Debug, Serialize)]
struct ScenarioListing {
    name: &'static str,
    description: &'static str,
    service: &'static str,
    steps: Vec<String>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(settings_path: Option<&Path>, args: ListArgs) -> Self {
        Self {
            settings_path: settings_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    /// Step names of `scenario` in execution order.
    ///
    /// Empty when the scenario's service template cannot be resolved.
    fn steps_of(settings: &Settings, scenario: &ScenarioDefinition) -> Vec<String> {
        let mut settings = settings.clone();
        settings.service_name = scenario.service.to_string();
        match resolve_service_model(&settings) {
            Ok(service) => scenario
                .build(&settings, &service)
                .outline()
                .into_iter()
                .map(|(_, label)| label.name)
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = match load_settings_or_default(self.settings_path.as_deref()) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::Configuration => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_CONFIG));
            }
            Err(e) => return Err(e),
        };

        let listings: Vec<ScenarioListing> = scenarios()
            .iter()
            .map(|s| ScenarioListing {
                name: s.name,
                description: s.description,
                service: s.service,
                steps: Self::steps_of(&settings, s),
            })
            .collect();

        if self.args.json {
            ui.message(&serde_json::to_string_pretty(&listings)?);
            return Ok(CommandResult::success());
        }

        let theme = OnapTheme::new();
        ui.message(&format!("  {}", theme.highlight.apply_to("Scenarios:")));
        for listing in &listings {
            ui.message(&format!(
                "    {} {}",
                theme.highlight.apply_to(listing.name),
                theme.dim.apply_to(format!("(service: {})", listing.service))
            ));
            ui.message(&format!("      {}", theme.dim.apply_to(listing.description)));
            if !listing.steps.is_empty() {
                ui.message(&format!(
                    "      {}",
                    theme.dim.apply_to(listing.steps.join(" → "))
                ));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn list_shows_every_scenario() {
        let cmd = ListCommand::new(None, ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        for name in ["basic_onboard", "basic_network", "basic_vm"] {
            assert!(ui.has_output(name), "missing {}", name);
        }
    }

    #[test]
    fn list_shows_steps_in_execution_order() {
        let cmd = ListCommand::new(None, ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let vm_steps = ui
            .messages()
            .iter()
            .find(|m| m.contains("VfModuleInstancesCreateStep"))
            .unwrap();
        let vendor = vm_steps.find("VendorOnboardStep").unwrap();
        let module = vm_steps.find("VfModuleInstancesCreateStep").unwrap();
        assert!(vendor < module);
    }

    #[test]
    fn list_json_is_parseable() {
        let cmd = ListCommand::new(None, ListArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        let vm = entries.iter().find(|e| e["name"] == "basic_vm").unwrap();
        assert_eq!(vm["service"], "basic_vm");
        assert_eq!(
            vm["steps"].as_array().unwrap().last().unwrap(),
            "basic_vm"
        );
    }

    #[test]
    fn list_reports_missing_settings_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");
        let cmd = ListCommand::new(Some(&missing), ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG);
        assert!(!ui.errors().is_empty());
    }

    #[test]
    fn list_reads_settings_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yaml");
        fs::write(&path, "customer: acme\n").unwrap();
        let cmd = ListCommand::new(Some(&path), ListArgs::default());
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
    }
}

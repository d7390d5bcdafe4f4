//! Service templates.
//!
//! A service template describes the resources a service is made of: the
//! VNFs with their VF-modules, and the networks. Templates are YAML
//! documents keyed by service name:
//!
//! ```yaml
//! basic_vm:
//!   subscription_type: basic_vm
//!   vnfs:
//!     - vnf_name: basic_vm
//!       vf_modules:
//!         - name: base_ubuntu20
//!           parameters:
//!             ubuntu20_flavor_name: m1.small
//! ```
//!
//! `${...}` references inside string values are resolved against settings
//! after the YAML is parsed.
//! Built-in templates are embedded from `templates/services/`.

use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::interpolation::{resolve_string, InterpolationContext};
use super::settings::Settings;
use crate::error::{HarnessError, Result};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

const BUILTIN_PREFIX: &str = "services";

/// A parsed template document, keyed by service name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceTemplate {
    services: BTreeMap<String, ServiceModel>,
}

/// Resources of one service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceModel {
    /// Service name. Filled from the template key.
    #[serde(skip)]
    pub name: String,

    /// Service type used for the inventory subscription. Defaults to the
    /// service name.
    pub subscription_type: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vnfs: Vec<VnfModel>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<NetworkModel>,
}

/// One VNF of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VnfModel {
    pub vnf_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vf_modules: Vec<VfModuleModel>,
}

/// One VF-module of a VNF, with its instantiation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VfModuleModel {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// One L3 network of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkModel {
    pub network_name: String,

    /// Name of the network resource in the service model.
    pub resource_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<SubnetModel>,
}

/// One subnet of a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubnetModel {
    pub subnet_name: String,
    pub cidr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(default = "default_ip_version")]
    pub ip_version: u8,
}

fn default_ip_version() -> u8 {
    4
}

/// Resolve `${...}` references inside every string scalar of `value`.
///
/// Values are substituted after parsing, so they can never change the
/// document's structure. Mapping keys are left as written.
fn render_scalars(
    value: &mut serde_yaml::Value,
    ctx: &InterpolationContext,
    unresolved: &mut Vec<String>,
) {
    match value {
        serde_yaml::Value::String(text) => match resolve_string(text, ctx) {
            Ok(rendered) => *text = rendered,
            Err(e) => unresolved.push(e.to_string()),
        },
        serde_yaml::Value::Sequence(items) => {
            for item in items {
                render_scalars(item, ctx, unresolved);
            }
        }
        serde_yaml::Value::Mapping(map) => {
            for (_, item) in map.iter_mut() {
                render_scalars(item, ctx, unresolved);
            }
        }
        serde_yaml::Value::Tagged(tagged) => render_scalars(&mut tagged.value, ctx, unresolved),
        _ => {}
    }
}

impl ServiceTemplate {
    /// Interpolate and parse template content.
    ///
    /// `source` is only used for error reporting.
    pub fn parse(content: &str, source: &Path, ctx: &InterpolationContext) -> Result<Self> {
        let parse_error = |e: serde_yaml::Error| HarnessError::ConfigParseError {
            path: source.to_path_buf(),
            message: e.to_string(),
        };
        let mut document: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;

        let mut unresolved = Vec::new();
        render_scalars(&mut document, ctx, &mut unresolved);
        if !unresolved.is_empty() {
            return Err(HarnessError::ConfigValidationError {
                message: unresolved.join("; "),
            });
        }

        let mut template: ServiceTemplate = serde_yaml::from_value(document).map_err(parse_error)?;

        for (name, model) in template.services.iter_mut() {
            model.name = name.clone();
            if model.subscription_type.is_empty() {
                model.subscription_type = name.clone();
            }
        }
        Ok(template)
    }

    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Result<&ServiceModel> {
        self.services
            .get(name)
            .ok_or_else(|| HarnessError::UnknownService {
                name: name.to_string(),
            })
    }
}

impl ServiceModel {
    /// VNF and network names in template order, VNFs first.
    pub fn resource_names(&self) -> Vec<&str> {
        self.vnfs
            .iter()
            .map(|v| v.vnf_name.as_str())
            .chain(self.networks.iter().map(|n| n.resource_name.as_str()))
            .collect()
    }
}

/// Load a template file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_service_template(path: &Path, ctx: &InterpolationContext) -> Result<ServiceTemplate> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HarnessError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HarnessError::Io(e)
        }
    })?;
    ServiceTemplate::parse(&content, path, ctx)
}

/// Names of the built-in templates, sorted.
pub fn builtin_names() -> Vec<String> {
    let mut names: Vec<String> = TEMPLATES_DIR
        .get_dir(BUILTIN_PREFIX)
        .map(|dir| {
            dir.files()
                .filter(|f| {
                    f.path()
                        .extension()
                        .is_some_and(|ext| ext == "yml" || ext == "yaml")
                })
                .filter_map(|f| f.path().file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Load the built-in template for `name`.
pub fn builtin_template(name: &str, ctx: &InterpolationContext) -> Result<ServiceTemplate> {
    let path = format!("{}/{}.yaml", BUILTIN_PREFIX, name);
    let file = TEMPLATES_DIR
        .get_file(&path)
        .ok_or_else(|| HarnessError::UnknownService {
            name: name.to_string(),
        })?;

    let content = file
        .contents_utf8()
        .ok_or_else(|| HarnessError::ConfigParseError {
            path: file.path().to_path_buf(),
            message: "Invalid UTF-8".to_string(),
        })?;

    ServiceTemplate::parse(content, file.path(), ctx)
}

/// Resolve the service model a run operates on.
///
/// Uses the configured template file when set, the built-in template named
/// after the service otherwise.
pub fn resolve_service_model(settings: &Settings) -> Result<ServiceModel> {
    let ctx = settings.interpolation_context().with_process_env();
    let template = match &settings.service_template {
        Some(path) => load_service_template(path, &ctx)?,
        None => builtin_template(&settings.service_name, &ctx)?,
    };
    template.service(&settings.service_name).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx() -> InterpolationContext {
        Settings::default().interpolation_context()
    }

    #[test]
    fn builtins_are_embedded() {
        assert_eq!(
            builtin_names(),
            vec!["basic_network", "basic_onboard", "basic_vm"]
        );
    }

    #[test]
    fn builtin_basic_vm_has_one_vnf_and_module() {
        let template = builtin_template("basic_vm", &ctx()).unwrap();
        let model = template.service("basic_vm").unwrap();

        assert_eq!(model.name, "basic_vm");
        assert_eq!(model.subscription_type, "basic_vm");
        assert_eq!(model.vnfs.len(), 1);
        assert_eq!(model.vnfs[0].vf_modules[0].name, "base_ubuntu20");
        assert_eq!(
            model.vnfs[0].vf_modules[0].parameters["ubuntu20_name_0"],
            serde_json::json!("basic_vm-vm")
        );
    }

    #[test]
    fn builtin_basic_network_interpolates_names() {
        let template = builtin_template("basic_network", &ctx()).unwrap();
        let model = template.service("basic_network").unwrap();

        assert!(model.vnfs.is_empty());
        assert_eq!(model.networks[0].network_name, "basic_vm-net");
        assert_eq!(model.networks[0].subnets[0].ip_version, 4);
    }

    #[test]
    fn unknown_builtin_is_unknown_service() {
        let err = builtin_template("nope", &ctx()).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownService { .. }));
    }

    #[test]
    fn file_template_defaults_subscription_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("service.yaml");
        fs::write(
            &path,
            "custom:\n  vnfs:\n    - vnf_name: ${customer}_vnf\n",
        )
        .unwrap();

        let template = load_service_template(&path, &ctx()).unwrap();
        let model = template.service("custom").unwrap();
        assert_eq!(model.subscription_type, "custom");
        assert_eq!(model.vnfs[0].vnf_name, "generic_vnf");
        assert!(model.vnfs[0].vf_modules.is_empty());
        assert_eq!(model.resource_names(), vec!["generic_vnf"]);
    }

    #[test]
    fn values_with_yaml_syntax_stay_scalars() {
        let mut settings = Settings::default();
        settings.cloud_region.tenant_name = "ops: \"x\"\n  injected: true".to_string();
        let ctx = settings.interpolation_context();

        let template = builtin_template("basic_vm", &ctx).unwrap();
        let params = &template.service("basic_vm").unwrap().vnfs[0].vf_modules[0].parameters;

        assert_eq!(
            params["ubuntu20_name_prefix"],
            serde_json::json!("ops: \"x\"\n  injected: true")
        );
        assert!(!params.contains_key("injected"));
    }

    #[test]
    fn every_unresolved_value_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("service.yaml");
        fs::write(
            &path,
            "svc:\n  vnfs:\n    - vnf_name: ${first}\n    - vnf_name: ${second}\n",
        )
        .unwrap();

        let err = load_service_template(&path, &ctx()).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("${first}"));
        assert!(err.to_string().contains("${second}"));
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let err = load_service_template(Path::new("/nonexistent/t.yaml"), &ctx()).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yaml");
        fs::write(&path, "svc:\n  vnfs: [unterminated").unwrap();

        let err = load_service_template(&path, &ctx()).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigParseError { .. }));
    }

    #[test]
    fn resolve_service_model_uses_configured_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("service.yaml");
        fs::write(&path, "other:\n  subscription_type: x\nbasic_vm:\n  networks: []\n").unwrap();

        let settings = Settings {
            service_template: Some(path),
            ..Default::default()
        };
        let model = resolve_service_model(&settings).unwrap();
        assert_eq!(model.name, "basic_vm");
        assert!(model.vnfs.is_empty());
    }

    #[test]
    fn resolve_service_model_unknown_service() {
        let settings = Settings {
            service_name: "missing".to_string(),
            ..Default::default()
        };
        let err = resolve_service_model(&settings).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownService { name } if name == "missing"));
    }
}

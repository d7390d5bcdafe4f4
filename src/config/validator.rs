//! Settings and service model validation.
//!
//! Everything here runs before any platform call is made:
//! - identity fields must be set
//! - endpoints must be absolute http(s) URLs
//! - wait policies must allow at least one poll
//! - referenced files must exist
//! - service models must name every resource uniquely

use crate::config::settings::{Settings, WaitSettings};
use crate::config::template::ServiceModel;
use crate::error::{HarnessError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Setting or resource the error is about
    pub field: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, field: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            field: Some(field.to_string()),
        }
    }
}

/// Validate settings and return all errors.
pub fn validate_settings(settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_identity(settings));
    errors.extend(validate_endpoints(settings));
    errors.extend(validate_waits(settings));
    errors.extend(validate_paths(settings));

    errors
}

fn validate_identity(settings: &Settings) -> Vec<ValidationError> {
    let required = [
        ("service_name", settings.service_name.as_str()),
        ("customer", settings.customer.as_str()),
        (
            "cloud_region.cloud_owner",
            settings.cloud_region.cloud_owner.as_str(),
        ),
        (
            "cloud_region.cloud_region_id",
            settings.cloud_region.cloud_region_id.as_str(),
        ),
        (
            "cloud_region.tenant_id",
            settings.cloud_region.tenant_id.as_str(),
        ),
    ];

    required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| {
            ValidationError::new(
                "missing-value",
                field,
                format!("Setting '{}' must not be empty", field),
            )
        })
        .collect()
}

fn validate_endpoints(settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, endpoint) in settings.endpoints.named() {
        let field = format!("endpoints.{}.url", name);
        if !(endpoint.url.starts_with("http://") || endpoint.url.starts_with("https://")) {
            errors.push(ValidationError::new(
                "invalid-url",
                &field,
                format!(
                    "Endpoint '{}' must be an http(s) URL, got '{}'",
                    name, endpoint.url
                ),
            ));
        }
        if endpoint.username.is_some() != endpoint.password.is_some() {
            errors.push(ValidationError::new(
                "partial-credentials",
                &format!("endpoints.{}", name),
                format!("Endpoint '{}' needs both username and password", name),
            ));
        }
    }

    if settings.http_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "invalid-timeout",
            "http_timeout_secs",
            "Setting 'http_timeout_secs' must be greater than zero".to_string(),
        ));
    }

    errors
}

fn validate_waits(settings: &Settings) -> Vec<ValidationError> {
    let waits: [(&str, &WaitSettings); 2] = [
        ("orchestration_wait", &settings.orchestration_wait),
        ("distribution_wait", &settings.distribution_wait),
    ];

    waits
        .iter()
        .filter(|(_, wait)| wait.max_attempts == 0)
        .map(|(field, _)| {
            ValidationError::new(
                "invalid-wait",
                field,
                format!("Setting '{}.max_attempts' must be at least 1", field),
            )
        })
        .collect()
}

fn validate_paths(settings: &Settings) -> Vec<ValidationError> {
    let paths = [
        ("service_template", settings.service_template.as_ref()),
        ("vsp_package", settings.vsp_package.as_ref()),
    ];

    paths
        .iter()
        .filter_map(|(field, path)| path.map(|p| (field, p)))
        .filter(|(_, path)| !path.exists())
        .map(|(field, path)| {
            ValidationError::new(
                "missing-file",
                field,
                format!("File for '{}' does not exist: {}", field, path.display()),
            )
        })
        .collect()
}

/// Validate a service model and return all errors.
pub fn validate_service_model(model: &ServiceModel) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for vnf in &model.vnfs {
        if vnf.vnf_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-value",
                &model.name,
                format!("Service '{}' has a VNF without a name", model.name),
            ));
        } else if !seen.insert(vnf.vnf_name.as_str()) {
            errors.push(ValidationError::new(
                "duplicate-resource",
                &vnf.vnf_name,
                format!(
                    "Service '{}' declares VNF '{}' more than once",
                    model.name, vnf.vnf_name
                ),
            ));
        }

        let mut modules = HashSet::new();
        for module in &vnf.vf_modules {
            if !modules.insert(module.name.as_str()) {
                errors.push(ValidationError::new(
                    "duplicate-resource",
                    &module.name,
                    format!(
                        "VNF '{}' declares VF-module '{}' more than once",
                        vnf.vnf_name, module.name
                    ),
                ));
            }
        }
    }

    for network in &model.networks {
        if network.network_name.trim().is_empty() || network.resource_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-value",
                &model.name,
                format!(
                    "Service '{}' has a network without network_name or resource_name",
                    model.name
                ),
            ));
        }
        for subnet in &network.subnets {
            if subnet.ip_version != 4 && subnet.ip_version != 6 {
                errors.push(ValidationError::new(
                    "invalid-subnet",
                    &subnet.subnet_name,
                    format!(
                        "Subnet '{}' has unsupported ip_version {}",
                        subnet.subnet_name, subnet.ip_version
                    ),
                ));
            }
        }
    }

    errors
}

fn into_result(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(HarnessError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

/// Validate settings and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every failed rule.
pub fn validate(settings: &Settings) -> Result<()> {
    into_result(validate_settings(settings))
}

/// Validate a service model and return Result.
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every failed rule.
pub fn validate_model(model: &ServiceModel) -> Result<()> {
    into_result(validate_service_model(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::template::{NetworkModel, SubnetModel, VfModuleModel, VnfModel};
    use std::path::PathBuf;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.cloud_region.tenant_id = "tenant-1".to_string();
        settings
    }

    fn rules(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.rule.as_str()).collect()
    }

    #[test]
    fn valid_settings_return_no_errors() {
        assert!(validate_settings(&valid_settings()).is_empty());
        assert!(validate(&valid_settings()).is_ok());
    }

    #[test]
    fn default_settings_need_a_tenant() {
        let errors = validate_settings(&Settings::default());
        assert_eq!(rules(&errors), vec!["missing-value"]);
        assert_eq!(errors[0].field.as_deref(), Some("cloud_region.tenant_id"));
    }

    #[test]
    fn collects_every_problem() {
        let mut settings = valid_settings();
        settings.service_name = String::new();
        settings.endpoints.so.url = "so.local".to_string();
        settings.endpoints.aai.password = None;
        settings.orchestration_wait.max_attempts = 0;
        settings.http_timeout_secs = 0;
        settings.vsp_package = Some(PathBuf::from("/nonexistent/package.zip"));

        let errors = validate_settings(&settings);
        let rules = rules(&errors);
        for rule in [
            "missing-value",
            "invalid-url",
            "partial-credentials",
            "invalid-wait",
            "invalid-timeout",
            "missing-file",
        ] {
            assert!(rules.contains(&rule), "missing rule {}", rule);
        }

        let err = validate(&settings).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("endpoints") || err.to_string().contains("Endpoint"));
    }

    #[test]
    fn service_model_duplicates_are_reported() {
        let vnf = VnfModel {
            vnf_name: "vnf".to_string(),
            vf_modules: vec![
                VfModuleModel {
                    name: "base".to_string(),
                    parameters: Default::default(),
                },
                VfModuleModel {
                    name: "base".to_string(),
                    parameters: Default::default(),
                },
            ],
        };
        let model = ServiceModel {
            name: "svc".to_string(),
            subscription_type: "svc".to_string(),
            vnfs: vec![vnf.clone(), vnf],
            networks: vec![NetworkModel {
                network_name: "net".to_string(),
                resource_name: String::new(),
                subnets: vec![SubnetModel {
                    subnet_name: "sub".to_string(),
                    cidr: "10.0.0.0/24".to_string(),
                    gateway: None,
                    ip_version: 5,
                }],
            }],
        };

        let errors = validate_service_model(&model);
        let rules = rules(&errors);
        // Two duplicate modules (one per VNF copy) plus the duplicate VNF.
        assert_eq!(
            rules.iter().filter(|r| **r == "duplicate-resource").count(),
            3
        );
        assert!(rules.contains(&"missing-value"));
        assert!(rules.contains(&"invalid-subnet"));
        assert!(validate_model(&model).is_err());
    }

    #[test]
    fn empty_service_model_is_valid() {
        assert!(validate_model(&ServiceModel::default()).is_ok());
    }
}

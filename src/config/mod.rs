//! Settings and service templates.
//!
//! - Settings schema in [`settings`]
//! - Settings file loading in [`loader`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//! - Service templates (file or built-in) in [`template`]
//!
//! # Example
//!
//! ```
//! use onaptests::config::{load_settings, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("settings.yaml");
//! fs::write(&path, "service_name: basic_vm\ncloud_region:\n  tenant_id: t1\n").unwrap();
//!
//! let settings = load_settings(&path).unwrap();
//! validate(&settings).unwrap();
//! assert_eq!(settings.service_instance_name(), "basic_vm");
//! ```

pub mod interpolation;
pub mod loader;
pub mod settings;
pub mod template;
pub mod validator;

pub use settings::{
    CloudRegionSettings, Endpoint, Endpoints, InstantiationSettings, ReportingSettings, Settings,
    WaitSettings,
};

pub use loader::{load_settings, load_settings_or_default, parse_settings};

pub use validator::{
    validate, validate_model, validate_service_model, validate_settings, ValidationError,
};

pub use interpolation::{parse_interpolation, resolve_string, InterpolationContext, Segment};

pub use template::{
    builtin_names, builtin_template, load_service_template, resolve_service_model, NetworkModel,
    ServiceModel, ServiceTemplate, SubnetModel, VfModuleModel, VnfModel,
};

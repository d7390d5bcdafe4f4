//! Settings schema.
//!
//! Maps the YAML settings file a scenario run is configured with. Every
//! field has a default, so a partial file (or none at all) is valid input
//! for the loader; the validator decides whether the result is usable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::interpolation::InterpolationContext;

/// Root settings structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Service model name, also the key into the service template.
    pub service_name: String,

    /// Name of the service instance to create. Defaults to the service name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_instance_name: Option<String>,

    /// Vendor name used for onboarding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Global customer id in inventory.
    pub customer: String,

    /// Cloud region the instances are placed in.
    pub cloud_region: CloudRegionSettings,

    /// Metadata required by orchestration requests.
    pub instantiation: InstantiationSettings,

    /// Platform endpoints.
    pub endpoints: Endpoints,

    /// Polling of orchestration requests.
    pub orchestration_wait: WaitSettings,

    /// Polling of service distribution.
    pub distribution_wait: WaitSettings,

    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,

    /// Tear down instantiated resources after the run.
    pub cleanup: bool,

    /// Also delete onboarded design artifacts during cleanup.
    pub cleanup_onboarding: bool,

    /// Report output.
    pub reporting: ReportingSettings,

    /// Service template file. Built-in templates are used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_template: Option<PathBuf>,

    /// VSP package uploaded during onboarding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsp_package: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_name: "basic_vm".to_string(),
            service_instance_name: None,
            vendor_name: None,
            customer: "generic".to_string(),
            cloud_region: CloudRegionSettings::default(),
            instantiation: InstantiationSettings::default(),
            endpoints: Endpoints::default(),
            orchestration_wait: WaitSettings {
                interval_secs: 10,
                max_attempts: 60,
            },
            distribution_wait: WaitSettings {
                interval_secs: 10,
                max_attempts: 30,
            },
            http_timeout_secs: 30,
            cleanup: true,
            cleanup_onboarding: false,
            reporting: ReportingSettings::default(),
            service_template: None,
            vsp_package: None,
        }
    }
}

impl Settings {
    /// Name of the service instance created by the scenario.
    pub fn service_instance_name(&self) -> &str {
        self.service_instance_name
            .as_deref()
            .unwrap_or(&self.service_name)
    }

    /// Vendor name, derived from the service name when unset.
    pub fn vendor_name(&self) -> String {
        self.vendor_name
            .clone()
            .unwrap_or_else(|| format!("{}-vendor", self.service_name))
    }

    /// Variables available to `${...}` references in service templates.
    pub fn interpolation_context(&self) -> InterpolationContext {
        let mut ctx = InterpolationContext::new();
        let values = [
            ("service_name", self.service_name.clone()),
            (
                "service_instance_name",
                self.service_instance_name().to_string(),
            ),
            ("vendor_name", self.vendor_name()),
            ("customer", self.customer.clone()),
            ("cloud_owner", self.cloud_region.cloud_owner.clone()),
            ("cloud_region_id", self.cloud_region.cloud_region_id.clone()),
            ("tenant_id", self.cloud_region.tenant_id.clone()),
            ("tenant_name", self.cloud_region.tenant_name.clone()),
        ];
        for (name, value) in values {
            ctx.values.insert(name.to_string(), value);
        }
        ctx
    }
}

/// Target cloud region and tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudRegionSettings {
    pub cloud_owner: String,
    pub cloud_region_id: String,
    pub tenant_id: String,
    pub tenant_name: String,
}

impl Default for CloudRegionSettings {
    fn default() -> Self {
        Self {
            cloud_owner: "onap".to_string(),
            cloud_region_id: "RegionOne".to_string(),
            tenant_id: String::new(),
            tenant_name: "onap-tests".to_string(),
        }
    }
}

/// Business metadata attached to orchestration requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstantiationSettings {
    pub owning_entity: String,
    pub project: String,
    pub platform: String,
    pub line_of_business: String,
}

impl Default for InstantiationSettings {
    fn default() -> Self {
        Self {
            owning_entity: "test_owning_entity".to_string(),
            project: "basicvm-project".to_string(),
            platform: "basicvm-platform".to_string(),
            line_of_business: "basicvm-lob".to_string(),
        }
    }
}

/// One REST endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    /// Base URL, without trailing slash.
    pub url: String,

    /// Basic-auth user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic-auth password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl Endpoint {
    fn new(url: &str, username: &str, password: &str) -> Self {
        Self {
            url: url.to_string(),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            headers: HashMap::new(),
        }
    }
}

/// Endpoints of the platform components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Service-design catalog (SDC) front end.
    pub sdc: Endpoint,
    /// SDC onboarding back end (vendors and VSPs).
    pub sdc_onboarding: Endpoint,
    /// Inventory (AAI).
    pub aai: Endpoint,
    /// Orchestrator (SO).
    pub so: Endpoint,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sdc: Endpoint::new(
                "https://sdc.api.fe.simpledemo.onap.org:30207",
                "cs0008",
                "demo123456!",
            ),
            sdc_onboarding: Endpoint::new(
                "https://sdc.api.be.simpledemo.onap.org:30204",
                "cs0008",
                "demo123456!",
            ),
            aai: Endpoint::new("https://aai.api.sparky.simpledemo.onap.org:30233", "AAI", "AAI"),
            so: Endpoint::new("http://so.api.simpledemo.onap.org:30277", "InfraPortalClient", "password1$"),
        }
    }
}

impl Endpoints {
    /// All endpoints with their setting names.
    pub fn named(&self) -> [(&'static str, &Endpoint); 4] {
        [
            ("sdc", &self.sdc),
            ("sdc_onboarding", &self.sdc_onboarding),
            ("aai", &self.aai),
            ("so", &self.so),
        ]
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitSettings {
    /// Seconds between two polls.
    pub interval_secs: u64,
    /// Polls before giving up.
    pub max_attempts: u32,
}

/// Report output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingSettings {
    /// Directory the HTML and JSON reports are written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Free-text details included in the report.
    pub details: String,

    /// Components listed in the report header. Empty means derive from the
    /// recorded steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
}

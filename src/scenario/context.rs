//! Ambient context shared by every step of a scenario.

use crate::config::{ServiceModel, Settings};
use crate::sdk::{Placement, Platform, RequestMetadata, WaitPolicy};

/// Settings, service model and platform clients of one run.
///
/// Built once by the caller and handed read-only to every step.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    pub settings: Settings,
    pub service: ServiceModel,
    pub platform: Platform,
}

impl ScenarioContext {
    pub fn new(settings: Settings, service: ServiceModel, platform: Platform) -> Self {
        Self {
            settings,
            service,
            platform,
        }
    }

    /// Where instances are placed.
    pub fn placement(&self) -> Placement {
        let region = &self.settings.cloud_region;
        Placement {
            cloud_owner: region.cloud_owner.clone(),
            cloud_region_id: region.cloud_region_id.clone(),
            tenant_id: region.tenant_id.clone(),
        }
    }

    /// Business metadata attached to instantiation requests.
    pub fn metadata(&self) -> RequestMetadata {
        let instantiation = &self.settings.instantiation;
        RequestMetadata {
            owning_entity: instantiation.owning_entity.clone(),
            project: instantiation.project.clone(),
            platform: instantiation.platform.clone(),
            line_of_business: instantiation.line_of_business.clone(),
        }
    }

    pub fn customer(&self) -> &str {
        &self.settings.customer
    }

    pub fn subscription_type(&self) -> &str {
        &self.service.subscription_type
    }

    pub fn service_instance_name(&self) -> &str {
        self.settings.service_instance_name()
    }

    /// Catalog name of the VSP onboarded for the service.
    pub fn vsp_name(&self) -> String {
        format!("{}_VSP", self.service.name)
    }

    /// Inventory name of the VNF instance created for `vnf_name`.
    pub fn vnf_instance_name(&self, vnf_name: &str) -> String {
        format!("{}_{}", self.service_instance_name(), vnf_name)
    }

    /// Inventory name of the VF-module instance created for `module_name`.
    pub fn vf_module_instance_name(&self, module_name: &str) -> String {
        format!("{}_{}", self.service_instance_name(), module_name)
    }

    pub fn orchestration_wait(&self) -> WaitPolicy {
        self.settings.orchestration_wait.into()
    }

    pub fn distribution_wait(&self) -> WaitPolicy {
        self.settings.distribution_wait.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin_template;
    use crate::sdk::mock::MockPlatform;
    use std::rc::Rc;

    fn context(settings: Settings) -> ScenarioContext {
        let service = builtin_template("basic_vm", &settings.interpolation_context())
            .unwrap()
            .service("basic_vm")
            .unwrap()
            .clone();
        let platform = Platform::from_backend(Rc::new(MockPlatform::new()));
        ScenarioContext::new(settings, service, platform)
    }

    #[test]
    fn derives_names_from_settings() {
        let ctx = context(Settings {
            service_instance_name: Some("e2e".to_string()),
            ..Default::default()
        });

        assert_eq!(ctx.service_instance_name(), "e2e");
        assert_eq!(ctx.vsp_name(), "basic_vm_VSP");
        assert_eq!(ctx.vnf_instance_name("basic_vm"), "e2e_basic_vm");
        assert_eq!(ctx.vf_module_instance_name("base"), "e2e_base");
        assert_eq!(ctx.subscription_type(), "basic_vm");
        assert_eq!(ctx.customer(), "generic");
    }

    #[test]
    fn placement_follows_cloud_region() {
        let mut settings = Settings::default();
        settings.cloud_region.tenant_id = "t-42".to_string();
        let ctx = context(settings);

        let placement = ctx.placement();
        assert_eq!(placement.cloud_owner, "onap");
        assert_eq!(placement.cloud_region_id, "RegionOne");
        assert_eq!(placement.tenant_id, "t-42");
    }

    #[test]
    fn wait_policies_come_from_settings() {
        let ctx = context(Settings::default());
        assert_eq!(ctx.orchestration_wait().max_attempts, 60);
        assert_eq!(ctx.distribution_wait().max_attempts, 30);
    }
}

//! Built-in scenarios and the trees they assemble.

use serde::Serialize;

use super::instantiate::{
    NetworkInstancesCreateStep, ServiceInstanceCreateStep, VfModuleInstancesCreateStep,
    VnfInstancesCreateStep,
};
use super::inventory::{CloudRegionLinkStep, CustomerCreateStep, ServiceSubscriptionCreateStep};
use super::onboard::{
    ServiceDistributionStep, ServiceOnboardStep, VendorOnboardStep, VfOnboardStep, VspOnboardStep,
};
use super::ScenarioContext;
use crate::config::{ServiceModel, Settings};
use crate::error::{HarnessError, Result};
use crate::steps::{Step, StepNode};

/// Composite root of a scenario. Has no body of its own.
#[derive(Debug, Clone)]
pub struct ScenarioRootStep {
    name: String,
    description: String,
}

impl ScenarioRootStep {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Step<ScenarioContext> for ScenarioRootStep {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn component(&self) -> &str {
        "TEST"
    }
}

type Builder = fn(&Settings, &ServiceModel) -> StepNode<ScenarioContext>;

/// A runnable scenario.
#[derive(Clone, Serialize)]
pub struct ScenarioDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// Service template entry used unless another service is requested.
    pub service: &'static str,
    #[serde(skip)]
    build: Builder,
}

impl ScenarioDefinition {
    /// Assemble the step tree for `service`.
    pub fn build(&self, settings: &Settings, service: &ServiceModel) -> StepNode<ScenarioContext> {
        (self.build)(settings, service)
    }
}

impl std::fmt::Debug for ScenarioDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioDefinition")
            .field("name", &self.name)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

static SCENARIOS: &[ScenarioDefinition] = &[
    ScenarioDefinition {
        name: "basic_onboard",
        description: "Onboard a service with its VSP and VF, then distribute it",
        service: "basic_onboard",
        build: basic_onboard,
    },
    ScenarioDefinition {
        name: "basic_network",
        description: "Instantiate a service with one network",
        service: "basic_network",
        build: basic_network,
    },
    ScenarioDefinition {
        name: "basic_vm",
        description: "Instantiate a service with one VNF and its VF-module",
        service: "basic_vm",
        build: basic_vm,
    },
];

/// Every registered scenario.
pub fn scenarios() -> &'static [ScenarioDefinition] {
    SCENARIOS
}

/// Look up a scenario by name.
pub fn find_scenario(name: &str) -> Result<&'static ScenarioDefinition> {
    SCENARIOS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| HarnessError::UnknownScenario {
            name: name.to_string(),
        })
}

/// Design-time chain: distribution <- service <- VFs <- VSP <- vendor.
///
/// VSP and VF are only onboarded when the service has VNFs.
fn onboarding(settings: &Settings, service: &ServiceModel) -> StepNode<ScenarioContext> {
    let cleanup = settings.cleanup_onboarding;
    let mut service_node = StepNode::new(ServiceOnboardStep, cleanup);
    if !service.vnfs.is_empty() {
        service_node.add_step(
            StepNode::new(VfOnboardStep, cleanup).with_step(
                StepNode::new(VspOnboardStep, cleanup)
                    .with_step(StepNode::new(VendorOnboardStep, cleanup)),
            ),
        );
    }
    StepNode::new(ServiceDistributionStep, cleanup).with_step(service_node)
}

/// Inventory chain: cloud region link <- subscription <- customer.
fn inventory() -> StepNode<ScenarioContext> {
    StepNode::new(CloudRegionLinkStep, true).with_step(
        StepNode::new(ServiceSubscriptionCreateStep, true)
            .with_step(StepNode::new(CustomerCreateStep, true)),
    )
}

fn service_instance(settings: &Settings, service: &ServiceModel) -> StepNode<ScenarioContext> {
    StepNode::new(ServiceInstanceCreateStep, true)
        .with_step(onboarding(settings, service))
        .with_step(inventory())
}

fn basic_onboard(settings: &Settings, service: &ServiceModel) -> StepNode<ScenarioContext> {
    StepNode::new(
        ScenarioRootStep::new("basic_onboard", "Onboard and distribute a service"),
        true,
    )
    .with_step(onboarding(settings, service))
}

fn basic_network(settings: &Settings, service: &ServiceModel) -> StepNode<ScenarioContext> {
    StepNode::new(
        ScenarioRootStep::new("basic_network", "Create a service with networks"),
        true,
    )
    .with_step(
        StepNode::new(NetworkInstancesCreateStep, true)
            .with_step(service_instance(settings, service)),
    )
}

fn basic_vm(settings: &Settings, service: &ServiceModel) -> StepNode<ScenarioContext> {
    StepNode::new(
        ScenarioRootStep::new("basic_vm", "Create a service with VNFs and VF-modules"),
        true,
    )
    .with_step(
        StepNode::new(VfModuleInstancesCreateStep, true).with_step(
            StepNode::new(VnfInstancesCreateStep, true)
                .with_step(service_instance(settings, service)),
        ),
    )
}

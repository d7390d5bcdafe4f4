//! End-to-end scenarios.
//!
//! Leaf steps wrap one platform interaction each, grouped by component:
//!
//! - [`onboard`] - service design in SDC
//! - [`inventory`] - customer, subscription and cloud region in AAI
//! - [`instantiate`] - service, network, VNF and VF-module instances in SO
//!
//! Creation bodies skip entities that already exist and cleanup bodies
//! skip entities that are gone, so both passes can be re-run against a
//! partially provisioned platform. [`registry`] assembles the leaves into
//! the built-in scenario trees.

pub mod context;
pub mod instantiate;
pub mod inventory;
pub mod onboard;
pub mod registry;

pub use context::ScenarioContext;
pub use instantiate::{
    NetworkInstancesCreateStep, ServiceInstanceCreateStep, VfModuleInstancesCreateStep,
    VnfInstancesCreateStep,
};
pub use inventory::{CloudRegionLinkStep, CustomerCreateStep, ServiceSubscriptionCreateStep};
pub use onboard::{
    ServiceDistributionStep, ServiceOnboardStep, VendorOnboardStep, VfOnboardStep, VspOnboardStep,
};
pub use registry::{find_scenario, scenarios, ScenarioDefinition, ScenarioRootStep};

use crate::error::{HarnessError, Result};

/// Turn a lookup miss into [`HarnessError::NotFound`].
pub(crate) fn require<T>(value: Option<T>, kind: &str, name: &str) -> Result<T> {
    value.ok_or_else(|| HarnessError::NotFound {
        kind: kind.to_string(),
        name: name.to_string(),
    })
}

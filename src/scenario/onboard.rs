//! Service design steps (SDC): vendor, VSP, VF, service, distribution.

use tracing::info;

use super::{require, ScenarioContext};
use crate::error::Result;
use crate::sdk::{wait_for_distribution, DistributionStatus};
use crate::steps::{Phase, Step, StepContext};

type Ctx<'a> = StepContext<'a, ScenarioContext>;

/// Onboard the vendor.
#[derive(Debug, Default)]
pub struct VendorOnboardStep;

impl Step<ScenarioContext> for VendorOnboardStep {
    fn description(&self) -> &str {
        "Onboard vendor in SDC."
    }

    fn component(&self) -> &str {
        "SDC"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let catalog = &ctx.platform.catalog;
            let name = ctx.settings.vendor_name();
            if catalog.get_vendor(&name)?.is_some() {
                info!("Vendor {} already onboarded", name);
                return Ok(());
            }
            let vendor = catalog.create_vendor(&name)?;
            info!("Vendor {} onboarded ({})", vendor.name, vendor.id);
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let catalog = &ctx.platform.catalog;
            if let Some(vendor) = catalog.get_vendor(&ctx.settings.vendor_name())? {
                catalog.delete_vendor(&vendor)?;
                info!("Vendor {} deleted", vendor.name);
            }
            Ok(())
        })
    }
}

/// Onboard the vendor software product and upload its package.
#[derive(Debug, Default)]
pub struct VspOnboardStep;

impl Step<ScenarioContext> for VspOnboardStep {
    fn description(&self) -> &str {
        "Onboard vsp in SDC."
    }

    fn component(&self) -> &str {
        "SDC"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let catalog = &ctx.platform.catalog;
            let name = ctx.vsp_name();
            if catalog.get_vsp(&name)?.is_some() {
                info!("VSP {} already onboarded", name);
                return Ok(());
            }
            let vendor_name = ctx.settings.vendor_name();
            let vendor = require(catalog.get_vendor(&vendor_name)?, "vendor", &vendor_name)?;
            let vsp = catalog.create_vsp(&name, &vendor, ctx.settings.vsp_package.as_deref())?;
            info!("VSP {} onboarded (version {})", vsp.name, vsp.version);
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let catalog = &ctx.platform.catalog;
            if let Some(vsp) = catalog.get_vsp(&ctx.vsp_name())? {
                catalog.delete_vsp(&vsp)?;
                info!("VSP {} deleted", vsp.name);
            }
            Ok(())
        })
    }
}

/// Create and certify one VF per VNF of the service.
#[derive(Debug, Default)]
pub struct VfOnboardStep;

impl Step<ScenarioContext> for VfOnboardStep {
    fn description(&self) -> &str {
        "Onboard vf in SDC."
    }

    fn component(&self) -> &str {
        "SDC"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let catalog = &ctx.platform.catalog;
            let vsp_name = ctx.vsp_name();
            for vnf in &ctx.service.vnfs {
                if catalog.get_vf(&vnf.vnf_name)?.is_some() {
                    info!("VF {} already onboarded", vnf.vnf_name);
                    continue;
                }
                let vsp = require(catalog.get_vsp(&vsp_name)?, "vsp", &vsp_name)?;
                let vf = catalog.create_vf(&vnf.vnf_name, &vsp)?;
                info!("VF {} onboarded ({})", vf.name, vf.uuid);
            }
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let catalog = &ctx.platform.catalog;
            for vnf in &ctx.service.vnfs {
                if let Some(vf) = catalog.get_vf(&vnf.vnf_name)? {
                    catalog.delete_vf(&vf)?;
                    info!("VF {} deleted", vf.name);
                }
            }
            Ok(())
        })
    }
}

/// Create and certify the service model.
#[derive(Debug, Default)]
pub struct ServiceOnboardStep;

impl Step<ScenarioContext> for ServiceOnboardStep {
    fn description(&self) -> &str {
        "Onboard service in SDC."
    }

    fn component(&self) -> &str {
        "SDC"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let catalog = &ctx.platform.catalog;
            let name = &ctx.service.name;
            if catalog.get_service(name)?.is_some() {
                info!("Service {} already onboarded", name);
                return Ok(());
            }
            let resources: Vec<String> = ctx
                .service
                .resource_names()
                .into_iter()
                .map(str::to_string)
                .collect();
            let service = catalog.create_service(name, &resources)?;
            info!(
                "Service {} onboarded with {} resource(s)",
                service.name,
                resources.len()
            );
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let catalog = &ctx.platform.catalog;
            if let Some(service) = catalog.get_service(&ctx.service.name)? {
                catalog.delete_service(&service)?;
                info!("Service {} deleted", service.name);
            }
            Ok(())
        })
    }
}

/// Distribute the service model and wait until every component got it.
#[derive(Debug, Default)]
pub struct ServiceDistributionStep;

impl Step<ScenarioContext> for ServiceDistributionStep {
    fn description(&self) -> &str {
        "Distribute the service and wait for the distribution to complete."
    }

    fn component(&self) -> &str {
        "SDC"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let catalog = &ctx.platform.catalog;
            let name = &ctx.service.name;
            let service = require(catalog.get_service(name)?, "service", name)?;
            match catalog.distribution_status(&service)? {
                DistributionStatus::Distributed => {
                    info!("Service {} already distributed", name);
                    return Ok(());
                }
                DistributionStatus::InProgress => {
                    info!("Distribution of service {} already in progress", name);
                }
                DistributionStatus::NotDistributed | DistributionStatus::Failed(_) => {
                    catalog.distribute_service(&service)?;
                }
            }
            wait_for_distribution(catalog.as_ref(), &service, ctx.distribution_wait())?;
            info!("Service {} distributed", name);
            Ok(())
        })
    }
}

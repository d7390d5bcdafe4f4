//! Instantiation steps (SO): service instance, networks, VNFs, VF-modules.
//!
//! Every orchestration call starts an asynchronous job; the step only
//! passes once the job completed. Cleanup bodies delete what the matching
//! execute body created and wait for those jobs too.

use tracing::info;

use super::{require, ScenarioContext};
use crate::error::Result;
use crate::sdk::{
    wait_for_request, NetworkRequest, ServiceInstance, ServiceInstanceRequest, VfModuleRequest,
    VnfRequest,
};
use crate::steps::{Phase, Step, StepContext};

type Ctx<'a> = StepContext<'a, ScenarioContext>;

fn service_instance(ctx: &ScenarioContext) -> Result<Option<ServiceInstance>> {
    ctx.platform.inventory.get_service_instance(
        ctx.customer(),
        ctx.subscription_type(),
        ctx.service_instance_name(),
    )
}

fn require_service_instance(ctx: &ScenarioContext) -> Result<ServiceInstance> {
    require(
        service_instance(ctx)?,
        "service instance",
        ctx.service_instance_name(),
    )
}

/// Instantiate the service.
#[derive(Debug, Default)]
pub struct ServiceInstanceCreateStep;

impl Step<ScenarioContext> for ServiceInstanceCreateStep {
    fn description(&self) -> &str {
        "Instantiate service using SO a'la carte method."
    }

    fn component(&self) -> &str {
        "SO"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            if service_instance(ctx)?.is_some() {
                info!("Service instance {} already exists", ctx.service_instance_name());
                return Ok(());
            }
            let name = &ctx.service.name;
            let service = require(ctx.platform.catalog.get_service(name)?, "service", name)?;
            let request = ServiceInstanceRequest {
                instance_name: ctx.service_instance_name().to_string(),
                service,
                customer: ctx.customer().to_string(),
                subscription_type: ctx.subscription_type().to_string(),
                placement: ctx.placement(),
                metadata: ctx.metadata(),
            };
            let orchestrator = ctx.platform.orchestrator.as_ref();
            let job = orchestrator.instantiate_service(&request)?;
            wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
            info!(
                "Service instance {} created ({})",
                request.instance_name, job.instance_id
            );
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let Some(instance) = service_instance(ctx)? else {
                return Ok(());
            };
            let orchestrator = ctx.platform.orchestrator.as_ref();
            let job = orchestrator.delete_service_instance(&instance)?;
            wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
            info!("Service instance {} deleted", instance.instance_name);
            Ok(())
        })
    }
}

/// Instantiate every network of the service.
#[derive(Debug, Default)]
pub struct NetworkInstancesCreateStep;

impl Step<ScenarioContext> for NetworkInstancesCreateStep {
    fn description(&self) -> &str {
        "Create network instances using SO."
    }

    fn component(&self) -> &str {
        "SO"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let instance = require_service_instance(ctx)?;
            let orchestrator = ctx.platform.orchestrator.as_ref();
            for network in &ctx.service.networks {
                if ctx.platform.inventory.get_network(&network.network_name)?.is_some() {
                    info!("Network {} already exists", network.network_name);
                    continue;
                }
                let request = NetworkRequest {
                    network_name: network.network_name.clone(),
                    model_name: network.resource_name.clone(),
                    placement: ctx.placement(),
                    metadata: ctx.metadata(),
                    subnets: network.subnets.clone(),
                };
                let job = orchestrator.instantiate_network(&instance, &request)?;
                wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
                info!("Network {} created", network.network_name);
            }
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let Some(instance) = service_instance(ctx)? else {
                return Ok(());
            };
            let orchestrator = ctx.platform.orchestrator.as_ref();
            for network in &ctx.service.networks {
                let Some(l3) = ctx.platform.inventory.get_network(&network.network_name)? else {
                    continue;
                };
                let job = orchestrator.delete_network(&instance, &l3)?;
                wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
                info!("Network {} deleted", l3.network_name);
            }
            Ok(())
        })
    }
}

/// Instantiate every VNF of the service.
#[derive(Debug, Default)]
pub struct VnfInstancesCreateStep;

impl Step<ScenarioContext> for VnfInstancesCreateStep {
    fn description(&self) -> &str {
        "Create vnf instances using SO."
    }

    fn component(&self) -> &str {
        "SO"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let instance = require_service_instance(ctx)?;
            let orchestrator = ctx.platform.orchestrator.as_ref();
            for vnf in &ctx.service.vnfs {
                let name = ctx.vnf_instance_name(&vnf.vnf_name);
                if ctx.platform.inventory.get_vnf(&name)?.is_some() {
                    info!("VNF {} already exists", name);
                    continue;
                }
                let request = VnfRequest {
                    vnf_name: name,
                    model_name: vnf.vnf_name.clone(),
                    placement: ctx.placement(),
                    metadata: ctx.metadata(),
                };
                let job = orchestrator.instantiate_vnf(&instance, &request)?;
                wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
                info!("VNF {} created", request.vnf_name);
            }
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let Some(instance) = service_instance(ctx)? else {
                return Ok(());
            };
            let orchestrator = ctx.platform.orchestrator.as_ref();
            for vnf in &ctx.service.vnfs {
                let name = ctx.vnf_instance_name(&vnf.vnf_name);
                let Some(generic_vnf) = ctx.platform.inventory.get_vnf(&name)? else {
                    continue;
                };
                let job = orchestrator.delete_vnf(&instance, &generic_vnf)?;
                wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
                info!("VNF {} deleted", name);
            }
            Ok(())
        })
    }
}

/// Instantiate every VF-module of every VNF.
#[derive(Debug, Default)]
pub struct VfModuleInstancesCreateStep;

impl Step<ScenarioContext> for VfModuleInstancesCreateStep {
    fn description(&self) -> &str {
        "Create vf module instances using SO."
    }

    fn component(&self) -> &str {
        "SO"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let instance = require_service_instance(ctx)?;
            let orchestrator = ctx.platform.orchestrator.as_ref();
            let inventory = &ctx.platform.inventory;
            for vnf in &ctx.service.vnfs {
                let vnf_name = ctx.vnf_instance_name(&vnf.vnf_name);
                let generic_vnf = require(inventory.get_vnf(&vnf_name)?, "vnf", &vnf_name)?;
                for module in &vnf.vf_modules {
                    let name = ctx.vf_module_instance_name(&module.name);
                    if inventory.get_vf_module(&generic_vnf, &name)?.is_some() {
                        info!("VF-module {} already exists", name);
                        continue;
                    }
                    let request = VfModuleRequest {
                        vf_module_name: name,
                        model_name: module.name.clone(),
                        placement: ctx.placement(),
                        parameters: module.parameters.clone(),
                    };
                    let job = orchestrator.instantiate_vf_module(&instance, &generic_vnf, &request)?;
                    wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
                    info!("VF-module {} created", request.vf_module_name);
                }
            }
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let Some(instance) = service_instance(ctx)? else {
                return Ok(());
            };
            let orchestrator = ctx.platform.orchestrator.as_ref();
            let inventory = &ctx.platform.inventory;
            for vnf in &ctx.service.vnfs {
                let vnf_name = ctx.vnf_instance_name(&vnf.vnf_name);
                let Some(generic_vnf) = inventory.get_vnf(&vnf_name)? else {
                    continue;
                };
                for module in &vnf.vf_modules {
                    let name = ctx.vf_module_instance_name(&module.name);
                    let Some(vf_module) = inventory.get_vf_module(&generic_vnf, &name)? else {
                        continue;
                    };
                    let job = orchestrator.delete_vf_module(&instance, &generic_vnf, &vf_module)?;
                    wait_for_request(orchestrator, &job, ctx.orchestration_wait())?;
                    info!("VF-module {} deleted", name);
                }
            }
            Ok(())
        })
    }
}

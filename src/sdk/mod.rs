//! Platform client boundary.
//!
//! Scenario steps talk to the platform through three traits, one per
//! component:
//!
//! - [`Catalog`] - service design (SDC): onboarding and distribution
//! - [`Inventory`] - inventory graph (AAI): customers, subscriptions, lookups
//! - [`Orchestrator`] - orchestration engine (SO): asynchronous lifecycle jobs
//!
//! [`Platform`] bundles one implementation of each. [`rest`] talks to a real
//! deployment, [`mock::MockPlatform`] keeps everything in memory.

pub mod mock;
pub mod rest;
pub mod types;
pub mod wait;

use std::path::Path;
use std::rc::Rc;

use crate::config::Settings;
use crate::error::Result;

pub use types::{
    Customer, DistributionStatus, GenericVnf, L3Network, NetworkRequest, OrchestrationRequest,
    Placement, RequestMetadata, RequestState, Service, ServiceInstance, ServiceInstanceRequest,
    ServiceSubscription, Vendor, Vf, VfModule, VfModuleRequest, VnfRequest, Vsp,
};
pub use wait::{wait_for_distribution, wait_for_request, wait_until, Poll, WaitPolicy};

/// Service design catalog (SDC).
pub trait Catalog {
    fn get_vendor(&self, name: &str) -> Result<Option<Vendor>>;
    fn create_vendor(&self, name: &str) -> Result<Vendor>;
    fn delete_vendor(&self, vendor: &Vendor) -> Result<()>;

    /// Look up a VSP by name.
    fn get_vsp(&self, name: &str) -> Result<Option<Vsp>>;
    /// Create a VSP, upload `package` when given, and submit it.
    fn create_vsp(&self, name: &str, vendor: &Vendor, package: Option<&Path>) -> Result<Vsp>;
    fn delete_vsp(&self, vsp: &Vsp) -> Result<()>;

    fn get_vf(&self, name: &str) -> Result<Option<Vf>>;
    /// Create a VF from a submitted VSP and certify it.
    fn create_vf(&self, name: &str, vsp: &Vsp) -> Result<Vf>;
    fn delete_vf(&self, vf: &Vf) -> Result<()>;

    fn get_service(&self, name: &str) -> Result<Option<Service>>;
    /// Create a service composed of `resources` and certify it.
    fn create_service(&self, name: &str, resources: &[String]) -> Result<Service>;
    fn delete_service(&self, service: &Service) -> Result<()>;

    /// Start distributing a certified service to the runtime components.
    fn distribute_service(&self, service: &Service) -> Result<()>;
    fn distribution_status(&self, service: &Service) -> Result<DistributionStatus>;
}

/// Inventory graph (AAI).
pub trait Inventory {
    fn get_customer(&self, global_customer_id: &str) -> Result<Option<Customer>>;
    fn create_customer(&self, global_customer_id: &str) -> Result<Customer>;
    fn delete_customer(&self, customer: &Customer) -> Result<()>;

    fn get_subscription(
        &self,
        customer: &str,
        service_type: &str,
    ) -> Result<Option<ServiceSubscription>>;
    fn create_subscription(&self, customer: &str, service_type: &str)
        -> Result<ServiceSubscription>;
    fn delete_subscription(&self, customer: &str, subscription: &ServiceSubscription)
        -> Result<()>;

    /// Whether the subscription is related to the placement's tenant.
    fn is_cloud_region_linked(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<bool>;
    fn link_cloud_region(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<()>;
    fn unlink_cloud_region(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<()>;

    fn get_service_instance(
        &self,
        customer: &str,
        service_type: &str,
        name: &str,
    ) -> Result<Option<ServiceInstance>>;
    fn get_vnf(&self, name: &str) -> Result<Option<GenericVnf>>;
    fn get_vf_module(&self, vnf: &GenericVnf, name: &str) -> Result<Option<VfModule>>;
    fn get_network(&self, name: &str) -> Result<Option<L3Network>>;
}

/// Orchestration engine (SO).
///
/// Every call starts an asynchronous job; poll it with
/// [`Orchestrator::request_state`] or [`wait_for_request`].
pub trait Orchestrator {
    fn instantiate_service(&self, request: &ServiceInstanceRequest)
        -> Result<OrchestrationRequest>;
    fn delete_service_instance(&self, instance: &ServiceInstance)
        -> Result<OrchestrationRequest>;

    fn instantiate_network(
        &self,
        instance: &ServiceInstance,
        request: &NetworkRequest,
    ) -> Result<OrchestrationRequest>;
    fn delete_network(
        &self,
        instance: &ServiceInstance,
        network: &L3Network,
    ) -> Result<OrchestrationRequest>;

    fn instantiate_vnf(
        &self,
        instance: &ServiceInstance,
        request: &VnfRequest,
    ) -> Result<OrchestrationRequest>;
    fn delete_vnf(
        &self,
        instance: &ServiceInstance,
        vnf: &GenericVnf,
    ) -> Result<OrchestrationRequest>;

    fn instantiate_vf_module(
        &self,
        instance: &ServiceInstance,
        vnf: &GenericVnf,
        request: &VfModuleRequest,
    ) -> Result<OrchestrationRequest>;
    fn delete_vf_module(
        &self,
        instance: &ServiceInstance,
        vnf: &GenericVnf,
        module: &VfModule,
    ) -> Result<OrchestrationRequest>;

    fn request_state(&self, request: &OrchestrationRequest) -> Result<RequestState>;
}

/// One client per platform component.
#[derive(Clone)]
pub struct Platform {
    pub catalog: Rc<dyn Catalog>,
    pub inventory: Rc<dyn Inventory>,
    pub orchestrator: Rc<dyn Orchestrator>,
}

impl Platform {
    /// Bundle three clients.
    pub fn new(
        catalog: Rc<dyn Catalog>,
        inventory: Rc<dyn Inventory>,
        orchestrator: Rc<dyn Orchestrator>,
    ) -> Self {
        Self {
            catalog,
            inventory,
            orchestrator,
        }
    }

    /// Use one backend for all three components.
    pub fn from_backend<B>(backend: Rc<B>) -> Self
    where
        B: Catalog + Inventory + Orchestrator + 'static,
    {
        Self {
            catalog: backend.clone(),
            inventory: backend.clone(),
            orchestrator: backend,
        }
    }

    /// REST clients for the endpoints in `settings`.
    pub fn rest(settings: &Settings) -> Result<Self> {
        let timeout = std::time::Duration::from_secs(settings.http_timeout_secs);
        let endpoints = &settings.endpoints;
        Ok(Self {
            catalog: Rc::new(rest::RestCatalog::new(
                &endpoints.sdc,
                &endpoints.sdc_onboarding,
                timeout,
            )?),
            inventory: Rc::new(rest::RestInventory::new(&endpoints.aai, timeout)?),
            orchestrator: Rc::new(rest::RestOrchestrator::new(&endpoints.so, timeout)?),
        })
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}

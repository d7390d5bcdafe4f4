//! In-memory platform for tests.
//!
//! [`MockPlatform`] implements all three client traits over plain maps.
//! Orchestration jobs take effect immediately and report
//! [`RequestState::InProgress`] for a configurable number of polls before
//! reaching their terminal state. Every call is recorded, and any call can
//! be made to fail.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use super::types::*;
use super::{Catalog, Inventory, Orchestrator};
use crate::error::{HarnessError, Result};

/// Entity collections that can be inspected with [`MockPlatform::names`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Vendor,
    Vsp,
    Vf,
    Service,
    Customer,
    Subscription,
    CloudRegionLink,
    ServiceInstance,
    Vnf,
    VfModule,
    Network,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: u64,
    vendors: BTreeMap<String, Vendor>,
    vsps: BTreeMap<String, Vsp>,
    vfs: BTreeMap<String, Vf>,
    services: BTreeMap<String, Service>,
    distributions: HashMap<String, u32>,
    customers: BTreeMap<String, Customer>,
    subscriptions: BTreeSet<(String, String)>,
    links: BTreeSet<(String, String, String)>,
    service_instances: BTreeMap<String, (String, String, ServiceInstance)>,
    vnfs: BTreeMap<String, GenericVnf>,
    vf_modules: BTreeMap<String, Vec<VfModule>>,
    networks: BTreeMap<String, L3Network>,
    requests: HashMap<String, u32>,
}

impl MockState {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn request(&mut self, instance_id: String) -> OrchestrationRequest {
        let request_id = self.id("req");
        self.requests.insert(request_id.clone(), 0);
        OrchestrationRequest {
            request_id,
            instance_id,
        }
    }
}

/// In-memory [`Catalog`], [`Inventory`] and [`Orchestrator`].
#[derive(Debug, Default)]
pub struct MockPlatform {
    state: RefCell<MockState>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashMap<String, String>>,
    request_failure: RefCell<Option<String>>,
    distribution_failure: RefCell<Option<String>>,
    pending_polls: u32,
}

fn link_key(customer: &str, service_type: &str, placement: &Placement) -> (String, String, String) {
    (
        customer.to_string(),
        service_type.to_string(),
        format!(
            "{}/{}/{}",
            placement.cloud_owner, placement.cloud_region_id, placement.tenant_id
        ),
    )
}

impl MockPlatform {
    /// Empty platform whose jobs complete on the first poll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report jobs and distributions as in progress for `polls` polls.
    pub fn with_pending_polls(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }

    /// Make every call to `operation` fail with `message`.
    pub fn fail_on(&self, operation: &str, message: &str) {
        self.failures
            .borrow_mut()
            .insert(operation.to_string(), message.to_string());
    }

    /// Stop failing `operation`.
    pub fn recover(&self, operation: &str) {
        self.failures.borrow_mut().remove(operation);
    }

    /// End every orchestration job in the failed state.
    pub fn fail_requests(&self, message: &str) {
        *self.request_failure.borrow_mut() = Some(message.to_string());
    }

    /// End every distribution in the failed state.
    pub fn fail_distribution(&self, message: &str) {
        *self.distribution_failure.borrow_mut() = Some(message.to_string());
    }

    /// Recorded calls, as `"<operation> <subject>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls to `operation`.
    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.split(' ').next() == Some(operation))
            .count()
    }

    /// How often a request was polled.
    pub fn polls(&self, request_id: &str) -> u32 {
        self.state
            .borrow()
            .requests
            .get(request_id)
            .copied()
            .unwrap_or(0)
    }

    /// Names currently stored for `kind`, sorted.
    pub fn names(&self, kind: Kind) -> Vec<String> {
        let state = self.state.borrow();
        let mut names: Vec<String> = match kind {
            Kind::Vendor => state.vendors.keys().cloned().collect(),
            Kind::Vsp => state.vsps.keys().cloned().collect(),
            Kind::Vf => state.vfs.keys().cloned().collect(),
            Kind::Service => state.services.keys().cloned().collect(),
            Kind::Customer => state.customers.keys().cloned().collect(),
            Kind::Subscription => state
                .subscriptions
                .iter()
                .map(|(c, t)| format!("{}/{}", c, t))
                .collect(),
            Kind::CloudRegionLink => state
                .links
                .iter()
                .map(|(c, t, p)| format!("{}/{}/{}", c, t, p))
                .collect(),
            Kind::ServiceInstance => state
                .service_instances
                .values()
                .map(|(_, _, si)| si.instance_name.clone())
                .collect(),
            Kind::Vnf => state.vnfs.values().map(|v| v.vnf_name.clone()).collect(),
            Kind::VfModule => state
                .vf_modules
                .values()
                .flatten()
                .map(|m| m.vf_module_name.clone())
                .collect(),
            Kind::Network => state
                .networks
                .values()
                .map(|n| n.network_name.clone())
                .collect(),
        };
        names.sort();
        names
    }

    /// Whether nothing at all is stored.
    pub fn is_empty(&self) -> bool {
        [
            Kind::Vendor,
            Kind::Vsp,
            Kind::Vf,
            Kind::Service,
            Kind::Customer,
            Kind::Subscription,
            Kind::CloudRegionLink,
            Kind::ServiceInstance,
            Kind::Vnf,
            Kind::VfModule,
            Kind::Network,
        ]
        .into_iter()
        .all(|kind| self.names(kind).is_empty())
    }

    /// Store a vendor directly.
    pub fn seed_vendor(&self, name: &str) -> Vendor {
        let mut state = self.state.borrow_mut();
        let vendor = Vendor {
            id: state.id("vendor"),
            name: name.to_string(),
        };
        state.vendors.insert(name.to_string(), vendor.clone());
        vendor
    }

    /// Store a customer directly.
    pub fn seed_customer(&self, id: &str) -> Customer {
        let customer = Customer {
            global_customer_id: id.to_string(),
            subscriber_name: id.to_string(),
            resource_version: Some("1".to_string()),
        };
        self.state
            .borrow_mut()
            .customers
            .insert(id.to_string(), customer.clone());
        customer
    }

    /// Store a service instance directly.
    pub fn seed_service_instance(
        &self,
        customer: &str,
        service_type: &str,
        name: &str,
    ) -> ServiceInstance {
        let mut state = self.state.borrow_mut();
        let instance = ServiceInstance {
            instance_id: state.id("si"),
            instance_name: name.to_string(),
        };
        state.service_instances.insert(
            instance.instance_id.clone(),
            (
                customer.to_string(),
                service_type.to_string(),
                instance.clone(),
            ),
        );
        instance
    }

    /// Store a VNF directly.
    pub fn seed_vnf(&self, name: &str) -> GenericVnf {
        let mut state = self.state.borrow_mut();
        let vnf = GenericVnf {
            vnf_id: state.id("vnf"),
            vnf_name: name.to_string(),
        };
        state.vnfs.insert(vnf.vnf_id.clone(), vnf.clone());
        vnf
    }

    fn enter(&self, component: &str, operation: &str, subject: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("{} {}", operation, subject));
        match self.failures.borrow().get(operation) {
            Some(message) => Err(HarnessError::Api {
                component: component.to_string(),
                status: 500,
                url: format!("mock://{}/{}", component.to_lowercase(), operation),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn missing(kind: &str, name: &str) -> HarnessError {
        HarnessError::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

impl Catalog for MockPlatform {
    fn get_vendor(&self, name: &str) -> Result<Option<Vendor>> {
        self.enter("SDC", "get_vendor", name)?;
        Ok(self.state.borrow().vendors.get(name).cloned())
    }

    fn create_vendor(&self, name: &str) -> Result<Vendor> {
        self.enter("SDC", "create_vendor", name)?;
        let mut state = self.state.borrow_mut();
        let vendor = Vendor {
            id: state.id("vendor"),
            name: name.to_string(),
        };
        state.vendors.insert(name.to_string(), vendor.clone());
        Ok(vendor)
    }

    fn delete_vendor(&self, vendor: &Vendor) -> Result<()> {
        self.enter("SDC", "delete_vendor", &vendor.name)?;
        self.state.borrow_mut().vendors.remove(&vendor.name);
        Ok(())
    }

    fn get_vsp(&self, name: &str) -> Result<Option<Vsp>> {
        self.enter("SDC", "get_vsp", name)?;
        Ok(self.state.borrow().vsps.get(name).cloned())
    }

    fn create_vsp(&self, name: &str, vendor: &Vendor, _package: Option<&Path>) -> Result<Vsp> {
        self.enter("SDC", "create_vsp", name)?;
        let mut state = self.state.borrow_mut();
        let vsp = Vsp {
            id: state.id("vsp"),
            name: name.to_string(),
            vendor_id: vendor.id.clone(),
            version: "1.0".to_string(),
        };
        state.vsps.insert(name.to_string(), vsp.clone());
        Ok(vsp)
    }

    fn delete_vsp(&self, vsp: &Vsp) -> Result<()> {
        self.enter("SDC", "delete_vsp", &vsp.name)?;
        self.state.borrow_mut().vsps.remove(&vsp.name);
        Ok(())
    }

    fn get_vf(&self, name: &str) -> Result<Option<Vf>> {
        self.enter("SDC", "get_vf", name)?;
        Ok(self.state.borrow().vfs.get(name).cloned())
    }

    fn create_vf(&self, name: &str, _vsp: &Vsp) -> Result<Vf> {
        self.enter("SDC", "create_vf", name)?;
        let mut state = self.state.borrow_mut();
        let vf = Vf {
            id: state.id("vf"),
            uuid: state.id("vf-uuid"),
            name: name.to_string(),
        };
        state.vfs.insert(name.to_string(), vf.clone());
        Ok(vf)
    }

    fn delete_vf(&self, vf: &Vf) -> Result<()> {
        self.enter("SDC", "delete_vf", &vf.name)?;
        self.state.borrow_mut().vfs.remove(&vf.name);
        Ok(())
    }

    fn get_service(&self, name: &str) -> Result<Option<Service>> {
        self.enter("SDC", "get_service", name)?;
        Ok(self.state.borrow().services.get(name).cloned())
    }

    fn create_service(&self, name: &str, _resources: &[String]) -> Result<Service> {
        self.enter("SDC", "create_service", name)?;
        let mut state = self.state.borrow_mut();
        let service = Service {
            id: state.id("service"),
            uuid: state.id("service-uuid"),
            name: name.to_string(),
        };
        state.services.insert(name.to_string(), service.clone());
        Ok(service)
    }

    fn delete_service(&self, service: &Service) -> Result<()> {
        self.enter("SDC", "delete_service", &service.name)?;
        let mut state = self.state.borrow_mut();
        state.services.remove(&service.name);
        state.distributions.remove(&service.uuid);
        Ok(())
    }

    fn distribute_service(&self, service: &Service) -> Result<()> {
        self.enter("SDC", "distribute_service", &service.name)?;
        self.state
            .borrow_mut()
            .distributions
            .insert(service.uuid.clone(), 0);
        Ok(())
    }

    fn distribution_status(&self, service: &Service) -> Result<DistributionStatus> {
        self.enter("SDC", "distribution_status", &service.name)?;
        let mut state = self.state.borrow_mut();
        let Some(polls) = state.distributions.get_mut(&service.uuid) else {
            return Ok(DistributionStatus::NotDistributed);
        };
        *polls += 1;
        if *polls <= self.pending_polls {
            return Ok(DistributionStatus::InProgress);
        }
        Ok(match self.distribution_failure.borrow().as_ref() {
            Some(message) => DistributionStatus::Failed(message.clone()),
            None => DistributionStatus::Distributed,
        })
    }
}

impl Inventory for MockPlatform {
    fn get_customer(&self, global_customer_id: &str) -> Result<Option<Customer>> {
        self.enter("AAI", "get_customer", global_customer_id)?;
        Ok(self.state.borrow().customers.get(global_customer_id).cloned())
    }

    fn create_customer(&self, global_customer_id: &str) -> Result<Customer> {
        self.enter("AAI", "create_customer", global_customer_id)?;
        let customer = Customer {
            global_customer_id: global_customer_id.to_string(),
            subscriber_name: global_customer_id.to_string(),
            resource_version: Some("1".to_string()),
        };
        self.state
            .borrow_mut()
            .customers
            .insert(global_customer_id.to_string(), customer.clone());
        Ok(customer)
    }

    fn delete_customer(&self, customer: &Customer) -> Result<()> {
        self.enter("AAI", "delete_customer", &customer.global_customer_id)?;
        let mut state = self.state.borrow_mut();
        if state
            .subscriptions
            .iter()
            .any(|(c, _)| c == &customer.global_customer_id)
        {
            return Err(HarnessError::Api {
                component: "AAI".to_string(),
                status: 412,
                url: "mock://aai/delete_customer".to_string(),
                message: format!(
                    "customer {} still has subscriptions",
                    customer.global_customer_id
                ),
            });
        }
        state.customers.remove(&customer.global_customer_id);
        Ok(())
    }

    fn get_subscription(
        &self,
        customer: &str,
        service_type: &str,
    ) -> Result<Option<ServiceSubscription>> {
        self.enter("AAI", "get_subscription", service_type)?;
        let key = (customer.to_string(), service_type.to_string());
        Ok(self
            .state
            .borrow()
            .subscriptions
            .contains(&key)
            .then(|| ServiceSubscription {
                service_type: service_type.to_string(),
                resource_version: Some("1".to_string()),
            }))
    }

    fn create_subscription(
        &self,
        customer: &str,
        service_type: &str,
    ) -> Result<ServiceSubscription> {
        self.enter("AAI", "create_subscription", service_type)?;
        let mut state = self.state.borrow_mut();
        if !state.customers.contains_key(customer) {
            return Err(Self::missing("customer", customer));
        }
        state
            .subscriptions
            .insert((customer.to_string(), service_type.to_string()));
        Ok(ServiceSubscription {
            service_type: service_type.to_string(),
            resource_version: Some("1".to_string()),
        })
    }

    fn delete_subscription(
        &self,
        customer: &str,
        subscription: &ServiceSubscription,
    ) -> Result<()> {
        self.enter("AAI", "delete_subscription", &subscription.service_type)?;
        self.state
            .borrow_mut()
            .subscriptions
            .remove(&(customer.to_string(), subscription.service_type.clone()));
        Ok(())
    }

    fn is_cloud_region_linked(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<bool> {
        self.enter("AAI", "is_cloud_region_linked", service_type)?;
        Ok(self
            .state
            .borrow()
            .links
            .contains(&link_key(customer, service_type, placement)))
    }

    fn link_cloud_region(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<()> {
        self.enter("AAI", "link_cloud_region", service_type)?;
        self.state
            .borrow_mut()
            .links
            .insert(link_key(customer, service_type, placement));
        Ok(())
    }

    fn unlink_cloud_region(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<()> {
        self.enter("AAI", "unlink_cloud_region", service_type)?;
        self.state
            .borrow_mut()
            .links
            .remove(&link_key(customer, service_type, placement));
        Ok(())
    }

    fn get_service_instance(
        &self,
        customer: &str,
        service_type: &str,
        name: &str,
    ) -> Result<Option<ServiceInstance>> {
        self.enter("AAI", "get_service_instance", name)?;
        Ok(self
            .state
            .borrow()
            .service_instances
            .values()
            .find(|(c, t, si)| c == customer && t == service_type && si.instance_name == name)
            .map(|(_, _, si)| si.clone()))
    }

    fn get_vnf(&self, name: &str) -> Result<Option<GenericVnf>> {
        self.enter("AAI", "get_vnf", name)?;
        Ok(self
            .state
            .borrow()
            .vnfs
            .values()
            .find(|v| v.vnf_name == name)
            .cloned())
    }

    fn get_vf_module(&self, vnf: &GenericVnf, name: &str) -> Result<Option<VfModule>> {
        self.enter("AAI", "get_vf_module", name)?;
        Ok(self
            .state
            .borrow()
            .vf_modules
            .get(&vnf.vnf_id)
            .and_then(|modules| modules.iter().find(|m| m.vf_module_name == name))
            .cloned())
    }

    fn get_network(&self, name: &str) -> Result<Option<L3Network>> {
        self.enter("AAI", "get_network", name)?;
        Ok(self
            .state
            .borrow()
            .networks
            .values()
            .find(|n| n.network_name == name)
            .cloned())
    }
}

impl Orchestrator for MockPlatform {
    fn instantiate_service(
        &self,
        request: &ServiceInstanceRequest,
    ) -> Result<OrchestrationRequest> {
        self.enter("SO", "instantiate_service", &request.instance_name)?;
        let mut state = self.state.borrow_mut();
        let instance = ServiceInstance {
            instance_id: state.id("si"),
            instance_name: request.instance_name.clone(),
        };
        state.service_instances.insert(
            instance.instance_id.clone(),
            (
                request.customer.clone(),
                request.subscription_type.clone(),
                instance.clone(),
            ),
        );
        Ok(state.request(instance.instance_id))
    }

    fn delete_service_instance(&self, instance: &ServiceInstance) -> Result<OrchestrationRequest> {
        self.enter("SO", "delete_service_instance", &instance.instance_name)?;
        let mut state = self.state.borrow_mut();
        state.service_instances.remove(&instance.instance_id);
        Ok(state.request(instance.instance_id.clone()))
    }

    fn instantiate_network(
        &self,
        instance: &ServiceInstance,
        request: &NetworkRequest,
    ) -> Result<OrchestrationRequest> {
        self.enter("SO", "instantiate_network", &request.network_name)?;
        let mut state = self.state.borrow_mut();
        if !state.service_instances.contains_key(&instance.instance_id) {
            return Err(Self::missing("service instance", &instance.instance_name));
        }
        let network = L3Network {
            network_id: state.id("net"),
            network_name: request.network_name.clone(),
        };
        state
            .networks
            .insert(network.network_id.clone(), network.clone());
        Ok(state.request(network.network_id))
    }

    fn delete_network(
        &self,
        _instance: &ServiceInstance,
        network: &L3Network,
    ) -> Result<OrchestrationRequest> {
        self.enter("SO", "delete_network", &network.network_name)?;
        let mut state = self.state.borrow_mut();
        state.networks.remove(&network.network_id);
        Ok(state.request(network.network_id.clone()))
    }

    fn instantiate_vnf(
        &self,
        instance: &ServiceInstance,
        request: &VnfRequest,
    ) -> Result<OrchestrationRequest> {
        self.enter("SO", "instantiate_vnf", &request.vnf_name)?;
        let mut state = self.state.borrow_mut();
        if !state.service_instances.contains_key(&instance.instance_id) {
            return Err(Self::missing("service instance", &instance.instance_name));
        }
        let vnf = GenericVnf {
            vnf_id: state.id("vnf"),
            vnf_name: request.vnf_name.clone(),
        };
        state.vnfs.insert(vnf.vnf_id.clone(), vnf.clone());
        Ok(state.request(vnf.vnf_id))
    }

    fn delete_vnf(
        &self,
        _instance: &ServiceInstance,
        vnf: &GenericVnf,
    ) -> Result<OrchestrationRequest> {
        self.enter("SO", "delete_vnf", &vnf.vnf_name)?;
        let mut state = self.state.borrow_mut();
        if state
            .vf_modules
            .get(&vnf.vnf_id)
            .is_some_and(|modules| !modules.is_empty())
        {
            return Err(HarnessError::Api {
                component: "SO".to_string(),
                status: 400,
                url: "mock://so/delete_vnf".to_string(),
                message: format!("VNF {} still has VF-modules", vnf.vnf_name),
            });
        }
        state.vnfs.remove(&vnf.vnf_id);
        Ok(state.request(vnf.vnf_id.clone()))
    }

    fn instantiate_vf_module(
        &self,
        _instance: &ServiceInstance,
        vnf: &GenericVnf,
        request: &VfModuleRequest,
    ) -> Result<OrchestrationRequest> {
        self.enter("SO", "instantiate_vf_module", &request.vf_module_name)?;
        let mut state = self.state.borrow_mut();
        if !state.vnfs.contains_key(&vnf.vnf_id) {
            return Err(Self::missing("vnf", &vnf.vnf_name));
        }
        let module = VfModule {
            vf_module_id: state.id("vfm"),
            vf_module_name: request.vf_module_name.clone(),
        };
        state
            .vf_modules
            .entry(vnf.vnf_id.clone())
            .or_default()
            .push(module.clone());
        Ok(state.request(module.vf_module_id))
    }

    fn delete_vf_module(
        &self,
        _instance: &ServiceInstance,
        vnf: &GenericVnf,
        module: &VfModule,
    ) -> Result<OrchestrationRequest> {
        self.enter("SO", "delete_vf_module", &module.vf_module_name)?;
        let mut state = self.state.borrow_mut();
        if let Some(modules) = state.vf_modules.get_mut(&vnf.vnf_id) {
            modules.retain(|m| m.vf_module_id != module.vf_module_id);
        }
        Ok(state.request(module.vf_module_id.clone()))
    }

    fn request_state(&self, request: &OrchestrationRequest) -> Result<RequestState> {
        self.enter("SO", "request_state", &request.request_id)?;
        let mut state = self.state.borrow_mut();
        let polls = state
            .requests
            .get_mut(&request.request_id)
            .ok_or_else(|| Self::missing("orchestration request", &request.request_id))?;
        *polls += 1;
        if *polls <= self.pending_polls {
            return Ok(RequestState::InProgress);
        }
        Ok(match self.request_failure.borrow().as_ref() {
            Some(message) => RequestState::Failed(message.clone()),
            None => RequestState::Complete,
        })
    }
}

//! Platform entities and request payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::SubnetModel;

/// A vendor (license model) in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
}

/// A vendor software product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vsp {
    pub id: String,
    pub name: String,
    pub vendor_id: String,
    pub version: String,
}

/// A certified VF resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vf {
    pub id: String,
    pub uuid: String,
    pub name: String,
}

/// A certified service model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub uuid: String,
    pub name: String,
}

/// Distribution progress of a service model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionStatus {
    NotDistributed,
    InProgress,
    Distributed,
    Failed(String),
}

/// A customer in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub global_customer_id: String,
    pub subscriber_name: String,
    pub resource_version: Option<String>,
}

/// A customer's subscription to a service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSubscription {
    pub service_type: String,
    pub resource_version: Option<String>,
}

/// Cloud region and tenant resources are placed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub cloud_owner: String,
    pub cloud_region_id: String,
    pub tenant_id: String,
}

/// An instantiated service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub instance_id: String,
    pub instance_name: String,
}

/// An instantiated VNF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericVnf {
    pub vnf_id: String,
    pub vnf_name: String,
}

/// An instantiated VF-module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VfModule {
    pub vf_module_id: String,
    pub vf_module_name: String,
}

/// An instantiated L3 network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L3Network {
    pub network_id: String,
    pub network_name: String,
}

/// Handle on an asynchronous orchestration job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationRequest {
    pub request_id: String,
    pub instance_id: String,
}

/// State of an orchestration job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    InProgress,
    Complete,
    Failed(String),
}

/// Business metadata of an instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    pub owning_entity: String,
    pub project: String,
    pub platform: String,
    pub line_of_business: String,
}

/// Instantiate a service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInstanceRequest {
    pub instance_name: String,
    pub service: Service,
    pub customer: String,
    pub subscription_type: String,
    pub placement: Placement,
    pub metadata: RequestMetadata,
}

/// Instantiate a VNF inside a service instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VnfRequest {
    pub vnf_name: String,
    pub model_name: String,
    pub placement: Placement,
    pub metadata: RequestMetadata,
}

/// Instantiate a VF-module of a VNF.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VfModuleRequest {
    pub vf_module_name: String,
    pub model_name: String,
    pub placement: Placement,
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// Instantiate a network inside a service instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRequest {
    pub network_name: String,
    pub model_name: String,
    pub placement: Placement,
    pub metadata: RequestMetadata,
    pub subnets: Vec<SubnetModel>,
}

//! Inventory graph (AAI) over REST.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::http::RestClient;
use crate::config::Endpoint;
use crate::error::Result;
use crate::sdk::types::{
    Customer, GenericVnf, L3Network, Placement, ServiceInstance, ServiceSubscription, VfModule,
};
use crate::sdk::Inventory;

const AAI: &str = "/aai/v27";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CustomerBody {
    global_customer_id: String,
    #[serde(default)]
    subscriber_name: String,
    #[serde(default)]
    resource_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SubscriptionBody {
    service_type: String,
    #[serde(default)]
    resource_version: Option<String>,
    #[serde(default)]
    relationship_list: Option<RelationshipList>,
}

#[derive(Debug, Default, Deserialize)]
struct RelationshipList {
    #[serde(default)]
    relationship: Vec<Relationship>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Relationship {
    #[serde(default)]
    related_link: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ServiceInstanceList {
    #[serde(default)]
    service_instance: Vec<ServiceInstanceBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ServiceInstanceBody {
    service_instance_id: String,
    service_instance_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct GenericVnfList {
    #[serde(default)]
    generic_vnf: Vec<GenericVnfBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct GenericVnfBody {
    vnf_id: String,
    vnf_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct VfModuleList {
    #[serde(default)]
    vf_module: Vec<VfModuleBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct VfModuleBody {
    vf_module_id: String,
    vf_module_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct L3NetworkList {
    #[serde(default)]
    l3_network: Vec<L3NetworkBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct L3NetworkBody {
    network_id: String,
    network_name: String,
}

fn customer_path(customer: &str) -> String {
    format!("{}/business/customers/customer/{}", AAI, customer)
}

fn subscription_path(customer: &str, service_type: &str) -> String {
    format!(
        "{}/service-subscriptions/service-subscription/{}",
        customer_path(customer),
        service_type
    )
}

fn tenant_link(placement: &Placement) -> String {
    format!(
        "{}/cloud-infrastructure/cloud-regions/cloud-region/{}/{}/tenants/tenant/{}",
        AAI, placement.cloud_owner, placement.cloud_region_id, placement.tenant_id
    )
}

/// [`Inventory`] backed by the AAI REST API.
#[derive(Debug, Clone)]
pub struct RestInventory {
    client: RestClient,
}

impl RestInventory {
    pub fn new(endpoint: &Endpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: RestClient::new("AAI", endpoint, timeout)?,
        })
    }

    fn relationship_body(placement: &Placement) -> serde_json::Value {
        json!({
            "related-to": "tenant",
            "related-link": tenant_link(placement),
            "relationship-data": [
                { "relationship-key": "cloud-region.cloud-owner", "relationship-value": placement.cloud_owner },
                { "relationship-key": "cloud-region.cloud-region-id", "relationship-value": placement.cloud_region_id },
                { "relationship-key": "tenant.tenant-id", "relationship-value": placement.tenant_id },
            ],
        })
    }
}

impl Inventory for RestInventory {
    fn get_customer(&self, global_customer_id: &str) -> Result<Option<Customer>> {
        let body: Option<CustomerBody> =
            self.client.get_optional(&customer_path(global_customer_id), &[])?;
        Ok(body.map(|c| Customer {
            global_customer_id: c.global_customer_id,
            subscriber_name: c.subscriber_name,
            resource_version: c.resource_version,
        }))
    }

    fn create_customer(&self, global_customer_id: &str) -> Result<Customer> {
        self.client.send_json_unit(
            Method::PUT,
            &customer_path(global_customer_id),
            &json!({
                "global-customer-id": global_customer_id,
                "subscriber-name": global_customer_id,
                "subscriber-type": "INFRA",
            }),
        )?;
        Ok(Customer {
            global_customer_id: global_customer_id.to_string(),
            subscriber_name: global_customer_id.to_string(),
            resource_version: None,
        })
    }

    fn delete_customer(&self, customer: &Customer) -> Result<()> {
        let version = customer.resource_version.as_deref().unwrap_or_default();
        self.client.delete(
            &customer_path(&customer.global_customer_id),
            &[("resource-version", version)],
        )
    }

    fn get_subscription(
        &self,
        customer: &str,
        service_type: &str,
    ) -> Result<Option<ServiceSubscription>> {
        let body: Option<SubscriptionBody> = self
            .client
            .get_optional(&subscription_path(customer, service_type), &[])?;
        Ok(body.map(|s| ServiceSubscription {
            service_type: s.service_type,
            resource_version: s.resource_version,
        }))
    }

    fn create_subscription(
        &self,
        customer: &str,
        service_type: &str,
    ) -> Result<ServiceSubscription> {
        self.client.send_json_unit(
            Method::PUT,
            &subscription_path(customer, service_type),
            &json!({ "service-type": service_type }),
        )?;
        Ok(ServiceSubscription {
            service_type: service_type.to_string(),
            resource_version: None,
        })
    }

    fn delete_subscription(
        &self,
        customer: &str,
        subscription: &ServiceSubscription,
    ) -> Result<()> {
        let version = subscription.resource_version.as_deref().unwrap_or_default();
        self.client.delete(
            &subscription_path(customer, &subscription.service_type),
            &[("resource-version", version)],
        )
    }

    fn is_cloud_region_linked(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<bool> {
        let body: Option<SubscriptionBody> = self
            .client
            .get_optional(&subscription_path(customer, service_type), &[])?;
        let link = tenant_link(placement);
        Ok(body
            .and_then(|s| s.relationship_list)
            .unwrap_or_default()
            .relationship
            .iter()
            .any(|r| r.related_link == link))
    }

    fn link_cloud_region(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<()> {
        self.client.send_json_unit(
            Method::PUT,
            &format!(
                "{}/relationship-list/relationship",
                subscription_path(customer, service_type)
            ),
            &Self::relationship_body(placement),
        )
    }

    fn unlink_cloud_region(
        &self,
        customer: &str,
        service_type: &str,
        placement: &Placement,
    ) -> Result<()> {
        self.client.send_json_unit(
            Method::DELETE,
            &format!(
                "{}/relationship-list/relationship",
                subscription_path(customer, service_type)
            ),
            &Self::relationship_body(placement),
        )
    }

    fn get_service_instance(
        &self,
        customer: &str,
        service_type: &str,
        name: &str,
    ) -> Result<Option<ServiceInstance>> {
        let list: Option<ServiceInstanceList> = self.client.get_optional(
            &format!(
                "{}/service-instances",
                subscription_path(customer, service_type)
            ),
            &[("service-instance-name", name)],
        )?;
        Ok(list
            .and_then(|l| l.service_instance.into_iter().next())
            .map(|si| ServiceInstance {
                instance_id: si.service_instance_id,
                instance_name: si.service_instance_name,
            }))
    }

    fn get_vnf(&self, name: &str) -> Result<Option<GenericVnf>> {
        let list: Option<GenericVnfList> = self
            .client
            .get_optional(&format!("{}/network/generic-vnfs", AAI), &[("vnf-name", name)])?;
        Ok(list
            .and_then(|l| l.generic_vnf.into_iter().next())
            .map(|v| GenericVnf {
                vnf_id: v.vnf_id,
                vnf_name: v.vnf_name,
            }))
    }

    fn get_vf_module(&self, vnf: &GenericVnf, name: &str) -> Result<Option<VfModule>> {
        let list: Option<VfModuleList> = self.client.get_optional(
            &format!(
                "{}/network/generic-vnfs/generic-vnf/{}/vf-modules",
                AAI, vnf.vnf_id
            ),
            &[],
        )?;
        Ok(list
            .map(|l| l.vf_module)
            .unwrap_or_default()
            .into_iter()
            .find(|m| m.vf_module_name == name)
            .map(|m| VfModule {
                vf_module_id: m.vf_module_id,
                vf_module_name: m.vf_module_name,
            }))
    }

    fn get_network(&self, name: &str) -> Result<Option<L3Network>> {
        let list: Option<L3NetworkList> = self.client.get_optional(
            &format!("{}/network/l3-networks", AAI),
            &[("network-name", name)],
        )?;
        Ok(list
            .and_then(|l| l.l3_network.into_iter().next())
            .map(|n| L3Network {
                network_id: n.network_id,
                network_name: n.network_name,
            }))
    }
}

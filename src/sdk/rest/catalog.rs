//! Service design catalog (SDC) over REST.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use super::http::RestClient;
use crate::config::Endpoint;
use crate::error::{HarnessError, Result};
use crate::sdk::types::{DistributionStatus, Service, Vendor, Vf, Vsp};
use crate::sdk::Catalog;

const ONBOARDING: &str = "/onboarding-api/v1.0";
const CATALOG_READ: &str = "/sdc/v1/catalog";
const CATALOG_WRITE: &str = "/sdc1/feProxy/rest/v1/catalog";

#[derive(Debug, Deserialize)]
struct ItemList<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct VendorItem {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VspItem {
    id: String,
    name: String,
    #[serde(default)]
    vendor_id: String,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemVersion {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedItem {
    item_id: String,
    version: ItemVersion,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogItem {
    uuid: String,
    name: String,
    #[serde(default)]
    unique_id: Option<String>,
}

impl CatalogItem {
    fn id(&self) -> String {
        self.unique_id.clone().unwrap_or_else(|| self.uuid.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DistributionList {
    #[serde(default)]
    distribution_status_of_service_list: Vec<DistributionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DistributionEntry {
    #[serde(default)]
    deployement_status: String,
}

fn distribution_status(list: &DistributionList) -> DistributionStatus {
    let Some(latest) = list.distribution_status_of_service_list.last() else {
        return DistributionStatus::NotDistributed;
    };
    match latest.deployement_status.as_str() {
        "Distributed" => DistributionStatus::Distributed,
        "Distribution Rejected" | "Error" | "Failed" => {
            DistributionStatus::Failed(latest.deployement_status.clone())
        }
        _ => DistributionStatus::InProgress,
    }
}

/// [`Catalog`] backed by the SDC front end and onboarding APIs.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    catalog: RestClient,
    onboarding: RestClient,
}

impl RestCatalog {
    pub fn new(catalog: &Endpoint, onboarding: &Endpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            catalog: RestClient::new("SDC", catalog, timeout)?,
            onboarding: RestClient::new("SDC", onboarding, timeout)?,
        })
    }

    fn find_catalog_item(&self, collection: &str, name: &str) -> Result<Option<CatalogItem>> {
        let items: Vec<CatalogItem> = self
            .catalog
            .get(&format!("{}/{}", CATALOG_READ, collection), &[])?;
        Ok(items.into_iter().find(|item| item.name == name))
    }

    fn certify(&self, collection: &str, id: &str) -> Result<CatalogItem> {
        self.catalog.send_json(
            Method::POST,
            &format!(
                "{}/{}/{}/lifecycleState/certify",
                CATALOG_WRITE, collection, id
            ),
            &json!({ "userRemarks": "certify" }),
        )
    }

    fn vsp_action(&self, vsp: &Vsp, action: &str) -> Result<()> {
        self.onboarding.send_json_unit(
            Method::PUT,
            &format!(
                "{}/vendor-software-products/{}/versions/{}/actions",
                ONBOARDING, vsp.id, vsp.version
            ),
            &json!({ "action": action }),
        )
    }

    fn upload_package(&self, vsp: &Vsp, package: &Path) -> Result<()> {
        let candidate = format!(
            "{}/vendor-software-products/{}/versions/{}/orchestration-template-candidate",
            ONBOARDING, vsp.id, vsp.version
        );
        let bytes = fs::read(package)?;
        info!("Uploading {} to VSP {}", package.display(), vsp.name);
        self.onboarding.send_bytes(Method::POST, &candidate, bytes)?;
        self.onboarding.send_json_unit(
            Method::PUT,
            &format!("{}/process", candidate),
            &json!({}),
        )
    }
}

impl Catalog for RestCatalog {
    fn get_vendor(&self, name: &str) -> Result<Option<Vendor>> {
        let list: ItemList<VendorItem> = self
            .onboarding
            .get(&format!("{}/vendor-license-models", ONBOARDING), &[])?;
        Ok(list
            .results
            .into_iter()
            .find(|v| v.name == name)
            .map(|v| Vendor {
                id: v.id,
                name: v.name,
            }))
    }

    fn create_vendor(&self, name: &str) -> Result<Vendor> {
        let created: CreatedItem = self.onboarding.send_json(
            Method::POST,
            &format!("{}/vendor-license-models", ONBOARDING),
            &json!({ "vendorName": name, "description": name, "iconRef": "icon" }),
        )?;
        self.onboarding.send_json_unit(
            Method::PUT,
            &format!(
                "{}/vendor-license-models/{}/versions/{}/actions",
                ONBOARDING, created.item_id, created.version.id
            ),
            &json!({ "action": "Submit" }),
        )?;
        Ok(Vendor {
            id: created.item_id,
            name: name.to_string(),
        })
    }

    fn delete_vendor(&self, vendor: &Vendor) -> Result<()> {
        self.onboarding.delete(
            &format!("{}/vendor-license-models/{}", ONBOARDING, vendor.id),
            &[],
        )
    }

    fn get_vsp(&self, name: &str) -> Result<Option<Vsp>> {
        let list: ItemList<VspItem> = self
            .onboarding
            .get(&format!("{}/vendor-software-products", ONBOARDING), &[])?;
        Ok(list
            .results
            .into_iter()
            .find(|v| v.name == name)
            .map(|v| Vsp {
                id: v.id,
                name: v.name,
                vendor_id: v.vendor_id,
                version: v.version.unwrap_or_else(|| "latest".to_string()),
            }))
    }

    fn create_vsp(&self, name: &str, vendor: &Vendor, package: Option<&Path>) -> Result<Vsp> {
        let created: CreatedItem = self.onboarding.send_json(
            Method::POST,
            &format!("{}/vendor-software-products", ONBOARDING),
            &json!({
                "name": name,
                "description": name,
                "vendorName": vendor.name,
                "vendorId": vendor.id,
                "category": "resourceNewCategory.generic",
                "subCategory": "resourceNewCategory.generic.abstract",
                "onboardingMethod": "NetworkPackage",
                "licensingVersion": "",
                "icon": "icon",
            }),
        )?;
        let vsp = Vsp {
            id: created.item_id,
            name: name.to_string(),
            vendor_id: vendor.id.clone(),
            version: created.version.id,
        };

        if let Some(package) = package {
            self.upload_package(&vsp, package)?;
        }
        self.vsp_action(&vsp, "Submit")?;
        self.vsp_action(&vsp, "Create_Package")?;
        Ok(vsp)
    }

    fn delete_vsp(&self, vsp: &Vsp) -> Result<()> {
        self.onboarding.delete(
            &format!("{}/vendor-software-products/{}", ONBOARDING, vsp.id),
            &[],
        )
    }

    fn get_vf(&self, name: &str) -> Result<Option<Vf>> {
        Ok(self
            .find_catalog_item("resources", name)?
            .map(|item| Vf {
                id: item.id(),
                uuid: item.uuid,
                name: item.name,
            }))
    }

    fn create_vf(&self, name: &str, vsp: &Vsp) -> Result<Vf> {
        let created: CatalogItem = self.catalog.send_json(
            Method::POST,
            &format!("{}/resources", CATALOG_WRITE),
            &json!({
                "name": name,
                "resourceType": "VF",
                "csarUUID": vsp.id,
                "csarVersion": vsp.version,
                "vendorName": vsp.vendor_id,
                "categories": [{
                    "name": "Generic",
                    "subcategories": [{ "name": "Abstract" }]
                }],
            }),
        )?;
        let certified = self.certify("resources", &created.id())?;
        Ok(Vf {
            id: certified.id(),
            uuid: certified.uuid,
            name: certified.name,
        })
    }

    fn delete_vf(&self, vf: &Vf) -> Result<()> {
        self.catalog
            .delete(&format!("{}/resources/{}", CATALOG_WRITE, vf.id), &[])
    }

    fn get_service(&self, name: &str) -> Result<Option<Service>> {
        Ok(self
            .find_catalog_item("services", name)?
            .map(|item| Service {
                id: item.id(),
                uuid: item.uuid,
                name: item.name,
            }))
    }

    fn create_service(&self, name: &str, resources: &[String]) -> Result<Service> {
        let created: CatalogItem = self.catalog.send_json(
            Method::POST,
            &format!("{}/services", CATALOG_WRITE),
            &json!({
                "name": name,
                "description": name,
                "categories": [{ "name": "Network Service" }],
                "instantiationType": "A-la-carte",
            }),
        )?;
        let service_id = created.id();

        for resource in resources {
            let item = self.find_catalog_item("resources", resource)?.ok_or_else(|| {
                HarnessError::NotFound {
                    kind: "resource".to_string(),
                    name: resource.clone(),
                }
            })?;
            self.catalog.send_json_unit(
                Method::POST,
                &format!("{}/services/{}/resourceInstance", CATALOG_WRITE, service_id),
                &json!({ "name": resource, "componentUid": item.id(), "originType": "VF" }),
            )?;
        }

        let certified = self.certify("services", &service_id)?;
        Ok(Service {
            id: certified.id(),
            uuid: certified.uuid,
            name: certified.name,
        })
    }

    fn delete_service(&self, service: &Service) -> Result<()> {
        self.catalog
            .delete(&format!("{}/services/{}", CATALOG_WRITE, service.id), &[])
    }

    fn distribute_service(&self, service: &Service) -> Result<()> {
        self.catalog.send_json_unit(
            Method::POST,
            &format!(
                "{}/services/{}/distribution/PROD/activate",
                CATALOG_WRITE, service.id
            ),
            &json!({}),
        )
    }

    fn distribution_status(&self, service: &Service) -> Result<DistributionStatus> {
        let list: DistributionList = self.catalog.get(
            &format!("{}/services/{}/distribution", CATALOG_WRITE, service.uuid),
            &[],
        )?;
        Ok(distribution_status(&list))
    }
}

//! Orchestration engine (SO) over REST.

use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::http::RestClient;
use crate::config::Endpoint;
use crate::error::Result;
use crate::sdk::types::{
    GenericVnf, L3Network, NetworkRequest, OrchestrationRequest, Placement, RequestMetadata,
    RequestState, ServiceInstance, ServiceInstanceRequest, VfModule, VfModuleRequest, VnfRequest,
};
use crate::sdk::Orchestrator;

const INSTANTIATION: &str = "/onap/so/infra/serviceInstantiation/v7/serviceInstances";
const REQUESTS: &str = "/onap/so/infra/orchestrationRequests/v7";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestReferencesBody {
    request_references: RequestReferences,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestReferences {
    request_id: String,
    #[serde(default)]
    instance_id: String,
}

#[derive(Debug, Deserialize)]
struct RequestBody {
    request: RequestStatusHolder,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestStatusHolder {
    request_status: RequestStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestStatus {
    request_state: String,
    #[serde(default)]
    status_message: String,
}

fn request_state(status: RequestStatus) -> RequestState {
    match status.request_state.as_str() {
        "COMPLETE" | "COMPLETED" => RequestState::Complete,
        "FAILED" | "ROLLED_BACK" | "ABORTED" => RequestState::Failed(status.status_message),
        _ => RequestState::InProgress,
    }
}

fn cloud_configuration(placement: &Placement) -> Value {
    json!({
        "cloudOwner": placement.cloud_owner,
        "lcpCloudRegionId": placement.cloud_region_id,
        "tenantId": placement.tenant_id,
    })
}

fn request_info(name: &str) -> Value {
    json!({
        "instanceName": name,
        "source": "VID",
        "suppressRollback": false,
        "requestorId": "onaptests",
    })
}

fn business(metadata: &RequestMetadata) -> Value {
    json!({
        "lineOfBusiness": { "lineOfBusinessName": metadata.line_of_business },
        "platform": { "platformName": metadata.platform },
    })
}

/// [`Orchestrator`] backed by the SO REST API.
#[derive(Debug, Clone)]
pub struct RestOrchestrator {
    client: RestClient,
}

impl RestOrchestrator {
    pub fn new(endpoint: &Endpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: RestClient::new("SO", endpoint, timeout)?,
        })
    }

    fn submit(&self, method: Method, path: &str, body: &Value) -> Result<OrchestrationRequest> {
        let response: RequestReferencesBody = self.client.send_json(method, path, body)?;
        Ok(OrchestrationRequest {
            request_id: response.request_references.request_id,
            instance_id: response.request_references.instance_id,
        })
    }

    fn delete_request(model_type: &str) -> Value {
        json!({
            "requestDetails": {
                "modelInfo": { "modelType": model_type },
                "requestInfo": { "source": "VID", "requestorId": "onaptests" },
            }
        })
    }
}

impl Orchestrator for RestOrchestrator {
    fn instantiate_service(
        &self,
        request: &ServiceInstanceRequest,
    ) -> Result<OrchestrationRequest> {
        let body = json!({
            "requestDetails": {
                "modelInfo": {
                    "modelType": "service",
                    "modelName": request.service.name,
                    "modelVersionId": request.service.uuid,
                },
                "subscriberInfo": { "globalSubscriberId": request.customer },
                "requestInfo": request_info(&request.instance_name),
                "requestParameters": {
                    "subscriptionServiceType": request.subscription_type,
                    "aLaCarte": true,
                },
                "cloudConfiguration": cloud_configuration(&request.placement),
                "owningEntity": { "owningEntityName": request.metadata.owning_entity },
                "project": { "projectName": request.metadata.project },
            }
        });
        self.submit(Method::POST, INSTANTIATION, &body)
    }

    fn delete_service_instance(&self, instance: &ServiceInstance) -> Result<OrchestrationRequest> {
        self.submit(
            Method::DELETE,
            &format!("{}/{}", INSTANTIATION, instance.instance_id),
            &Self::delete_request("service"),
        )
    }

    fn instantiate_network(
        &self,
        instance: &ServiceInstance,
        request: &NetworkRequest,
    ) -> Result<OrchestrationRequest> {
        let mut details = business(&request.metadata);
        details["modelInfo"] = json!({
            "modelType": "network",
            "modelName": request.model_name,
        });
        details["requestInfo"] = request_info(&request.network_name);
        details["cloudConfiguration"] = cloud_configuration(&request.placement);
        details["requestParameters"] = json!({
            "userParams": request.subnets.iter().map(|s| json!({
                "subnetName": s.subnet_name,
                "cidr": s.cidr,
                "gatewayAddress": s.gateway,
                "ipVersion": s.ip_version,
            })).collect::<Vec<_>>(),
        });
        self.submit(
            Method::POST,
            &format!("{}/{}/networks", INSTANTIATION, instance.instance_id),
            &json!({ "requestDetails": details }),
        )
    }

    fn delete_network(
        &self,
        instance: &ServiceInstance,
        network: &L3Network,
    ) -> Result<OrchestrationRequest> {
        self.submit(
            Method::DELETE,
            &format!(
                "{}/{}/networks/{}",
                INSTANTIATION, instance.instance_id, network.network_id
            ),
            &Self::delete_request("network"),
        )
    }

    fn instantiate_vnf(
        &self,
        instance: &ServiceInstance,
        request: &VnfRequest,
    ) -> Result<OrchestrationRequest> {
        let mut details = business(&request.metadata);
        details["modelInfo"] = json!({
            "modelType": "vnf",
            "modelName": request.model_name,
        });
        details["requestInfo"] = request_info(&request.vnf_name);
        details["cloudConfiguration"] = cloud_configuration(&request.placement);
        self.submit(
            Method::POST,
            &format!("{}/{}/vnfs", INSTANTIATION, instance.instance_id),
            &json!({ "requestDetails": details }),
        )
    }

    fn delete_vnf(
        &self,
        instance: &ServiceInstance,
        vnf: &GenericVnf,
    ) -> Result<OrchestrationRequest> {
        self.submit(
            Method::DELETE,
            &format!(
                "{}/{}/vnfs/{}",
                INSTANTIATION, instance.instance_id, vnf.vnf_id
            ),
            &Self::delete_request("vnf"),
        )
    }

    fn instantiate_vf_module(
        &self,
        instance: &ServiceInstance,
        vnf: &GenericVnf,
        request: &VfModuleRequest,
    ) -> Result<OrchestrationRequest> {
        let user_params: Vec<Value> = request
            .parameters
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect();
        let body = json!({
            "requestDetails": {
                "modelInfo": {
                    "modelType": "vfModule",
                    "modelName": request.model_name,
                },
                "requestInfo": request_info(&request.vf_module_name),
                "cloudConfiguration": cloud_configuration(&request.placement),
                "requestParameters": { "userParams": user_params, "usePreload": false },
            }
        });
        self.submit(
            Method::POST,
            &format!(
                "{}/{}/vnfs/{}/vfModules",
                INSTANTIATION, instance.instance_id, vnf.vnf_id
            ),
            &body,
        )
    }

    fn delete_vf_module(
        &self,
        instance: &ServiceInstance,
        vnf: &GenericVnf,
        module: &VfModule,
    ) -> Result<OrchestrationRequest> {
        self.submit(
            Method::DELETE,
            &format!(
                "{}/{}/vnfs/{}/vfModules/{}",
                INSTANTIATION, instance.instance_id, vnf.vnf_id, module.vf_module_id
            ),
            &Self::delete_request("vfModule"),
        )
    }

    fn request_state(&self, request: &OrchestrationRequest) -> Result<RequestState> {
        let body: RequestBody = self
            .client
            .get(&format!("{}/{}", REQUESTS, request.request_id), &[])?;
        Ok(request_state(body.request.request_status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::types::Service;
    use httpmock::prelude::*;

    fn orchestrator(server: &MockServer) -> RestOrchestrator {
        let endpoint = Endpoint {
            url: server.base_url(),
            ..Default::default()
        };
        RestOrchestrator::new(&endpoint, Duration::from_secs(5)).unwrap()
    }

    fn placement() -> Placement {
        Placement {
            cloud_owner: "onap".to_string(),
            cloud_region_id: "RegionOne".to_string(),
            tenant_id: "t1".to_string(),
        }
    }

    fn metadata() -> RequestMetadata {
        RequestMetadata {
            owning_entity: "oe".to_string(),
            project: "p".to_string(),
            platform: "pf".to_string(),
            line_of_business: "lob".to_string(),
        }
    }

    fn references(request_id: &str, instance_id: &str) -> Value {
        json!({ "requestReferences": { "requestId": request_id, "instanceId": instance_id } })
    }

    #[test]
    fn instantiate_service_returns_references() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/onap/so/infra/serviceInstantiation/v7/serviceInstances");
            then.status(202).json_body(references("r1", "si1"));
        });

        let request = ServiceInstanceRequest {
            instance_name: "si".to_string(),
            service: Service {
                id: "s".to_string(),
                uuid: "u".to_string(),
                name: "basic_vm".to_string(),
            },
            customer: "generic".to_string(),
            subscription_type: "basic_vm".to_string(),
            placement: placement(),
            metadata: metadata(),
        };
        let reference = orchestrator(&server).instantiate_service(&request).unwrap();

        assert_eq!(reference.request_id, "r1");
        assert_eq!(reference.instance_id, "si1");
        mock.assert();
    }

    #[test]
    fn delete_vf_module_targets_nested_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path(
                "/onap/so/infra/serviceInstantiation/v7/serviceInstances/si1/vnfs/vnf1/vfModules/m1",
            );
            then.status(202).json_body(references("r2", "m1"));
        });

        let reference = orchestrator(&server)
            .delete_vf_module(
                &ServiceInstance {
                    instance_id: "si1".to_string(),
                    instance_name: "si".to_string(),
                },
                &GenericVnf {
                    vnf_id: "vnf1".to_string(),
                    vnf_name: "vnf".to_string(),
                },
                &VfModule {
                    vf_module_id: "m1".to_string(),
                    vf_module_name: "base".to_string(),
                },
            )
            .unwrap();
        assert_eq!(reference.request_id, "r2");
        mock.assert();
    }

    #[test]
    fn request_state_parses_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/onap/so/infra/orchestrationRequests/v7/r1");
            then.status(200).json_body(json!({
                "request": {
                    "requestStatus": { "requestState": "FAILED", "statusMessage": "heat error" }
                }
            }));
        });

        let state = orchestrator(&server)
            .request_state(&OrchestrationRequest {
                request_id: "r1".to_string(),
                instance_id: String::new(),
            })
            .unwrap();
        assert_eq!(state, RequestState::Failed("heat error".to_string()));
    }

    #[test]
    fn request_state_mapping() {
        let status = |state: &str| RequestStatus {
            request_state: state.to_string(),
            status_message: String::new(),
        };
        assert_eq!(request_state(status("COMPLETE")), RequestState::Complete);
        assert_eq!(request_state(status("IN_PROGRESS")), RequestState::InProgress);
        assert_eq!(request_state(status("PENDING")), RequestState::InProgress);
        assert!(matches!(
            request_state(status("ROLLED_BACK")),
            RequestState::Failed(_)
        ));
    }
}

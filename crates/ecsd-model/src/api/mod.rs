//! Request and response contracts of the remote scheduler operations.
//!
//! Only the fields the deployment logic sets or reads are modelled.

use serde::{Deserialize, Serialize};

use crate::{DeploymentConfiguration, LoadBalancer, ServiceSpec, TaskHandle, TaskRecord};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesRequest {
    pub cluster: String,
    pub services: Vec<String>,
}

impl DescribeServicesRequest {
    pub fn single(cluster: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            services: vec![service.into()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub cluster: String,
    pub service_name: String,
    pub task_definition: TaskHandle,
    pub desired_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_balancers: Vec<LoadBalancer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_configuration: Option<DeploymentConfiguration>,
    /// Idempotency token; repeated requests with the same token create one service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

impl CreateServiceRequest {
    /// Bind a registered task definition to a service spec, keeping its desired count verbatim.
    pub fn new(task: &TaskHandle, spec: &ServiceSpec) -> Self {
        Self {
            cluster: spec.cluster.clone(),
            service_name: spec.service_name.clone(),
            task_definition: task.clone(),
            desired_count: spec.desired_count,
            role: spec.role.clone(),
            load_balancers: spec.load_balancers.clone(),
            deployment_configuration: spec.deployment_configuration,
            client_token: None,
        }
    }

    pub fn with_client_token(mut self, token: impl Into<String>) -> Self {
        self.client_token = Some(token.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub cluster: String,
    /// Name or ARN of the service to update.
    pub service: String,
    pub task_definition: TaskHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_configuration: Option<DeploymentConfiguration>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskRequest {
    pub cluster: String,
    pub task_definition: TaskHandle,
    pub count: u32,
    /// Free-form tag recorded on the task (at most 36 characters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
}

/// Outcome of a run-task call: the tasks that were placed and the placements that were rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunTaskResponse {
    pub tasks: Vec<TaskRecord>,
    pub failures: Vec<LaunchFailure>,
}

/// Placement rejected by the scheduler.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    /// Scheduler reason code, e.g. `RESOURCE:CPU`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LaunchFailure {
    pub fn new(arn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            arn: Some(arn.into()),
            reason: Some(reason.into()),
            detail: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTasksRequest {
    pub cluster: String,
    pub tasks: Vec<String>,
}

impl DescribeTasksRequest {
    pub fn single(cluster: impl Into<String>, task_arn: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            tasks: vec![task_arn.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_keeps_spec_fields() {
        let spec = ServiceSpec {
            cluster: "prod".into(),
            service_name: "web".into(),
            desired_count: 4,
            role: Some("arn:role".into()),
            ..Default::default()
        };
        let req = CreateServiceRequest::new(&TaskHandle::from("arn:td:web:7"), &spec)
            .with_client_token("tok");

        assert_eq!(req.desired_count, 4);
        assert_eq!(req.task_definition.as_str(), "arn:td:web:7");

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["serviceName"], "web");
        assert_eq!(json["taskDefinition"], "arn:td:web:7");
        assert_eq!(json["clientToken"], "tok");
        assert!(json.get("loadBalancers").is_none());
    }

    #[test]
    fn run_task_response_decodes_failures() {
        let json = r#"{"tasks": [], "failures": [{"arn": "arn:ci", "reason": "RESOURCE:CPU"}]}"#;
        let res: RunTaskResponse = serde_json::from_str(json).unwrap();
        assert!(res.tasks.is_empty());
        assert_eq!(res.failures[0].reason.as_deref(), Some("RESOURCE:CPU"));
    }
}

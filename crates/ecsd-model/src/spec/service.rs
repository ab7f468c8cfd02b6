use serde::{Deserialize, Serialize};

/// Description of the long-running service a task definition is deployed into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Cluster name or ARN hosting the service.
    pub cluster: String,
    pub service_name: String,
    /// Replica count requested for a newly created service.
    ///
    /// Ignored when updating an existing service whose desired count differs.
    #[serde(default)]
    pub desired_count: i64,
    /// IAM role the scheduler uses to register targets with the load balancer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_balancers: Vec<LoadBalancer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_configuration: Option<DeploymentConfiguration>,
}

/// Binding of a container port to a load balancer target group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    pub target_group_arn: String,
    pub container_name: String,
    pub container_port: u16,
}

/// Rollout bounds, in percent of the desired count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_percent: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_healthy_percent: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_with_target_group() {
        let json = r#"{
            "cluster": "prod",
            "serviceName": "web",
            "desiredCount": 2,
            "role": "arn:aws:iam::1:role/ecsService",
            "loadBalancers": [
                {"targetGroupArn": "arn:tg", "containerName": "web", "containerPort": 8080}
            ]
        }"#;

        let spec: ServiceSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.cluster, "prod");
        assert_eq!(spec.desired_count, 2);
        assert_eq!(spec.load_balancers[0].container_port, 8080);
        assert!(spec.deployment_configuration.is_none());
    }
}

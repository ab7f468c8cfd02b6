use serde::{Deserialize, Serialize};

use crate::ServiceStatus;

/// Snapshot of a service as returned by describe/create/update calls.
///
/// Never cached: every read of remote state produces a new record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRecord {
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_arn: Option<String>,
    pub status: ServiceStatus,
    pub running_count: i64,
    pub desired_count: i64,
    /// Deployments currently in flight; a settled service has exactly one.
    pub deployments: Vec<DeploymentRecord>,
}

impl ServiceRecord {
    /// Handle identifying the service: its ARN when known, otherwise its name.
    pub fn handle(&self) -> &str {
        self.service_arn.as_deref().unwrap_or(&self.service_name)
    }
}

/// One rollout of a task definition inside a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentRecord {
    pub id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,
    pub running_count: i64,
    pub desired_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ecs_service_and_ignores_unknown_fields() {
        let json = r#"{
            "serviceName": "web",
            "serviceArn": "arn:aws:ecs:us-east-1:1:service/prod/web",
            "status": "ACTIVE",
            "runningCount": 2,
            "desiredCount": 3,
            "pendingCount": 1,
            "launchType": "EC2",
            "deployments": [
                {"id": "ecs-svc/1", "status": "PRIMARY", "runningCount": 2, "desiredCount": 3, "rolloutState": "IN_PROGRESS"}
            ]
        }"#;

        let record: ServiceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.service_name, "web");
        assert_eq!(record.status, ServiceStatus::Active);
        assert_eq!(record.running_count, 2);
        assert_eq!(record.desired_count, 3);
        assert_eq!(record.deployments.len(), 1);
        assert_eq!(record.deployments[0].status, "PRIMARY");
        assert_eq!(record.handle(), "arn:aws:ecs:us-east-1:1:service/prod/web");
    }

    #[test]
    fn empty_object_decodes_as_missing() {
        let record: ServiceRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.status, ServiceStatus::Missing);
        assert!(record.deployments.is_empty());
        assert_eq!(record.handle(), "");
    }
}

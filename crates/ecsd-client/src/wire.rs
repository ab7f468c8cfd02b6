//! Response envelopes of the ECS JSON protocol.

use ecsd_model::{LaunchFailure, ServiceRecord, TaskRecord};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterTaskDefinitionOutput {
    pub task_definition: TaskDefinitionOutput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskDefinitionOutput {
    pub task_definition_arn: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct DescribeServicesOutput {
    pub services: Vec<ServiceRecord>,
    /// Names that matched nothing come back here with reason `MISSING`.
    pub failures: Vec<LaunchFailure>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServiceOutput {
    pub service: ServiceRecord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct DescribeTasksOutput {
    pub tasks: Vec<TaskRecord>,
    pub failures: Vec<LaunchFailure>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorOutput {
    #[serde(rename = "__type")]
    pub kind: String,
    #[serde(alias = "Message")]
    pub message: String,
}

impl ErrorOutput {
    /// Exception name without the `namespace#` prefix.
    pub fn code(&self) -> &str {
        self.kind.rsplit('#').next().unwrap_or(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_strips_namespace() {
        let err: ErrorOutput = serde_json::from_str(
            r#"{"__type": "com.amazonaws.ecs#ClusterNotFoundException", "message": "Cluster not found."}"#,
        )
        .unwrap();
        assert_eq!(err.code(), "ClusterNotFoundException");
        assert_eq!(err.message, "Cluster not found.");
    }

    #[test]
    fn capitalised_message_is_accepted() {
        let err: ErrorOutput =
            serde_json::from_str(r#"{"__type": "AccessDeniedException", "Message": "denied"}"#).unwrap();
        assert_eq!(err.code(), "AccessDeniedException");
        assert_eq!(err.message, "denied");
    }

    #[test]
    fn missing_services_are_reported_as_failures() {
        let out: DescribeServicesOutput = serde_json::from_str(
            r#"{"services": [], "failures": [{"arn": "arn:svc/web", "reason": "MISSING"}]}"#,
        )
        .unwrap();
        assert!(out.services.is_empty());
        assert_eq!(out.failures[0].reason.as_deref(), Some("MISSING"));
    }
}

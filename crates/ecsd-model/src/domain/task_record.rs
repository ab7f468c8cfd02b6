use serde::{Deserialize, Serialize};

/// Snapshot of a running (or finished) task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRecord {
    pub task_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    pub containers: Vec<ContainerRecord>,
}

/// Last observed state of one container inside a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    /// Populated by the scheduler only once the container has exited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

use async_trait::async_trait;
use ecsd_model::{
    CreateServiceRequest, DescribeServicesRequest, DescribeTasksRequest, RunTaskRequest,
    RunTaskResponse, ServiceRecord, TaskHandle, TaskRecord, TaskSpec, UpdateServiceRequest,
};

use crate::error::SchedulerError;

/// Remote cluster scheduler.
///
/// This trait abstracts the backend, allowing users to:
/// - Talk to a real ECS-compatible endpoint (`ecsd-client`)
/// - Replay scripted responses in tests (`ScriptedScheduler`)
///
/// Implementations must not cache: every describe call returns a fresh snapshot.
#[async_trait]
pub trait SchedulerClient: Send + Sync + 'static {
    /// Register a new task definition revision and return its handle.
    async fn register_task_definition(&self, spec: &TaskSpec) -> Result<TaskHandle, SchedulerError>;

    /// Describe services by name; names that do not exist are simply absent from the result.
    async fn describe_services(
        &self,
        req: &DescribeServicesRequest,
    ) -> Result<Vec<ServiceRecord>, SchedulerError>;

    async fn create_service(&self, req: &CreateServiceRequest) -> Result<ServiceRecord, SchedulerError>;

    async fn update_service(&self, req: &UpdateServiceRequest) -> Result<ServiceRecord, SchedulerError>;

    async fn run_task(&self, req: &RunTaskRequest) -> Result<RunTaskResponse, SchedulerError>;

    async fn describe_tasks(&self, req: &DescribeTasksRequest) -> Result<Vec<TaskRecord>, SchedulerError>;
}

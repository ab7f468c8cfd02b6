use async_trait::async_trait;
use reqwest::{Client, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use ecsd_core::{SchedulerClient, SchedulerError};
use ecsd_model::{
    CreateServiceRequest, DescribeServicesRequest, DescribeTasksRequest, RunTaskRequest,
    RunTaskResponse, ServiceRecord, TaskHandle, TaskRecord, TaskSpec, UpdateServiceRequest,
};

use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::wire::{
    DescribeServicesOutput, DescribeTasksOutput, ErrorOutput, RegisterTaskDefinitionOutput,
    ServiceOutput,
};

const TARGET_PREFIX: &str = "AmazonEC2ContainerServiceV20141113";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const USER_AGENT: &str = concat!("ecsd/", env!("CARGO_PKG_VERSION"));

/// Remote operations used by a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RegisterTaskDefinition,
    DescribeServices,
    CreateService,
    UpdateService,
    RunTask,
    DescribeTasks,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RegisterTaskDefinition => "RegisterTaskDefinition",
            Operation::DescribeServices => "DescribeServices",
            Operation::CreateService => "CreateService",
            Operation::UpdateService => "UpdateService",
            Operation::RunTask => "RunTask",
            Operation::DescribeTasks => "DescribeTasks",
        }
    }

    /// Value of the `X-Amz-Target` header selecting this operation.
    pub fn target(&self) -> String {
        format!("{TARGET_PREFIX}.{}", self.as_str())
    }
}

/// JSON-over-HTTP client for an ECS-compatible endpoint.
#[derive(Debug, Clone)]
pub struct EcsHttpClient {
    client: Client,
    endpoint: String,
}

impl EcsHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(level = "debug", skip(self, op, body), fields(op = op.as_str()))]
    async fn call<B, R>(&self, op: Operation, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/", self.endpoint))
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .header("X-Amz-Target", op.target())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        trace!(status = status.as_u16(), body = %text, "response received");

        if !status.is_success() {
            let err: ErrorOutput = serde_json::from_str(&text).unwrap_or_default();
            debug!(status = status.as_u16(), code = err.code(), "request rejected");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                code: if err.kind.is_empty() {
                    status.to_string()
                } else {
                    err.code().to_string()
                },
                message: err.message,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "failed to parse {} response: {e}, body: {text}",
                op.as_str()
            ))
        })
    }
}

#[async_trait]
impl SchedulerClient for EcsHttpClient {
    async fn register_task_definition(&self, spec: &TaskSpec) -> Result<TaskHandle, SchedulerError> {
        let out: RegisterTaskDefinitionOutput =
            self.call(Operation::RegisterTaskDefinition, spec).await?;
        Ok(TaskHandle::new(out.task_definition.task_definition_arn))
    }

    async fn describe_services(
        &self,
        req: &DescribeServicesRequest,
    ) -> Result<Vec<ServiceRecord>, SchedulerError> {
        let out: DescribeServicesOutput = self.call(Operation::DescribeServices, req).await?;
        for failure in &out.failures {
            debug!(arn = ?failure.arn, reason = ?failure.reason, "service not described");
        }
        Ok(out.services)
    }

    async fn create_service(&self, req: &CreateServiceRequest) -> Result<ServiceRecord, SchedulerError> {
        let out: ServiceOutput = self.call(Operation::CreateService, req).await?;
        Ok(out.service)
    }

    async fn update_service(&self, req: &UpdateServiceRequest) -> Result<ServiceRecord, SchedulerError> {
        let out: ServiceOutput = self.call(Operation::UpdateService, req).await?;
        Ok(out.service)
    }

    async fn run_task(&self, req: &RunTaskRequest) -> Result<RunTaskResponse, SchedulerError> {
        Ok(self.call(Operation::RunTask, req).await?)
    }

    async fn describe_tasks(&self, req: &DescribeTasksRequest) -> Result<Vec<TaskRecord>, SchedulerError> {
        let out: DescribeTasksOutput = self.call(Operation::DescribeTasks, req).await?;
        for failure in &out.failures {
            debug!(arn = ?failure.arn, reason = ?failure.reason, "task not described");
        }
        Ok(out.tasks)
    }
}

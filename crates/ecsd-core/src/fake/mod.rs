//! In-memory scheduler replaying scripted responses.
//!
//! Describe calls pop their scripted responses in order; once a script is down to its last entry,
//! that entry is returned for every further call. Every call is recorded for later assertions.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use ecsd_model::{
    ContainerRecord, CreateServiceRequest, DeploymentRecord, DescribeServicesRequest,
    DescribeTasksRequest, RunTaskRequest, RunTaskResponse, ServiceRecord, ServiceStatus,
    TaskHandle, TaskRecord, TaskSpec, UpdateServiceRequest,
};

use crate::{client::SchedulerClient, error::SchedulerError};

const FAKE_TASK_ARN: &str = "arn:fake:ecs:task/default/1";

/// A remote call as received by [`ScriptedScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RegisterTaskDefinition(TaskSpec),
    DescribeServices(DescribeServicesRequest),
    CreateService(CreateServiceRequest),
    UpdateService(UpdateServiceRequest),
    RunTask(RunTaskRequest),
    DescribeTasks(DescribeTasksRequest),
}

type Scripted<T> = VecDeque<Result<T, SchedulerError>>;

#[derive(Default)]
struct Inner {
    revision: u32,
    register: Option<SchedulerError>,
    services: Scripted<Vec<ServiceRecord>>,
    create: Option<Result<ServiceRecord, SchedulerError>>,
    update: Option<Result<ServiceRecord, SchedulerError>>,
    run: Option<Result<RunTaskResponse, SchedulerError>>,
    tasks: Scripted<Vec<TaskRecord>>,
    calls: Vec<Call>,
}

/// Deterministic [`SchedulerClient`] for exercising the deployment loops.
#[derive(Clone, Default)]
pub struct ScriptedScheduler {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one describe-services response.
    pub fn with_services(self, records: Vec<ServiceRecord>) -> Self {
        self.inner.lock().unwrap().services.push_back(Ok(records));
        self
    }

    /// Queue one describe-services response per entry.
    pub fn with_service_observations<I>(self, observations: I) -> Self
    where
        I: IntoIterator<Item = ServiceRecord>,
    {
        {
            let mut inner = self.inner.lock().unwrap();
            for record in observations {
                inner.services.push_back(Ok(vec![record]));
            }
        }
        self
    }

    pub fn with_services_error(self, err: SchedulerError) -> Self {
        self.inner.lock().unwrap().services.push_back(Err(err));
        self
    }

    pub fn with_register_error(self, err: SchedulerError) -> Self {
        self.inner.lock().unwrap().register = Some(err);
        self
    }

    pub fn with_create_result(self, result: Result<ServiceRecord, SchedulerError>) -> Self {
        self.inner.lock().unwrap().create = Some(result);
        self
    }

    pub fn with_update_result(self, result: Result<ServiceRecord, SchedulerError>) -> Self {
        self.inner.lock().unwrap().update = Some(result);
        self
    }

    pub fn with_run_result(self, result: Result<RunTaskResponse, SchedulerError>) -> Self {
        self.inner.lock().unwrap().run = Some(result);
        self
    }

    /// Queue one describe-tasks response per entry.
    pub fn with_task_observations<I>(self, observations: I) -> Self
    where
        I: IntoIterator<Item = TaskRecord>,
    {
        {
            let mut inner = self.inner.lock().unwrap();
            for record in observations {
                inner.tasks.push_back(Ok(vec![record]));
            }
        }
        self
    }

    /// Queue one raw describe-tasks response.
    pub fn with_tasks(self, records: Vec<TaskRecord>) -> Self {
        self.inner.lock().unwrap().tasks.push_back(Ok(records));
        self
    }

    pub fn with_tasks_error(self, err: SchedulerError) -> Self {
        self.inner.lock().unwrap().tasks.push_back(Err(err));
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.inner.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn creates(&self) -> Vec<CreateServiceRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateService(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<UpdateServiceRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::UpdateService(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    pub fn describe_services_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::DescribeServices(_)))
    }

    pub fn describe_tasks_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::DescribeTasks(_)))
    }

    fn record(&self, call: Call) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

fn next<T: Clone>(script: &mut Scripted<T>, empty: T) -> Result<T, SchedulerError> {
    if script.len() > 1 {
        return script.pop_front().unwrap_or(Ok(empty));
    }
    script.front().cloned().unwrap_or(Ok(empty))
}

#[async_trait]
impl SchedulerClient for ScriptedScheduler {
    async fn register_task_definition(&self, spec: &TaskSpec) -> Result<TaskHandle, SchedulerError> {
        self.record(Call::RegisterTaskDefinition(spec.clone()));
        let mut inner = self.inner.lock().unwrap();
        if let Some(err) = inner.register.clone() {
            return Err(err);
        }
        inner.revision += 1;
        Ok(TaskHandle::new(format!(
            "arn:fake:ecs:task-definition/{}:{}",
            spec.family, inner.revision
        )))
    }

    async fn describe_services(
        &self,
        req: &DescribeServicesRequest,
    ) -> Result<Vec<ServiceRecord>, SchedulerError> {
        self.record(Call::DescribeServices(req.clone()));
        next(&mut self.inner.lock().unwrap().services, Vec::new())
    }

    async fn create_service(&self, req: &CreateServiceRequest) -> Result<ServiceRecord, SchedulerError> {
        self.record(Call::CreateService(req.clone()));
        match self.inner.lock().unwrap().create.clone() {
            Some(result) => result,
            None => Ok(service(&req.service_name, ServiceStatus::Active, 0, req.desired_count, 1)),
        }
    }

    async fn update_service(&self, req: &UpdateServiceRequest) -> Result<ServiceRecord, SchedulerError> {
        self.record(Call::UpdateService(req.clone()));
        match self.inner.lock().unwrap().update.clone() {
            Some(result) => result,
            None => Ok(service(
                &req.service,
                ServiceStatus::Active,
                0,
                req.desired_count.unwrap_or_default(),
                2,
            )),
        }
    }

    async fn run_task(&self, req: &RunTaskRequest) -> Result<RunTaskResponse, SchedulerError> {
        self.record(Call::RunTask(req.clone()));
        match self.inner.lock().unwrap().run.clone() {
            Some(result) => result,
            None => Ok(RunTaskResponse {
                tasks: vec![TaskRecord {
                    task_arn: FAKE_TASK_ARN.to_string(),
                    last_status: Some("PROVISIONING".to_string()),
                    containers: Vec::new(),
                }],
                failures: Vec::new(),
            }),
        }
    }

    async fn describe_tasks(&self, req: &DescribeTasksRequest) -> Result<Vec<TaskRecord>, SchedulerError> {
        self.record(Call::DescribeTasks(req.clone()));
        next(&mut self.inner.lock().unwrap().tasks, Vec::new())
    }
}

/// Service snapshot with `deployments` in-flight rollouts.
pub fn service(
    name: &str,
    status: ServiceStatus,
    running: i64,
    desired: i64,
    deployments: usize,
) -> ServiceRecord {
    ServiceRecord {
        service_name: name.to_string(),
        service_arn: Some(format!("arn:fake:ecs:service/default/{name}")),
        cluster_arn: None,
        status,
        running_count: running,
        desired_count: desired,
        deployments: (0..deployments)
            .map(|i| DeploymentRecord {
                id: format!("ecs-svc/{i}"),
                status: if i == 0 { "PRIMARY" } else { "ACTIVE" }.to_string(),
                ..Default::default()
            })
            .collect(),
    }
}

/// Task snapshot with a single container in `status`, optionally exited with `exit_code`.
pub fn task(status: &str, exit_code: Option<i32>) -> TaskRecord {
    TaskRecord {
        task_arn: FAKE_TASK_ARN.to_string(),
        last_status: Some(status.to_string()),
        containers: vec![ContainerRecord {
            name: "app".to_string(),
            last_status: Some(status.to_string()),
            exit_code,
            reason: None,
        }],
    }
}

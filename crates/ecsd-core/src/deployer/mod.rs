use std::sync::Arc;

use ecsd_model::{DeployKind, PollPolicy, ServiceSpec, TaskHandle, TaskSpec};
use tracing::{info, instrument};

use crate::{
    client::SchedulerClient, error::DeployError, monitor::await_stable, oneshot::run_to_completion,
    reconciler::reconcile, registrar::register,
};

/// Summary of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub kind: DeployKind,
    pub task_definition: TaskHandle,
    /// Service handle for [`DeployKind::Service`] deployments.
    pub service: Option<String>,
}

/// Entry point running one deployment end to end.
///
/// Holds no state besides the scheduler client; every call registers a fresh task definition.
pub struct Deployer {
    client: Arc<dyn SchedulerClient>,
    cluster: String,
}

impl Deployer {
    /// `cluster` is where oneshot tasks run; services use the cluster named in their spec.
    pub fn new(client: Arc<dyn SchedulerClient>, cluster: impl Into<String>) -> Self {
        Self {
            client,
            cluster: cluster.into(),
        }
    }

    /// Register `task`, then either roll out `service` and wait for it to settle,
    /// or run the task once and wait for it to exit.
    ///
    /// The first failing stage aborts the deployment; nothing is retried or rolled back.
    #[instrument(level = "info", skip_all, fields(kind = %kind, family = %task.family))]
    pub async fn deploy(
        &self,
        kind: DeployKind,
        task: &TaskSpec,
        service: Option<&ServiceSpec>,
        policy: &PollPolicy,
    ) -> Result<DeployReport, DeployError> {
        let service = match (kind, service) {
            (DeployKind::Service, None) => return Err(DeployError::MissingServiceSpec),
            (DeployKind::Service, spec) => spec,
            (DeployKind::Oneshot, _) => None,
        };

        let handle = register(self.client.as_ref(), task).await?;

        let service_handle = match service {
            Some(spec) => {
                info!("deploying service");
                let record = reconcile(self.client.as_ref(), &handle, spec).await?;
                info!("waiting for stable service state");
                await_stable(self.client.as_ref(), &spec.cluster, &record, policy).await?;
                Some(record.handle().to_string())
            }
            None => {
                info!("deploying oneshot");
                run_to_completion(self.client.as_ref(), &handle, &self.cluster, policy).await?;
                None
            }
        };

        Ok(DeployReport {
            kind,
            task_definition: handle,
            service: service_handle,
        })
    }
}

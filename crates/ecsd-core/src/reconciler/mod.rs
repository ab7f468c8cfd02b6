use ecsd_model::{
    CreateServiceRequest, DescribeServicesRequest, ServiceRecord, ServiceSpec, TaskHandle,
    UpdateServiceRequest,
};
use tracing::{debug, info, instrument, warn};

use crate::{client::SchedulerClient, error::DeployError};

/// Remote mutation chosen for a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    /// Update in place, keeping the desired count of the running service.
    Update { desired_count: i64 },
}

/// Pick create or update from the services matching the requested name.
///
/// Only a single `ACTIVE` match is updated; a draining or inactive service is treated as absent.
pub fn decide(spec: &ServiceSpec, existing: &[ServiceRecord]) -> Result<Action, DeployError> {
    match existing {
        [] => Ok(Action::Create),
        [current] if current.status.is_active() => Ok(Action::Update {
            desired_count: current.desired_count,
        }),
        [current] => {
            debug!(status = %current.status, "existing service is not active; creating a new one");
            Ok(Action::Create)
        }
        many => Err(DeployError::AmbiguousServiceMatch {
            service: spec.service_name.clone(),
            matches: many.len(),
        }),
    }
}

/// Create or update the service described by `spec` so that it runs `task`.
#[instrument(level = "debug", skip(client, task, spec), fields(cluster = %spec.cluster, service = %spec.service_name))]
pub async fn reconcile(
    client: &dyn SchedulerClient,
    task: &TaskHandle,
    spec: &ServiceSpec,
) -> Result<ServiceRecord, DeployError> {
    let existing = client
        .describe_services(&DescribeServicesRequest::single(&spec.cluster, &spec.service_name))
        .await
        .map_err(DeployError::remote("DescribeServices"))?;

    match decide(spec, &existing)? {
        Action::Create => {
            info!("creating service");
            let req = CreateServiceRequest::new(task, spec)
                .with_client_token(uuid::Uuid::new_v4().to_string());
            client
                .create_service(&req)
                .await
                .map_err(DeployError::remote("CreateService"))
        }
        Action::Update { desired_count } => {
            info!("updating service");
            if spec.desired_count != desired_count {
                warn!(
                    requested = spec.desired_count,
                    existing = desired_count,
                    "setting desired count to match running service: {} -> {}",
                    spec.desired_count,
                    desired_count
                );
            }
            let req = UpdateServiceRequest {
                cluster: spec.cluster.clone(),
                service: spec.service_name.clone(),
                task_definition: task.clone(),
                desired_count: Some(desired_count),
                deployment_configuration: spec.deployment_configuration,
            };
            client
                .update_service(&req)
                .await
                .map_err(DeployError::remote("UpdateService"))
        }
    }
}

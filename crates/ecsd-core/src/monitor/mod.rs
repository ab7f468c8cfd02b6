use ecsd_model::{DescribeServicesRequest, PollPolicy, ServiceRecord};
use tracing::{info, instrument};

use crate::{client::SchedulerClient, error::DeployError, poll};

/// Consecutive satisfying observations required before a service counts as stable.
pub const STABILITY_THRESHOLD: u32 = 6;

const EXPECTED_DEPLOYMENTS: usize = 1;

/// Consecutive-observation gate.
///
/// A single good reading during a rollout is not proof of stability, so any unsatisfied observation resets the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityGate {
    count: u32,
    threshold: u32,
}

impl StabilityGate {
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold,
        }
    }

    /// Feed one observation; returns `true` once the threshold is reached.
    pub fn observe(&mut self, satisfied: bool) -> bool {
        if satisfied {
            self.count += 1;
        } else {
            self.count = 0;
        }
        self.is_stable()
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn is_stable(&self) -> bool {
        self.count >= self.threshold
    }
}

impl Default for StabilityGate {
    fn default() -> Self {
        Self::new(STABILITY_THRESHOLD)
    }
}

/// Wait until `service` reports one deployment with all desired replicas running
/// for [`STABILITY_THRESHOLD`] consecutive observations.
///
/// The expected running count is the desired count of the record the reconciler returned.
/// A describe error aborts the wait immediately.
#[instrument(level = "debug", skip(client, service, policy), fields(service = %service.service_name))]
pub async fn await_stable(
    client: &dyn SchedulerClient,
    cluster: &str,
    service: &ServiceRecord,
    policy: &PollPolicy,
) -> Result<(), DeployError> {
    let expected_running = service.desired_count;
    let req = DescribeServicesRequest::single(cluster, &service.service_name);
    let mut gate = StabilityGate::default();

    for attempt in policy.attempts() {
        let records = client
            .describe_services(&req)
            .await
            .map_err(DeployError::remote("DescribeServices"))?;

        let (deployments, running) = match records.as_slice() {
            [] => (0, 0),
            [current] => (current.deployments.len(), current.running_count),
            many => {
                return Err(DeployError::topology(format!(
                    "{} services match {}",
                    many.len(),
                    service.service_name
                )));
            }
        };

        let stable =
            gate.observe(deployments == EXPECTED_DEPLOYMENTS && running == expected_running);

        info!(
            attempt,
            "deployments: {}/{}, running: {}/{}, stable: {}/{}",
            deployments,
            EXPECTED_DEPLOYMENTS,
            running,
            expected_running,
            gate.count(),
            STABILITY_THRESHOLD
        );

        if stable {
            return Ok(());
        }
        poll::pause(policy, attempt).await;
    }

    Err(DeployError::Timeout {
        waiting_for: "service",
        attempts: policy.observations(),
    })
}

use ecsd_model::{
    DescribeTasksRequest, PollPolicy, RunTaskRequest, STATUS_STOPPED, TaskHandle, TaskRecord,
};
use tracing::{debug, info, instrument};

use crate::{client::SchedulerClient, error::DeployError, poll};

/// Status reported before the scheduler has populated container detail.
pub const UNKNOWN_STATUS: &str = "unknown";
/// Exit code assumed before the container has exited.
pub const UNKNOWN_EXIT_CODE: i32 = 255;
/// Exit code treated as fatal as soon as it is observed, whatever the container status.
pub const FATAL_EXIT_CODE: i32 = 1;

const STARTED_BY: &str = "ecsd";

/// Container state read from one task snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub status: String,
    pub exit_code: i32,
}

impl Observation {
    /// Read the single container of a describe-tasks result.
    ///
    /// Missing task, container, status or exit code fall back to [`UNKNOWN_STATUS`] / [`UNKNOWN_EXIT_CODE`].
    pub fn from_tasks(tasks: &[TaskRecord]) -> Result<Self, DeployError> {
        let container = match tasks {
            [] => None,
            [task] => match task.containers.as_slice() {
                [] => None,
                [container] => Some(container),
                many => {
                    return Err(DeployError::topology(format!(
                        "task {} has {} containers; exactly one is supported",
                        task.task_arn,
                        many.len()
                    )));
                }
            },
            many => {
                return Err(DeployError::topology(format!(
                    "describe returned {} tasks; exactly one is supported",
                    many.len()
                )));
            }
        };

        Ok(Self {
            status: container
                .and_then(|c| c.last_status.clone())
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            exit_code: container
                .and_then(|c| c.exit_code)
                .unwrap_or(UNKNOWN_EXIT_CODE),
        })
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.exit_code == FATAL_EXIT_CODE
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_STOPPED) && self.exit_code == 0
    }
}

/// Launch one instance of `task` on `cluster` and wait until it stops with exit code 0.
///
/// Only exit code 1 short-circuits the wait; other non-zero codes keep polling until the budget runs out.
#[instrument(level = "debug", skip(client, task, policy), fields(task_definition = %task))]
pub async fn run_to_completion(
    client: &dyn SchedulerClient,
    task: &TaskHandle,
    cluster: &str,
    policy: &PollPolicy,
) -> Result<(), DeployError> {
    let res = client
        .run_task(&RunTaskRequest {
            cluster: cluster.to_string(),
            task_definition: task.clone(),
            count: 1,
            started_by: Some(STARTED_BY.to_string()),
        })
        .await
        .map_err(DeployError::remote("RunTask"))?;

    // single task assumed; only the first failure is reported
    if let Some(failure) = res.failures.first() {
        return Err(DeployError::PlacementFailure {
            arn: failure.arn.clone().unwrap_or_default(),
            reason: failure.reason.clone().unwrap_or_default(),
        });
    }

    let task_arn = match res.tasks.as_slice() {
        [launched] => launched.task_arn.clone(),
        other => {
            return Err(DeployError::topology(format!(
                "run task returned {} tasks; exactly one is expected",
                other.len()
            )));
        }
    };
    info!(task = %task_arn, "task launched; waiting for it to stop");

    let req = DescribeTasksRequest::single(cluster, &task_arn);
    for attempt in policy.attempts() {
        let tasks = client
            .describe_tasks(&req)
            .await
            .map_err(DeployError::remote("DescribeTasks"))?;
        let seen = Observation::from_tasks(&tasks)?;

        debug!(attempt, status = %seen.status, exit_code = seen.exit_code, "task observed");

        if seen.is_fatal() {
            return Err(DeployError::NonZeroExit {
                code: seen.exit_code,
            });
        }
        if seen.is_success() {
            info!(task = %task_arn, "task stopped with exit code 0");
            return Ok(());
        }
        poll::pause(policy, attempt).await;
    }

    Err(DeployError::Timeout {
        waiting_for: "oneshot",
        attempts: policy.observations(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        SchedulerError, ScriptedScheduler,
        fake::{Call, task},
    };
    use ecsd_model::{ContainerRecord, LaunchFailure, RunTaskResponse};

    fn handle() -> TaskHandle {
        TaskHandle::from("arn:fake:ecs:task-definition/migrate:3")
    }

    fn policy(max_attempts: u32) -> PollPolicy {
        PollPolicy::new(max_attempts, Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_with_zero_succeeds() {
        let fake = ScriptedScheduler::new()
            .with_task_observations(vec![task("RUNNING", None), task("STOPPED", Some(0))]);

        run_to_completion(&fake, &handle(), "prod", &policy(10)).await.unwrap();

        assert_eq!(fake.describe_tasks_calls(), 2);
        let run = fake
            .calls()
            .into_iter()
            .find_map(|c| match c {
                Call::RunTask(req) => Some(req),
                _ => None,
            })
            .unwrap();
        assert_eq!(run.count, 1);
        assert_eq!(run.cluster, "prod");
        assert_eq!(run.task_definition, handle());
    }

    #[tokio::test(start_paused = true)]
    async fn exit_code_one_fails_without_further_polling() {
        let fake = ScriptedScheduler::new().with_task_observations(vec![
            task("RUNNING", None),
            task("RUNNING", Some(1)),
            task("STOPPED", Some(0)),
        ]);

        let err = run_to_completion(&fake, &handle(), "prod", &policy(10))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::NonZeroExit { code: 1 }));
        assert_eq!(fake.describe_tasks_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn never_stopping_times_out() {
        let fake = ScriptedScheduler::new().with_task_observations(vec![task("RUNNING", None)]);

        let err = run_to_completion(&fake, &handle(), "prod", &policy(4))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::Timeout { waiting_for: "oneshot", attempts: 5 }
        ));
        assert_eq!(fake.describe_tasks_calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn other_non_zero_codes_are_not_short_circuited() {
        let fake = ScriptedScheduler::new().with_task_observations(vec![task("STOPPED", Some(2))]);

        let err = run_to_completion(&fake, &handle(), "prod", &policy(3))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Timeout { .. }));
        assert_eq!(fake.describe_tasks_calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn placement_failure_never_polls() {
        let fake = ScriptedScheduler::new().with_run_result(Ok(RunTaskResponse {
            tasks: vec![],
            failures: vec![
                LaunchFailure::new("arn:ci/1", "RESOURCE:CPU"),
                LaunchFailure::new("arn:ci/2", "RESOURCE:MEMORY"),
            ],
        }));

        let err = run_to_completion(&fake, &handle(), "prod", &policy(10))
            .await
            .unwrap_err();

        match err {
            DeployError::PlacementFailure { arn, reason } => {
                assert_eq!(arn, "arn:ci/1");
                assert_eq!(reason, "RESOURCE:CPU");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fake.describe_tasks_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_budget_observes_once_without_sleeping() {
        let fake = ScriptedScheduler::new().with_task_observations(vec![task("PENDING", None)]);
        let started = tokio::time::Instant::now();

        let err = run_to_completion(&fake, &handle(), "prod", &policy(0))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Timeout { attempts: 1, .. }));
        assert_eq!(fake.describe_tasks_calls(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn cold_start_uses_sentinels_then_succeeds() {
        let fake = ScriptedScheduler::new()
            .with_tasks(vec![])
            .with_task_observations(vec![task("STOPPED", Some(0))]);

        run_to_completion(&fake, &handle(), "prod", &policy(3)).await.unwrap();
        assert_eq!(fake.describe_tasks_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn describe_error_aborts() {
        let fake = ScriptedScheduler::new()
            .with_tasks_error(SchedulerError::Transport("reset".into()));

        let err = run_to_completion(&fake, &handle(), "prod", &policy(3))
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::Remote { operation: "DescribeTasks", .. }));
    }

    #[tokio::test]
    async fn run_task_failure_propagates() {
        let fake = ScriptedScheduler::new()
            .with_run_result(Err(SchedulerError::api("ClusterNotFoundException", "Cluster not found.")));

        let err = run_to_completion(&fake, &handle(), "prod", &policy(3))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Remote { operation: "RunTask", .. }));
        assert_eq!(fake.describe_tasks_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn several_described_tasks_are_unsupported() {
        let fake = ScriptedScheduler::new()
            .with_tasks(vec![task("RUNNING", None), task("RUNNING", None)]);

        let err = run_to_completion(&fake, &handle(), "prod", &policy(3))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::UnsupportedTopology(_)));
        assert_eq!(fake.describe_tasks_calls(), 1);
    }

    #[tokio::test]
    async fn empty_launch_is_unsupported() {
        let fake = ScriptedScheduler::new().with_run_result(Ok(RunTaskResponse::default()));

        let err = run_to_completion(&fake, &handle(), "prod", &policy(3))
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::UnsupportedTopology(_)));
    }

    #[test]
    fn observation_defaults_before_container_detail() {
        let seen = Observation::from_tasks(&[]).unwrap();
        assert_eq!(seen.status, UNKNOWN_STATUS);
        assert_eq!(seen.exit_code, UNKNOWN_EXIT_CODE);
        assert!(!seen.is_fatal());
        assert!(!seen.is_success());
    }

    #[test]
    fn stopped_status_matches_any_case() {
        let seen = Observation::from_tasks(&[task("stopped", Some(0))]).unwrap();
        assert!(seen.is_success());

        let seen = Observation::from_tasks(&[task("Stopped", Some(3))]).unwrap();
        assert!(!seen.is_success());
        assert!(!seen.is_fatal());
    }

    #[test]
    fn observation_rejects_multiple_containers() {
        let mut record = task("RUNNING", None);
        record.containers.push(ContainerRecord {
            name: "sidecar".into(),
            ..Default::default()
        });

        let err = Observation::from_tasks(&[record]).unwrap_err();
        assert!(matches!(err, DeployError::UnsupportedTopology(_)));
    }
}

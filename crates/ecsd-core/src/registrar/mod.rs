use ecsd_model::{TaskHandle, TaskSpec};
use tracing::{info, instrument};

use crate::{client::SchedulerClient, error::DeployError};

/// Register `spec` as a new task definition revision.
///
/// No validation happens here: the scheduler is the authority on what a valid task definition is.
/// Calling this twice with the same spec creates two revisions.
#[instrument(level = "debug", skip(client, spec), fields(family = %spec.family))]
pub async fn register(client: &dyn SchedulerClient, spec: &TaskSpec) -> Result<TaskHandle, DeployError> {
    let handle = client
        .register_task_definition(spec)
        .await
        .map_err(DeployError::remote("RegisterTaskDefinition"))?;

    info!(task_definition = %handle, "registered task definition");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SchedulerError, ScriptedScheduler};

    fn spec() -> TaskSpec {
        TaskSpec {
            family: "web".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn each_registration_yields_a_new_revision() {
        let fake = ScriptedScheduler::new();

        let first = register(&fake, &spec()).await.unwrap();
        let second = register(&fake, &spec()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test]
    async fn remote_error_is_surfaced() {
        let fake = ScriptedScheduler::new()
            .with_register_error(SchedulerError::api("ClientException", "bad image"));

        let err = register(&fake, &spec()).await.unwrap_err();
        match err {
            DeployError::Remote { operation, source } => {
                assert_eq!(operation, "RegisterTaskDefinition");
                assert_eq!(source, SchedulerError::api("ClientException", "bad image"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

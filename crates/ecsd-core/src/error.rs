use thiserror::Error;

/// Failure reported by a scheduler backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{code}: {message}")]
    Api { code: String, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl SchedulerError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        SchedulerError::Api {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("{operation} failed: {source}")]
    Remote {
        operation: &'static str,
        #[source]
        source: SchedulerError,
    },
    #[error("more than one service matches the provided name: {service} ({matches} matches)")]
    AmbiguousServiceMatch { service: String, matches: usize },
    #[error("task placement failed: {arn} ({reason})")]
    PlacementFailure { arn: String, reason: String },
    #[error("container exited with non-zero exit code: {code}")]
    NonZeroExit { code: i32 },
    #[error("timed out waiting for {waiting_for} after {attempts} attempt(s)")]
    Timeout {
        waiting_for: &'static str,
        attempts: u64,
    },
    #[error("unsupported topology: {0}")]
    UnsupportedTopology(String),
    #[error("service deployment requires a service spec")]
    MissingServiceSpec,
}

impl DeployError {
    /// Wrap a backend failure with the name of the remote operation that produced it.
    pub fn remote(operation: &'static str) -> impl FnOnce(SchedulerError) -> Self {
        move |source| DeployError::Remote { operation, source }
    }

    pub fn topology(msg: impl Into<String>) -> Self {
        DeployError::UnsupportedTopology(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_names_the_operation() {
        let err = DeployError::remote("DescribeServices")(SchedulerError::api(
            "ClusterNotFoundException",
            "Cluster not found.",
        ));
        assert_eq!(
            err.to_string(),
            "DescribeServices failed: ClusterNotFoundException: Cluster not found."
        );
    }

    #[test]
    fn placement_failure_carries_reason() {
        let err = DeployError::PlacementFailure {
            arn: "arn:ci".into(),
            reason: "RESOURCE:CPU".into(),
        };
        assert_eq!(err.to_string(), "task placement failed: arn:ci (RESOURCE:CPU)");
    }
}

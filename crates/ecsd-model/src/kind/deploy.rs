use std::{fmt, str::FromStr};

use thiserror::Error;

/// Deployment workflow selected by the caller.
///
/// Each variant picks a different path after the task definition has been registered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeployKind {
    /// Create or update a long-running service and wait for it to become stable.
    Service,
    /// Run a single task and wait for it to stop with a success exit code.
    Oneshot,
}

impl DeployKind {
    /// Returns a short symbolic identifier for the workflow.
    ///
    /// This is primarily intended for logging and CLI parsing:
    /// - `"service"`
    /// - `"oneshot"`
    pub fn kind(&self) -> &'static str {
        match self {
            DeployKind::Service => "service",
            DeployKind::Oneshot => "oneshot",
        }
    }
}

impl fmt::Display for DeployKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid deployment type: {0} (expected: service|oneshot)")]
pub struct ParseKindError(pub String);

impl FromStr for DeployKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "service" => Ok(DeployKind::Service),
            "oneshot" => Ok(DeployKind::Oneshot),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

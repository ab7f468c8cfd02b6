use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a service as reported by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    /// No status was reported.
    #[default]
    Missing,
    /// Service exists and accepts deployments.
    Active,
    /// Service is being deleted; its tasks are draining.
    Draining,
    /// Service was deleted.
    Inactive,
    /// Any status this client does not know about.
    Other(String),
}

impl ServiceStatus {
    /// Returns `true` only for a service that can be updated in place.
    pub fn is_active(&self) -> bool {
        matches!(self, ServiceStatus::Active)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServiceStatus::Missing => "",
            ServiceStatus::Active => "ACTIVE",
            ServiceStatus::Draining => "DRAINING",
            ServiceStatus::Inactive => "INACTIVE",
            ServiceStatus::Other(s) => s,
        }
    }
}

impl From<String> for ServiceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" => ServiceStatus::Missing,
            "ACTIVE" => ServiceStatus::Active,
            "DRAINING" => ServiceStatus::Draining,
            "INACTIVE" => ServiceStatus::Inactive,
            _ => ServiceStatus::Other(s),
        }
    }
}

impl From<ServiceStatus> for String {
    fn from(status: ServiceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Missing => f.write_str("MISSING"),
            other => f.write_str(other.as_str()),
        }
    }
}

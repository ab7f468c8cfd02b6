pub mod error;
pub use error::{DeployError, SchedulerError};

pub mod client;
pub use client::SchedulerClient;

mod poll;

pub mod registrar;
pub use registrar::register;

pub mod reconciler;
pub use reconciler::reconcile;

pub mod monitor;
pub use monitor::{STABILITY_THRESHOLD, await_stable};

pub mod oneshot;
pub use oneshot::run_to_completion;

pub mod deployer;
pub use deployer::{DeployReport, Deployer};

#[cfg(any(test, feature = "testing"))]
pub mod fake;
#[cfg(any(test, feature = "testing"))]
pub use fake::ScriptedScheduler;

//! ECS JSON 1.1 protocol backend for [`ecsd_core::SchedulerClient`].
//!
//! Requests are sent unsigned; point the endpoint at a signing proxy (or a local emulator)
//! when talking to a real account.

mod config;
pub use config::ClientConfig;

mod errors;
pub use errors::ClientError;

mod wire;

mod ecs;
pub use ecs::{EcsHttpClient, Operation};

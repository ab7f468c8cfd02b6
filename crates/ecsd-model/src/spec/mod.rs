mod service;
pub use service::{DeploymentConfiguration, LoadBalancer, ServiceSpec};

mod task;
pub use task::{ContainerDefinition, LogConfiguration, PortMapping, TaskSpec};

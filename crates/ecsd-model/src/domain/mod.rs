mod kv;
pub use kv::KeyValue;

mod task_env;
pub use task_env::TaskEnv;

mod task_handle;
pub use task_handle::TaskHandle;

mod poll_policy;
pub use poll_policy::PollPolicy;

mod service_status;
pub use service_status::ServiceStatus;

mod service_record;
pub use service_record::{DeploymentRecord, ServiceRecord};

mod task_record;
pub use task_record::{ContainerRecord, TaskRecord};

/// Status string the scheduler reports for a container that has exited.
pub const STATUS_STOPPED: &str = "STOPPED";

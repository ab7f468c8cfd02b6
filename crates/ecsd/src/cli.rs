use std::{path::PathBuf, time::Duration};

use clap::Parser;
use ecsd_client::ClientConfig;
use ecsd_model::{DeployKind, PollPolicy};
use ecsd_observe::{LoggerConfig, LoggerFormat};

/// Register a task definition and roll it out as a service or run it once.
#[derive(Debug, Parser)]
#[command(name = "ecsd")]
#[command(about = "Deploy a templated task definition to an ECS cluster", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Environment config file (JSON)
    #[arg(short, long, env = "ECSD_CONFIG")]
    pub config: PathBuf,

    /// Deployment template with `{{ .Field }}` placeholders
    #[arg(short, long, env = "ECSD_TEMPLATE")]
    pub template: PathBuf,

    /// Deployment type (service, oneshot)
    #[arg(long = "type", env = "ECSD_TYPE")]
    pub kind: DeployKind,

    /// Poll attempts after the first observation
    #[arg(long, env = "ECSD_COUNT", default_value_t = 40)]
    pub count: u32,

    /// Seconds between polls
    #[arg(long, env = "ECSD_WAIT", default_value_t = 5)]
    pub wait: u64,

    /// Print the rendered template and exit
    #[arg(long, env = "ECSD_DEBUG")]
    pub debug: bool,

    /// Scheduler API endpoint, overrides the regional default
    #[arg(long, env = "ECSD_ENDPOINT")]
    pub endpoint: Option<String>,

    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "ECSD_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Log filter directives, e.g. `info` or `info,ecsd_core=debug`
    #[arg(long, env = "ECSD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output (text, json, journald)
    #[arg(long, env = "ECSD_LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,
}

impl Cli {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(self.count, Duration::from_secs(self.wait))
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut cfg = ClientConfig::new(&self.region);
        cfg.timeout_secs = self.timeout;
        match &self.endpoint {
            Some(endpoint) => cfg.with_endpoint(endpoint.clone()),
            None => cfg,
        }
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig::new(self.log_format, &self.log_level)
    }
}

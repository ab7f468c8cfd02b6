use std::{ffi::OsString, path::Path};

use config::{Config, Environment, File, FileFormat, Source};
use ecsd_model::{KeyValue, TaskEnv};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Key of the list field, as the environment source reports it.
const ENVIRONMENT_KEY: &str = "environment";

/// Per-environment values substituted into the deployment template.
///
/// Keys are matched case-insensitively; numeric fields also accept numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    #[serde(rename = "TaskFamily", alias = "taskfamily")]
    pub task_family: String,
    #[serde(rename = "ServiceName", alias = "servicename")]
    pub service_name: String,
    #[serde(rename = "Cluster", alias = "cluster")]
    pub cluster: String,
    #[serde(rename = "SchedulerIAMRoleArn", alias = "scheduleriamrolearn")]
    pub scheduler_iam_role_arn: String,
    #[serde(rename = "TaskIAMRoleArn", alias = "taskiamrolearn")]
    pub task_iam_role_arn: String,
    #[serde(rename = "TargetGroupArn", alias = "targetgrouparn")]
    pub target_group_arn: String,
    #[serde(rename = "InitialCount", alias = "initialcount")]
    pub initial_count: i64,
    #[serde(rename = "Image", alias = "image")]
    pub image: String,
    #[serde(rename = "ImageTag", alias = "imagetag")]
    pub image_tag: String,
    #[serde(rename = "MemoryReservation", alias = "memoryreservation")]
    pub memory_reservation: i64,
    #[serde(rename = "CPUReservation", alias = "cpureservation")]
    pub cpu_reservation: i64,
    #[serde(rename = "AWSLogsGroupName", alias = "awslogsgroupname")]
    pub aws_logs_group_name: String,
    #[serde(rename = "AWSLogsRegion", alias = "awslogsregion")]
    pub aws_logs_region: String,
    #[serde(rename = "Environment", alias = "environment")]
    pub environment: Vec<KeyValue>,
}

/// Seed layer for an `ENVIRONMENT` variable holding a JSON list.
#[derive(Serialize)]
struct EnvironmentList {
    environment: Vec<KeyValue>,
}

impl EnvironmentConfig {
    /// Read the JSON file at `path` over values taken from `vars`; the file wins on conflicts.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn load<I>(path: &Path, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::build(File::from(path).format(FileFormat::Json), vars)
    }

    pub fn from_sources<I>(file: &str, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::build(File::from_str(file, FileFormat::Json), vars)
    }

    fn build<S, I>(file: S, vars: I) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env: config::Map<String, String> = vars
            .into_iter()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (name, _) => {
                    debug!(var = ?name, "skipping environment variable: not valid UTF-8");
                    None
                }
            })
            .collect();

        let mut builder = Config::builder();

        let list_key = env
            .keys()
            .find(|k| k.eq_ignore_ascii_case(ENVIRONMENT_KEY))
            .cloned();
        if let Some(raw) = list_key.and_then(|k| env.remove(&k)) {
            match serde_json::from_str::<Vec<KeyValue>>(&raw) {
                Ok(environment) => {
                    builder = builder.add_source(Config::try_from(&EnvironmentList { environment })?);
                }
                Err(e) => warn!(error = %e, "ignoring ENVIRONMENT variable: not a JSON list of name/value pairs"),
            }
        }

        builder = builder
            .add_source(Environment::default().source(Some(env)))
            .add_source(file);

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn task_env(&self) -> TaskEnv {
        self.environment.iter().cloned().collect()
    }

    /// Template-facing view keyed by canonical field name.
    pub fn fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

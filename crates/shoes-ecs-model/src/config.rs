use crate::{
    ENV_CLUSTER, ENV_NO_WAIT, ENV_REGION, ENV_SUBNET_ID, ENV_TASK_DEFINITION, Flag,
    error::{ConfigError, ConfigResult},
};

/// Parameters addressing the ECS service, validated once at startup.
///
/// Built with [`AppConfig::from_env`] (or [`AppConfig::from_lookup`] for an arbitrary source)
/// and shared read-only by every request afterwards. All string fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    cluster: String,
    task_definition: String,
    subnet_id: String,
    region: String,
    no_wait: Flag,
}

impl AppConfig {
    /// Build a configuration from explicit values.
    ///
    /// Fails with [`ConfigError::MissingConfiguration`] naming the first empty field,
    /// checked in the order cluster, task definition, subnet, region.
    pub fn new(
        cluster: impl Into<String>,
        task_definition: impl Into<String>,
        subnet_id: impl Into<String>,
        region: impl Into<String>,
        no_wait: Flag,
    ) -> ConfigResult<Self> {
        Ok(Self {
            cluster: required(ENV_CLUSTER, cluster.into())?,
            task_definition: required(ENV_TASK_DEFINITION, task_definition.into())?,
            subnet_id: required(ENV_SUBNET_ID, subnet_id.into())?,
            region: required(ENV_REGION, region.into())?,
            no_wait,
        })
    }

    /// Load the configuration from a key-value source.
    ///
    /// Each key is looked up exactly once. Required keys fail fast on the first
    /// missing or empty value; `ECS_TASK_NO_WAIT` is optional and only `"true"`
    /// (any case) enables it.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cluster = required(ENV_CLUSTER, lookup(ENV_CLUSTER).unwrap_or_default())?;
        let task_definition = required(
            ENV_TASK_DEFINITION,
            lookup(ENV_TASK_DEFINITION).unwrap_or_default(),
        )?;
        let subnet_id = required(ENV_SUBNET_ID, lookup(ENV_SUBNET_ID).unwrap_or_default())?;
        let region = required(ENV_REGION, lookup(ENV_REGION).unwrap_or_default())?;

        let no_wait = lookup(ENV_NO_WAIT)
            .map(|raw| Flag::parse(&raw))
            .unwrap_or_default();

        Ok(Self {
            cluster,
            task_definition,
            subnet_id,
            region,
            no_wait,
        })
    }

    /// Load the configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// ECS cluster the tasks are launched into.
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Pre-registered task definition to run.
    pub fn task_definition(&self) -> &str {
        &self.task_definition
    }

    /// Subnet the task network interface attaches to.
    pub fn subnet_id(&self) -> &str {
        &self.subnet_id
    }

    /// AWS region hosting the cluster.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// When enabled, a launch returns as soon as the task is submitted.
    pub fn no_wait(&self) -> Flag {
        self.no_wait
    }
}

fn required(key: &'static str, value: String) -> ConfigResult<String> {
    if value.is_empty() {
        return Err(ConfigError::MissingConfiguration { key });
    }
    Ok(value)
}

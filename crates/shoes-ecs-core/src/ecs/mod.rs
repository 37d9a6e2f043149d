//! Seam between the launcher and the ECS API.
//!
//! [`EcsConnector`] builds a region-bound client, [`EcsApi`] exposes the two remote
//! operations the launcher needs. [`AwsConnector`] is the production implementation
//! backed by the AWS SDK.
mod aws;
pub use aws::{AwsConnector, AwsEcsClient};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use shoes_ecs_model::{AppConfig, CONTAINER_NAME, SHELL_PREFIX, TaskArn};

/// Errors reported by an [`EcsApi`] or [`EcsConnector`] implementation.
#[derive(Debug, Error)]
pub enum EcsError {
    #[error("{0}")]
    Connect(String),

    #[error("{0}")]
    Request(String),

    #[error("exceeded max wait of {0:?}")]
    ExceededMaxWait(Duration),

    #[error("{0}")]
    WaitFailed(String),
}

/// Everything needed for a single `RunTask` call. Tasks always launch on Fargate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTaskInput {
    pub cluster: String,
    pub task_definition: String,
    pub subnet_id: String,
    pub assign_public_ip: bool,
    pub container_name: &'static str,
    /// Full container command, e.g. `["bash", "-c", "<flattened script>"]`.
    pub command: Vec<String>,
}

impl RunTaskInput {
    /// Build the request running `command` through `bash -c` in the `runner` container.
    pub fn new(cfg: &AppConfig, command: &str) -> Self {
        let mut argv: Vec<String> = SHELL_PREFIX.iter().map(|s| s.to_string()).collect();
        argv.push(command.to_string());

        Self {
            cluster: cfg.cluster().to_string(),
            task_definition: cfg.task_definition().to_string(),
            subnet_id: cfg.subnet_id().to_string(),
            assign_public_ip: true,
            container_name: CONTAINER_NAME,
            command: argv,
        }
    }
}

/// Result of a `RunTask` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTaskOutput {
    /// Identifiers of the tasks that were started.
    pub tasks: Vec<TaskArn>,
    /// Human-readable reasons reported for tasks that could not be placed.
    pub failures: Vec<String>,
}

/// Factory for region-bound ECS clients.
#[async_trait]
pub trait EcsConnector: Send + Sync + 'static {
    type Api: EcsApi;

    /// Build a client for `region`, resolving credentials.
    async fn connect(&self, region: &str) -> Result<Self::Api, EcsError>;
}

/// Remote operations used by the launcher.
#[async_trait]
pub trait EcsApi: Send + Sync {
    /// Submit a run-task request. A single remote rejection is final.
    async fn run_task(&self, input: &RunTaskInput) -> Result<RunTaskOutput, EcsError>;

    /// Poll `DescribeTasks` until the task is `RUNNING`.
    ///
    /// Must give up with [`EcsError::ExceededMaxWait`] once `max_wait` is spent.
    async fn wait_until_running(
        &self,
        cluster: &str,
        task: &TaskArn,
        max_wait: Duration,
    ) -> Result<(), EcsError>;
}

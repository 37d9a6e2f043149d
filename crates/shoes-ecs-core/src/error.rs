use std::time::Duration;

use thiserror::Error;

use shoes_ecs_model::TaskArn;

/// Failure of a single launch.
///
/// Variants that carry a `task_arn` were raised after the task had already been submitted:
/// the remote task keeps its own lifecycle and is never stopped by the launcher.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to build ECS client for region '{region}': {reason}")]
    Configuration { region: String, reason: String },

    #[error("run-task rejected: {0}")]
    Submit(String),

    #[error("run-task returned no task (failures: [{}])", .failures.join("; "))]
    EmptyTaskList { failures: Vec<String> },

    #[error("run-task returned {count} tasks, expected exactly one")]
    UnexpectedTaskCount { count: usize },

    #[error("task {task_arn} did not reach RUNNING within {waited:?}")]
    Timeout { task_arn: TaskArn, waited: Duration },

    #[error("waiting for task {task_arn} failed: {reason}")]
    Wait { task_arn: TaskArn, reason: String },

    #[error("wait for task {task_arn} canceled by caller")]
    Canceled { task_arn: TaskArn },
}

impl LaunchError {
    /// Stable, machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            LaunchError::Configuration { .. } => "configuration",
            LaunchError::Submit(_) => "submit",
            LaunchError::EmptyTaskList { .. } => "empty_task_list",
            LaunchError::UnexpectedTaskCount { .. } => "unexpected_task_count",
            LaunchError::Timeout { .. } => "timeout",
            LaunchError::Wait { .. } => "wait",
            LaunchError::Canceled { .. } => "canceled",
        }
    }

    /// Task submitted before the failure, if any.
    pub fn task_arn(&self) -> Option<&TaskArn> {
        match self {
            LaunchError::Timeout { task_arn, .. }
            | LaunchError::Wait { task_arn, .. }
            | LaunchError::Canceled { task_arn } => Some(task_arn),
            _ => None,
        }
    }
}

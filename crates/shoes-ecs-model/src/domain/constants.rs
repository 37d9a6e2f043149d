//! Well-known names shared by the loader, the launcher and the gRPC layer.
//!
//! Keeping them here avoids scattering magic strings throughout the codebase.
use std::time::Duration;

/// Environment key holding the ECS cluster name or ARN.
pub const ENV_CLUSTER: &str = "ECS_TASK_CLUSTER";

/// Environment key holding the task definition (family, `family:revision` or full ARN).
pub const ENV_TASK_DEFINITION: &str = "ECS_TASK_DEFINITION_ARN";

/// Environment key holding the subnet the task network interface attaches to.
pub const ENV_SUBNET_ID: &str = "ECS_TASK_SUBNET_ID";

/// Environment key holding the AWS region.
pub const ENV_REGION: &str = "ECS_TASK_REGION";

/// Optional environment key; `true` (any case) skips waiting for the running state.
pub const ENV_NO_WAIT: &str = "ECS_TASK_NO_WAIT";

/// Instance kind reported back to the host for every created task.
pub const SHOES_TYPE: &str = "ecs-task-fargate";

/// Name of the container inside the task definition whose command is overridden.
pub const CONTAINER_NAME: &str = "runner";

/// Shell invocation prepended to the flattened setup script.
pub const SHELL_PREFIX: [&str; 2] = ["bash", "-c"];

/// Upper bound on how long a launch waits for the task to reach `RUNNING`.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(5 * 60);

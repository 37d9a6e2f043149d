mod arn;
pub use arn::TaskArn;

mod flag;
pub use flag::Flag;

mod constants;
pub use constants::{
    CONTAINER_NAME, DEFAULT_MAX_WAIT, ENV_CLUSTER, ENV_NO_WAIT, ENV_REGION, ENV_SUBNET_ID,
    ENV_TASK_DEFINITION, SHELL_PREFIX, SHOES_TYPE,
};

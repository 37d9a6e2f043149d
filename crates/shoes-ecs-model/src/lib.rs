mod domain;
pub use domain::{
    CONTAINER_NAME, DEFAULT_MAX_WAIT, ENV_CLUSTER, ENV_NO_WAIT, ENV_REGION, ENV_SUBNET_ID,
    ENV_TASK_DEFINITION, SHELL_PREFIX, SHOES_TYPE,
};
pub use domain::{Flag, TaskArn};

mod error;
pub use error::{ConfigError, ConfigResult};

mod config;
pub use config::AppConfig;

mod request;
pub use request::{AddInstance, Instance, ResourceType};

mod script;
pub use script::flatten_script;

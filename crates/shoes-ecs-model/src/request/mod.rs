//! Request and response shapes exchanged with the host.
use crate::{SHOES_TYPE, TaskArn};

/// Instance size hint sent by the host.
///
/// The ECS backend does not size tasks from it (the task definition decides),
/// it only echoes the value back in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceType {
    #[default]
    Unknown,
    Nano,
    Micro,
    Small,
    Medium,
    Large,
    XLarge,
    XLarge2,
    XLarge3,
    XLarge4,
}

/// Request to create one runner instance.
#[derive(Debug, Clone, Default)]
pub struct AddInstance {
    /// Runner name chosen by the host; used for logging only.
    pub runner_name: String,
    /// Raw setup script, possibly multi-line with comments and a shebang.
    pub setup_script: String,
    pub resource_type: ResourceType,
    pub labels: Vec<String>,
}

/// A created runner instance as reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Task identifier assigned by ECS.
    pub cloud_id: TaskArn,
    /// Always [`SHOES_TYPE`].
    pub shoes_type: String,
    /// Always empty: task addresses are not discovered.
    pub ip_address: String,
    pub resource_type: ResourceType,
}

impl Instance {
    /// Describe a freshly launched task.
    pub fn launched(cloud_id: TaskArn, resource_type: ResourceType) -> Self {
        Self {
            cloud_id,
            shoes_type: SHOES_TYPE.to_string(),
            ip_address: String::new(),
            resource_type,
        }
    }
}

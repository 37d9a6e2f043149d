pub mod ecs;
pub mod error;
pub mod launcher;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub mod prelude {
    pub use crate::ecs::{AwsConnector, EcsApi, EcsConnector, EcsError, RunTaskInput, RunTaskOutput};
    pub use crate::error::LaunchError;
    pub use crate::launcher::{LaunchOptions, TaskLauncher};
}

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use shoes_ecs_core::{ecs::EcsConnector, launcher::TaskLauncher};
use shoes_ecs_model::{AddInstance, AppConfig, Instance, TaskArn, flatten_script};

use crate::error::ApiError;
use crate::handler::ShoesHandler;

/// [`ShoesHandler`] that runs every runner as a one-off ECS task.
///
/// The configuration is loaded once at startup and shared read-only;
/// the launcher builds a fresh client per call.
pub struct EcsTaskAdapter<C> {
    config: Arc<AppConfig>,
    launcher: TaskLauncher<C>,
}

impl<C> EcsTaskAdapter<C>
where
    C: EcsConnector,
{
    pub fn new(config: Arc<AppConfig>, launcher: TaskLauncher<C>) -> Self {
        Self { config, launcher }
    }
}

#[async_trait]
impl<C> ShoesHandler for EcsTaskAdapter<C>
where
    C: EcsConnector,
{
    async fn add_instance(
        &self,
        req: AddInstance,
        cancel: &CancellationToken,
    ) -> Result<Instance, ApiError> {
        let command = flatten_script(&req.setup_script);

        let task_arn = self
            .launcher
            .launch(&self.config, &command, cancel)
            .await
            .map_err(|e| {
                error!(runner = %req.runner_name, kind = e.kind(), error = %e, "add instance failed");
                ApiError::from(e)
            })?;

        info!(runner = %req.runner_name, task_arn = %task_arn, "instance added");
        Ok(Instance::launched(task_arn, req.resource_type))
    }

    /// Tasks stop on their own once the runner exits; nothing to do remotely.
    async fn delete_instance(&self, cloud_id: &TaskArn) -> Result<(), ApiError> {
        debug!(cloud_id = %cloud_id, "delete is a no-op for ECS tasks");
        Ok(())
    }
}

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use shoes_ecs_model::{AddInstance, Instance, TaskArn};

use crate::error::ApiError;

/// Runner backend contract invoked by the host.
///
/// Implementations are shared across concurrent calls and must not keep per-request state.
#[async_trait]
pub trait ShoesHandler: Send + Sync + 'static {
    /// Create one runner instance and return its identity.
    ///
    /// `cancel` fires when the caller goes away; long waits should stop early.
    async fn add_instance(
        &self,
        req: AddInstance,
        cancel: &CancellationToken,
    ) -> Result<Instance, ApiError>;

    /// Delete a previously created instance.
    async fn delete_instance(&self, cloud_id: &TaskArn) -> Result<(), ApiError>;
}

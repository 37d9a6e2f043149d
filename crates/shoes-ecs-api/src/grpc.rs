use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};
use tracing::{debug, instrument};

use shoes_ecs_model::{AddInstance, TaskArn};

use crate::handler::ShoesHandler;
use crate::proto::{self, shoes_server::Shoes};

/// gRPC service implementation.
///
/// This struct wraps a `ShoesHandler` and implements the generated `Shoes` trait.
pub struct ShoesService<H> {
    handler: Arc<H>,
}

impl<H> ShoesService<H>
where
    H: ShoesHandler,
{
    /// Create a new gRPC service with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

#[tonic::async_trait]
impl<H> Shoes for ShoesService<H>
where
    H: ShoesHandler,
{
    #[instrument(level = "debug", skip_all)]
    async fn add_instance(
        &self,
        request: Request<proto::AddInstanceRequest>,
    ) -> Result<Response<proto::AddInstanceResponse>, Status> {
        let req = AddInstance::from(request.into_inner());

        // tonic drops this future when the client goes away; the guard turns that into a cancel.
        let cancel = CancellationToken::new();
        let _guard = cancel.clone().drop_guard();

        let instance = self
            .handler
            .add_instance(req, &cancel)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(proto::AddInstanceResponse::from(instance)))
    }

    async fn delete_instance(
        &self,
        request: Request<proto::DeleteInstanceRequest>,
    ) -> Result<Response<proto::DeleteInstanceResponse>, Status> {
        let req = request.into_inner();
        debug!(cloud_id = %req.cloud_id, labels = ?req.labels, "delete instance requested");

        self.handler
            .delete_instance(&TaskArn::new(req.cloud_id))
            .await
            .map_err(Status::from)?;

        Ok(Response::new(proto::DeleteInstanceResponse {}))
    }
}

//! Host-facing surface of the ECS runner backend.
//!
//! [`ShoesHandler`] is the two-operation contract; [`EcsTaskAdapter`] implements it on top
//! of the task launcher, and [`ShoesService`] exposes any handler over gRPC.
mod adapter;
pub use adapter::EcsTaskAdapter;

mod convert;

mod error;
pub use error::{ApiError, ERROR_KIND_METADATA};

mod grpc;
pub use grpc::ShoesService;

mod handler;
pub use handler::ShoesHandler;

mod health;
pub use health::{HealthService, PLUGIN_SERVICE_NAME};

pub mod proto {
    tonic::include_proto!("whywaita.myshoes");

    pub mod health {
        tonic::include_proto!("grpc.health.v1");
    }
}

pub use proto::health::health_server::HealthServer;
pub use proto::shoes_server::ShoesServer;

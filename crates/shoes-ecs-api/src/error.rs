use thiserror::Error;
use tonic::{Status, metadata::MetadataValue};

use shoes_ecs_core::error::LaunchError;

/// Response metadata key carrying the [`LaunchError::kind`] of a failed call.
pub const ERROR_KIND_METADATA: &str = "x-shoes-error-kind";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to run task: {0}")]
    Launch(#[from] LaunchError),
}

impl ApiError {
    /// Fine-grained failure kind, preserved even though the status code is coarse.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Launch(e) => e.kind(),
        }
    }
}

/// Every launch failure is `INTERNAL` to the host, except a caller-side cancel.
/// The precise kind travels in the [`ERROR_KIND_METADATA`] entry.
impl From<ApiError> for Status {
    fn from(err: ApiError) -> Self {
        let kind = err.kind();
        let mut status = match &err {
            ApiError::Launch(LaunchError::Canceled { .. }) => Status::cancelled(err.to_string()),
            ApiError::Launch(_) => Status::internal(err.to_string()),
        };
        status
            .metadata_mut()
            .insert(ERROR_KIND_METADATA, MetadataValue::from_static(kind));
        status
    }
}

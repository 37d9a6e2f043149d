use tonic::{Request, Response, Status};

use crate::proto::health::{
    HealthCheckRequest, HealthCheckResponse, health_check_response::ServingStatus,
    health_server::Health,
};

/// Service name the plugin host probes before dispatching calls.
pub const PLUGIN_SERVICE_NAME: &str = "plugin";

/// Health endpoint reporting the plugin as serving for as long as the process is up.
#[derive(Debug, Default, Clone, Copy)]
pub struct HealthService;

#[tonic::async_trait]
impl Health for HealthService {
    async fn check(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let service = request.into_inner().service;

        let status = if service.is_empty() || service == PLUGIN_SERVICE_NAME {
            ServingStatus::Serving
        } else {
            ServingStatus::ServiceUnknown
        };

        Ok(Response::new(HealthCheckResponse {
            status: status as i32,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn check(service: &str) -> ServingStatus {
        let resp = HealthService
            .check(Request::new(HealthCheckRequest {
                service: service.into(),
            }))
            .await
            .unwrap();
        ServingStatus::try_from(resp.into_inner().status).unwrap()
    }

    #[tokio::test]
    async fn plugin_and_overall_are_serving() {
        assert_eq!(check("plugin").await, ServingStatus::Serving);
        assert_eq!(check("").await, ServingStatus::Serving);
    }

    #[tokio::test]
    async fn other_services_are_unknown() {
        assert_eq!(check("whywaita.myshoes.Other").await, ServingStatus::ServiceUnknown);
    }
}

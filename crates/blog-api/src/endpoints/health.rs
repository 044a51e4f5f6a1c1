//! GET /health

use async_trait::async_trait;
use blog_common::AppError;
use blog_core::{GatewayResult, HealthProbe};
use reqwest::Method;

use crate::client::{ApiClient, RequestOptions};

/// Message for every failed health check, whatever the cause
pub const HEALTH_UNAVAILABLE: &str = "Backend service is not available";

#[async_trait]
impl HealthProbe for ApiClient {
    async fn health_check(&self) -> GatewayResult<()> {
        self.request_unit(Method::GET, "/health", None, RequestOptions::new(HEALTH_UNAVAILABLE))
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Health check failed");
                AppError::ServiceUnavailable(HEALTH_UNAVAILABLE.to_string()).into_domain()
            })
    }
}

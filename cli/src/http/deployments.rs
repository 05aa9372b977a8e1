//! Service deployment API client

use async_trait::async_trait;

use crate::errors::CliError;
use crate::http::client::{ApiResponse, HttpClient};
use crate::models::deployment::DeploymentRequest;

/// The two calls of the deployment API, as a trait for testability
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Submit a deployment for the service named by the request
    async fn submit_deployment(&self, request: &DeploymentRequest) -> Result<ApiResponse, CliError>;

    /// Get the deployment status of a service
    async fn service_status(&self, service_name: &str) -> Result<ApiResponse, CliError>;
}

#[async_trait]
impl DeploymentApi for HttpClient {
    async fn submit_deployment(&self, request: &DeploymentRequest) -> Result<ApiResponse, CliError> {
        let url = self.url(&["services", request.service_name()])?;
        self.post(url, &request.to_body()).await
    }

    async fn service_status(&self, service_name: &str) -> Result<ApiResponse, CliError> {
        let url = self.url(&["services", service_name])?;
        self.get(url).await
    }
}

//! Test doubles shared by the unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::CliError;
use crate::http::client::ApiResponse;
use crate::http::deployments::DeploymentApi;
use crate::models::deployment::DeploymentRequest;

/// A deployment API answering from scripted responses and recording calls
#[derive(Default)]
pub struct ScriptedApi {
    submit_responses: Mutex<VecDeque<Result<ApiResponse, CliError>>>,
    status_responses: Mutex<VecDeque<Result<ApiResponse, CliError>>>,
    submitted: Mutex<Vec<DeploymentRequest>>,
    status_calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn with_statuses(responses: Vec<ApiResponse>) -> Self {
        Self::with_status_results(responses.into_iter().map(Ok).collect())
    }

    pub fn with_status_results(responses: Vec<Result<ApiResponse, CliError>>) -> Self {
        Self {
            status_responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn on_submit(self, response: Result<ApiResponse, CliError>) -> Self {
        self.submit_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn submitted(&self) -> Vec<DeploymentRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> Vec<String> {
        self.status_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeploymentApi for ScriptedApi {
    async fn submit_deployment(&self, request: &DeploymentRequest) -> Result<ApiResponse, CliError> {
        self.submitted.lock().unwrap().push(request.clone());
        self.submit_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CliError::Internal("no scripted submit response".to_string())))
    }

    async fn service_status(&self, service_name: &str) -> Result<ApiResponse, CliError> {
        self.status_calls.lock().unwrap().push(service_name.to_string());
        self.status_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CliError::Internal("no scripted status response".to_string())))
    }
}

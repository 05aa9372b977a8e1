//! Deployment status poller
//!
//! Queries the service status until the deployment reaches a terminal state.
//! There is no overall deadline: the loop ends only on a terminal
//! classification or an error. Each request is bounded by the HTTP client
//! timeout.

use std::future::Future;
use std::time::Duration;

use http::StatusCode;
use openapi_client::models::ServiceResponse;
use tracing::{debug, info};

use crate::console::Reporter;
use crate::deploy::fsm::{PollEvent, PollFsm, PollState};
use crate::errors::CliError;
use crate::http::client::ApiResponse;
use crate::http::deployments::DeploymentApi;
use crate::models::deployment::DeploymentStatus;

/// Delay between two status checks unless configured otherwise
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// Poller options
#[derive(Debug, Clone)]
pub struct Options {
    /// Delay between two status checks
    pub delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

/// Terminal result of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded,
    Failed,
}

/// Classify one status response.
///
/// Codes other than 200, 202 and 417 are errors.
pub fn classify(response: &ApiResponse) -> Result<PollEvent, CliError> {
    match response.status {
        StatusCode::ACCEPTED => {
            let body: Option<ServiceResponse> = response.json().ok();
            let status = body
                .and_then(|b| b.status)
                .map(|s| DeploymentStatus::parse(&s));
            Ok(PollEvent::InProgress(status))
        }
        StatusCode::OK => {
            let body: ServiceResponse = response.json()?;
            match body.status.as_deref().map(DeploymentStatus::parse) {
                Some(status) if status.is_ongoing() => Ok(PollEvent::InProgress(Some(status))),
                Some(DeploymentStatus::Failed) => Ok(PollEvent::Failed(format!(
                    "Deployment finished with status {}",
                    DeploymentStatus::Failed
                ))),
                _ => Ok(PollEvent::Succeeded(format!(
                    "Deployment succeeded with status {}.",
                    response.status.as_u16()
                ))),
            }
        }
        StatusCode::EXPECTATION_FAILED => Ok(PollEvent::Failed(format!(
            "Deployment failed with status {}.",
            response.status.as_u16()
        ))),
        status => {
            let message = response
                .error_message()
                .unwrap_or_else(|| "unexpected response from the status endpoint".to_string());
            Err(CliError::UnexpectedStatus { status, message })
        }
    }
}

/// Poll the status of `service_name` until the deployment is finished.
///
/// For N in-progress responses followed by a terminal one, this issues N+1
/// requests and sleeps N times.
pub async fn poll<A, S, F>(
    api: &A,
    reporter: &dyn Reporter,
    service_name: &str,
    options: &Options,
    sleep_fn: S,
) -> Result<PollOutcome, CliError>
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Polling deployment status of '{}'", service_name);
    reporter.status_line(&format!(
        "Checking deployment status for service {}",
        service_name
    ));

    let mut fsm = PollFsm::new();
    loop {
        let response = api.service_status(service_name).await?;
        let event = classify(&response)?;

        debug!("Status check {} of '{}': {:?}", fsm.checks() + 1, service_name, event);
        fsm.process(event).map_err(CliError::Internal)?;

        match fsm.state() {
            PollState::Polling => {
                reporter.progress();
                sleep_fn(options.delay).await;
            }
            PollState::Succeeded => {
                reporter.success(fsm.message().unwrap_or("Deployment succeeded"));
                info!("Deployment of '{}' succeeded after {} check(s)", service_name, fsm.checks());
                return Ok(PollOutcome::Succeeded);
            }
            PollState::Failed => {
                reporter.failure(fsm.message().unwrap_or("Deployment failed"));
                info!("Deployment of '{}' failed after {} check(s)", service_name, fsm.checks());
                return Ok(PollOutcome::Failed);
            }
        }
    }
}

//! Deployment submitter

use http::StatusCode;
use openapi_client::models::ServiceResponse;
use tracing::{debug, info};

use crate::console::Reporter;
use crate::errors::CliError;
use crate::http::deployments::DeploymentApi;
use crate::models::deployment::{DeploymentRequest, DeploymentStatus};

/// What the API made of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The deployment was started and should be polled
    Started,

    /// The API already reported a status that needs no polling
    Settled(DeploymentStatus),
}

/// Submit one deployment request. A rejected submission is not retried.
pub async fn submit<A>(
    api: &A,
    reporter: &dyn Reporter,
    request: &DeploymentRequest,
) -> Result<SubmitOutcome, CliError>
where
    A: DeploymentApi + ?Sized,
{
    let service_name = request.service_name();
    info!(
        "Submitting deployment of '{}' (image: {:?}, force: {}, secrets: {})",
        service_name,
        request.image(),
        request.force(),
        request.secret_arns().len()
    );

    let response = api.submit_deployment(request).await?;
    debug!("Submission of '{}' answered with {}", service_name, response.status);

    if response.status != StatusCode::CREATED {
        let message = response
            .error_message()
            .unwrap_or_else(|| format!("Deployment failed with status {}", response.status.as_u16()));

        return Err(CliError::SubmissionRejected {
            status: response.status,
            message,
        });
    }

    let body: ServiceResponse = response.json()?;
    let status = body.status.as_deref().map(DeploymentStatus::parse);

    match status {
        None => {}
        Some(ref status) if status.is_ongoing() => {}
        Some(DeploymentStatus::Successful) => {
            reporter.success(&DeploymentStatus::Successful.to_string());
            return Ok(SubmitOutcome::Settled(DeploymentStatus::Successful));
        }
        Some(DeploymentStatus::Failed) => {
            reporter.failure(&DeploymentStatus::Failed.to_string());
            return Ok(SubmitOutcome::Settled(DeploymentStatus::Failed));
        }
        Some(other) => {
            reporter.warning(&other.to_string());
            return Ok(SubmitOutcome::Settled(other));
        }
    }

    reporter.success(&format!(
        "Deployment successfully started for service {}",
        service_name
    ));
    Ok(SubmitOutcome::Started)
}

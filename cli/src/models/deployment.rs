//! Deployment models

use std::fmt;

use openapi_client::models::ServiceDeploymentRequest;

use crate::errors::CliError;

/// Check that `raw` names exactly one service and return it trimmed.
///
/// `.` and `..` are rejected: as URL path segments they would address the
/// service collection instead of a single service.
pub fn validate_service_name(raw: &str) -> Result<String, CliError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CliError::ValidationError(
            "Service name must not be empty".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(CliError::ValidationError(format!(
            "Invalid service name '{}'",
            name
        )));
    }
    Ok(name.to_string())
}

/// A deployment request for a single service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    service_name: String,
    image: Option<String>,
    force: bool,
    secret_arns: Vec<String>,
}

impl DeploymentRequest {
    /// Create a request for `service_name`, which must not be blank
    pub fn new(service_name: impl Into<String>) -> Result<Self, CliError> {
        Ok(Self {
            service_name: validate_service_name(&service_name.into())?,
            image: None,
            force: false,
            secret_arns: Vec::new(),
        })
    }

    /// Container image to deploy
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|i| !i.trim().is_empty());
        self
    }

    /// Force a new deployment even if the image has not changed
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Secrets to attach to the service
    pub fn with_secret_arns(mut self, secret_arns: Vec<String>) -> Self {
        self.secret_arns = secret_arns;
        self
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn secret_arns(&self) -> &[String] {
        &self.secret_arns
    }

    /// Wire body of the request
    pub fn to_body(&self) -> ServiceDeploymentRequest {
        ServiceDeploymentRequest {
            service_name: self.service_name.clone(),
            image: self.image.clone(),
            force: self.force,
            secret_arns: self.secret_arns.clone(),
        }
    }
}

/// Status of a service deployment as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentStatus {
    Pending,
    InProgress,
    Successful,
    Failed,
    /// A value outside the known set, kept verbatim
    Unknown(String),
}

impl DeploymentStatus {
    /// Canonicalize the textual status returned by the API
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "PENDING" | "QUEUED" | "CREATED" => DeploymentStatus::Pending,
            "IN_PROGRESS" | "INPROGRESS" | "RUNNING" => DeploymentStatus::InProgress,
            "SUCCESSFUL" | "SUCCEEDED" | "SUCCESS" | "COMPLETED" => DeploymentStatus::Successful,
            "FAILED" | "FAILURE" | "ERROR" => DeploymentStatus::Failed,
            _ => DeploymentStatus::Unknown(raw.to_string()),
        }
    }

    /// Whether the deployment is still being rolled out
    pub fn is_ongoing(&self) -> bool {
        matches!(self, DeploymentStatus::Pending | DeploymentStatus::InProgress)
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStatus::Pending => f.write_str("PENDING"),
            DeploymentStatus::InProgress => f.write_str("IN_PROGRESS"),
            DeploymentStatus::Successful => f.write_str("SUCCESSFUL"),
            DeploymentStatus::Failed => f.write_str("FAILED"),
            DeploymentStatus::Unknown(raw) => f.write_str(raw),
        }
    }
}

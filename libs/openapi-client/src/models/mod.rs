//! API models

use serde::{Deserialize, Serialize};

/// Service deployment request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDeploymentRequest {
    pub service_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub force: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secret_arns: Vec<String>,
}

/// Body returned by the service endpoints.
///
/// Every field is optional: successful responses usually carry only `status`,
/// rejected ones `error` or `errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorDetail>,
}

impl ServiceResponse {
    /// The error message carried by the body, `error` taking precedence
    pub fn error_message(&self) -> Option<String> {
        if let Some(error) = self.error.as_ref().filter(|e| !e.is_empty()) {
            return Some(error.clone());
        }
        self.errors.as_ref().map(ErrorDetail::to_message).filter(|m| !m.is_empty())
    }
}

/// The `errors` field is either a single message or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Messages(Vec<String>),
}

impl ErrorDetail {
    pub fn to_message(&self) -> String {
        match self {
            ErrorDetail::Message(message) => message.clone(),
            ErrorDetail::Messages(messages) => messages.join("; "),
        }
    }
}

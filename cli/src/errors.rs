//! Error types for the maws client

use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;

/// Main error type for the maws client
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Configuration file not found: {}", .0.display())]
    ProfileFileMissing(PathBuf),

    #[error("Invalid configuration file {}: {source}", path.display())]
    ProfileFileInvalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Profile '{name}' not found in {}. Available profiles: {}", path.display(), available.join(", "))]
    ProfileNotFound {
        name: String,
        path: PathBuf,
        available: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Deployment request rejected with status {}: {message}", status.as_u16())]
    SubmissionRejected { status: StatusCode, message: String },

    #[error("Deployment failed with status {}: {message}", status.as_u16())]
    UnexpectedStatus { status: StatusCode, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

//! HTTP client implementation

use std::time::Duration;

use http::StatusCode;
use openapi_client::models::ServiceResponse;
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::errors::CliError;
use crate::storage::settings::Settings;
use crate::utils::version_info;

/// Header carrying the API access token
pub const TOKEN_HEADER: &str = "x-api-token";

/// Timeout applied to every single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A raw API response: the status code drives the caller's decisions, the
/// body is decoded on demand
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON; an empty body decodes as `T::default()`
    pub fn json<T: DeserializeOwned + Default>(&self) -> Result<T, CliError> {
        if self.body.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Error message of a failed call: the `error` or `errors` field of a
    /// JSON body, else the raw body text
    pub fn error_message(&self) -> Option<String> {
        match self.json::<ServiceResponse>() {
            Ok(body) => body.error_message(),
            Err(_) => Some(self.body.trim().to_string()).filter(|b| !b.is_empty()),
        }
    }
}

/// HTTP client for the deployment API
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpClient {
    /// Create a new HTTP client from the resolved settings
    pub fn new(settings: &Settings) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("maws/{}", version_info().version))
            .build()?;

        let mut base_url = settings.api_base_url.clone();
        base_url
            .path_segments_mut()
            .map_err(|_| CliError::ConfigError(format!("Invalid base URL: {}", settings.api_base_url)))?
            .pop_if_empty()
            .push(&settings.api_version);

        Ok(Self {
            client,
            base_url,
            token: settings.api_access_token.clone(),
        })
    }

    /// Get the versioned base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL of `segments` below the versioned base URL.
    /// Each segment is percent-encoded on its own.
    pub fn url(&self, segments: &[&str]) -> Result<Url, CliError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CliError::ConfigError(format!("Invalid base URL: {}", self.base_url)))?
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request
    pub async fn get(&self, url: Url) -> Result<ApiResponse, CliError> {
        self.send::<()>(Method::GET, url, None).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B: Serialize>(&self, url: Url, body: &B) -> Result<ApiResponse, CliError> {
        self.send(Method::POST, url, Some(body)).await
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<ApiResponse, CliError> {
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} responded with {}", method, status);

        Ok(ApiResponse { status, body })
    }
}

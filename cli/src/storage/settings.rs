//! Client settings resolved from the environment and an optional profile

use secrecy::SecretString;
use tracing::{debug, warn};
use url::Url;

use crate::errors::CliError;
use crate::storage::layout::StorageLayout;
use crate::storage::profile::{load_profile, Profile};

pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_API_VERSION: &str = "API_VERSION";
pub const ENV_API_ACCESS_TOKEN: &str = "API_ACCESS_TOKEN";

/// API version used when neither the environment nor the profile sets one
pub const DEFAULT_API_VERSION: &str = "v1";

/// Connection settings for the deployment API
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the API, without the version segment
    pub api_base_url: Url,

    /// Version path segment appended to the base URL
    pub api_version: String,

    /// Token sent in the `x-api-token` header
    pub api_access_token: Option<SecretString>,
}

impl Settings {
    /// Load settings from the process environment, overlaid with `profile`
    /// from the profile file when one is selected
    pub async fn load(layout: &StorageLayout, profile: Option<&str>) -> Result<Self, CliError> {
        let profile = match profile {
            Some(name) => {
                debug!("Loading profile '{}'", name);
                Some(load_profile(&layout.profile_file(), name).await?)
            }
            None => None,
        };

        Self::resolve(|key| std::env::var(key).ok(), profile)
    }

    /// Resolve settings from an environment lookup and an optional profile.
    ///
    /// A selected profile supplies the base URL and token; the version falls
    /// back to the environment when the profile does not set one.
    pub fn resolve<E>(env: E, profile: Option<Profile>) -> Result<Self, CliError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let env_version = env(ENV_API_VERSION);
        let (base_url, access_token, version) = match profile {
            Some(profile) => (
                profile.api_base_url.filter(|url| !url.trim().is_empty()),
                profile.api_access_token,
                profile.api_version.filter(|v| !v.trim().is_empty()).or(env_version),
            ),
            None => (
                env(ENV_API_BASE_URL),
                env(ENV_API_ACCESS_TOKEN).map(SecretString::from),
                env_version,
            ),
        };

        let base_url = base_url
            .ok_or_else(|| CliError::ConfigError(format!("{} is not set", ENV_API_BASE_URL)))?;
        let api_base_url = parse_base_url(&base_url)?;

        if access_token.is_none() {
            warn!("{} is not set, requests will be sent without a token", ENV_API_ACCESS_TOKEN);
        }

        Ok(Self {
            api_base_url,
            api_version: version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            api_access_token: access_token,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CliError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| CliError::ConfigError(format!("Invalid {} '{}': {}", ENV_API_BASE_URL, raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(CliError::ConfigError(format!(
            "Invalid {} '{}': expected an http or https URL",
            ENV_API_BASE_URL, raw
        )));
    }

    Ok(url)
}

//! Named connection profiles stored in the profile file
//!
//! ```toml
//! [profiles.dev]
//! API_BASE_URL = "https://dev-api.example.com"
//! API_ACCESS_TOKEN = "your-dev-token"
//! API_VERSION = "v1"
//! ```

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::errors::CliError;
use crate::filesys::file::File;

/// Contents of the profile file
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// A single named profile
#[derive(Debug, Default, Deserialize)]
pub struct Profile {
    #[serde(rename = "API_BASE_URL", default)]
    pub api_base_url: Option<String>,

    #[serde(rename = "API_ACCESS_TOKEN", default, deserialize_with = "deserialize_secret")]
    pub api_access_token: Option<SecretString>,

    #[serde(rename = "API_VERSION", default)]
    pub api_version: Option<String>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

/// Load the profile `name` from the profile file
pub async fn load_profile(profile_file: &File, name: &str) -> Result<Profile, CliError> {
    if !profile_file.exists().await {
        return Err(CliError::ProfileFileMissing(profile_file.path().to_path_buf()));
    }

    let mut contents: ProfileFile = profile_file.read_toml().await?;
    debug!(
        "Loaded {} profile(s) from {}",
        contents.profiles.len(),
        profile_file.path().display()
    );

    match contents.profiles.remove(name) {
        Some(profile) => Ok(profile),
        None => Err(CliError::ProfileNotFound {
            name: name.to_string(),
            path: profile_file.path().to_path_buf(),
            available: contents.profiles.into_keys().collect(),
        }),
    }
}

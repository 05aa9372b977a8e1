//! Storage layout configuration

use std::path::PathBuf;

use crate::filesys::file::File;

/// Directory name of the client configuration under the user's home
pub const CONFIG_DIR_NAME: &str = ".skaylink";

/// File name of the profile configuration
pub const PROFILE_FILE_NAME: &str = "profile.toml";

/// Storage layout for the client configuration
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Base directory for all storage
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the profile file
    pub fn profile_file(&self) -> File {
        File::new(self.base_dir.join(PROFILE_FILE_NAME))
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);

        Self::new(base_dir)
    }
}

use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

const STORE_FILE_NAME: &str = "mastery.json";

/// Locates files the CLI keeps between runs.
#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::default_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    #[cfg(test)]
    pub fn with_custom_path(path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: path.into(),
        }
    }

    #[cfg(test)]
    pub fn data_path(&self) -> &Path {
        &self.base_path
    }

    /// The configured store path wins; otherwise the store lives in the data directory.
    pub fn mastery_store_path(&self, configured: Option<&Path>) -> PathBuf {
        configured
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_path.join(STORE_FILE_NAME))
    }

    fn default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "pipelab", "pipelab")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}

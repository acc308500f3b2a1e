use pipelab::engine::config::ComposerConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningSettings {
    pub enabled: bool,
    pub api_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key, never the key itself.
    pub api_key_env: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` selects the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub composer: ComposerConfig,
    pub reasoning: ReasoningSettings,
    /// `None` selects the platform data directory.
    pub store_path: Option<PathBuf>,
}

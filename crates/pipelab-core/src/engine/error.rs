use super::config::ConfigError;
use super::store::StoreError;
use crate::core::catalog::registry::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Mastery store error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation { .. })
    }
}

/// Rejects identifiers and goals that are empty after trimming.
pub(crate) fn require_non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, EngineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(EngineError::Validation { field })
    } else {
        Ok(trimmed)
    }
}

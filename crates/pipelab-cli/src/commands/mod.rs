pub mod catalog;
pub mod compose;
pub mod connect;
pub mod mastery;
pub mod suggest;
pub mod validate;

use crate::config::AppConfig;
use crate::error::Result;
use pipelab::core::catalog::registry::ModuleCatalog;
use tracing::info;

/// The catalog named in the configuration, or the built-in one.
pub fn load_catalog(config: &AppConfig) -> Result<ModuleCatalog> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading module catalog from {:?}", path);
            ModuleCatalog::load(path)?
        }
        None => ModuleCatalog::builtin()?,
    };
    info!("Catalog ready with {} module(s).", catalog.len());
    Ok(catalog)
}

//! # Catalog Module
//!
//! The module catalog is a fixed table of [`descriptor::ModuleDescriptor`] records.
//! It is loaded once (from the embedded default or a TOML file) and never mutated.
//!
//! ```ignore
//! use pipelab::core::catalog::registry::ModuleCatalog;
//!
//! let catalog = ModuleCatalog::builtin()?;
//! let esmfold = catalog.get("esmfold").unwrap();
//! assert!(esmfold.requires_gpu());
//! ```

pub mod descriptor;
pub mod registry;

use super::descriptor::{Category, ModuleDescriptor};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../../data/catalog.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(rename = "module", default)]
    modules: Vec<ModuleDescriptor>,
}

/// Read-only repository of module descriptors with indexed lookup by identifier.
///
/// Iteration follows declaration order in the source file ("catalog order"), which
/// is the order used by neighbour queries and prompt construction.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: Vec<ModuleDescriptor>,
    index: HashMap<String, usize>,
}

impl ModuleCatalog {
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self, CatalogError> {
        if modules.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut index = HashMap::with_capacity(modules.len());
        for (position, module) in modules.iter().enumerate() {
            if module.id.trim().is_empty() {
                return Err(CatalogError::MissingIdentifier { position });
            }
            if index.insert(module.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateModule(module.id.clone()));
            }
        }
        Ok(Self { modules, index })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG, "<builtin>")
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        Self::new(file.modules)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.index.get(id).map(|&i| &self.modules[i])
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter().filter(move |m| m.category == category)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Duplicate module identifier '{0}' in catalog")]
    DuplicateModule(String),
    #[error("Module at position {position} has an empty identifier")]
    MissingIdentifier { position: usize },
    #[error("Catalog contains no modules")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::descriptor::tests::descriptor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_catalog_loads_and_indexes_every_module() {
        let catalog = ModuleCatalog::builtin().unwrap();
        assert!(catalog.len() >= 12);
        for module in catalog.iter() {
            assert_eq!(catalog.get(&module.id), Some(module));
            assert!(!module.inputs.is_empty(), "{} has no inputs", module.id);
            assert!(!module.outputs.is_empty(), "{} has no outputs", module.id);
        }
    }

    #[test]
    fn builtin_catalog_contains_default_general_purpose_module() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let esmfold = catalog.get("esmfold").unwrap();
        assert_eq!(esmfold.category, Category::Structure);
        assert_eq!(esmfold.inputs, vec!["fasta"]);
    }

    #[test]
    fn unknown_identifier_returns_none() {
        let catalog = ModuleCatalog::builtin().unwrap();
        assert!(catalog.get("does-not-exist").is_none());
        assert!(!catalog.contains("does-not-exist"));
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let result = ModuleCatalog::new(vec![
            descriptor("a", &["pdb"], &["pdb"], false),
            descriptor("a", &["fasta"], &["pdb"], false),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateModule(id)) if id == "a"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(ModuleCatalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn by_category_preserves_catalog_order() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let docking: Vec<_> = catalog
            .by_category(Category::Docking)
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(docking, vec!["diffdock", "autodock-vina"]);
    }

    #[test]
    fn load_reads_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[module]]
id = "blast"
name = "BLAST"
category = "evolution"
inputs = ["fasta"]
outputs = ["hits"]

[module.compute]
gpu = false
time-estimate = "seconds"
"#
        )
        .unwrap();

        let catalog = ModuleCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        let blast = catalog.get("blast").unwrap();
        assert_eq!(blast.outputs, vec!["hits"]);
        assert!(blast.learning.summary.is_empty());
    }

    #[test]
    fn load_reports_missing_file_as_io_error() {
        let result = ModuleCatalog::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn unknown_fields_are_rejected_as_toml_errors() {
        let content = r#"
[[module]]
id = "x"
name = "X"
category = "analysis"
inputs = ["pdb"]
outputs = ["pdb"]
colour = "blue"

[module.compute]
gpu = false
time-estimate = "seconds"
"#;
        let result = ModuleCatalog::from_toml_str(content, "inline");
        assert!(matches!(result, Err(CatalogError::Toml { .. })));
    }
}

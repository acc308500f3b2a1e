use super::notes::learning_note;
use crate::core::catalog::descriptor::ModuleDescriptor;
use crate::core::catalog::registry::ModuleCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MODULE_NOT_FOUND: &str = "Module not found";

/// Outcome of asking whether one module can feed another.
///
/// An unknown identifier is reported here as `valid: false` with
/// [`MODULE_NOT_FOUND`] rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub valid: bool,
    pub message: String,
    pub learning_note: String,
}

impl CompatibilityResult {
    fn not_found() -> Self {
        Self {
            valid: false,
            message: MODULE_NOT_FOUND.to_string(),
            learning_note: String::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        !self.valid && self.message == MODULE_NOT_FOUND
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Modules that could feed the target.
    Upstream,
    /// Modules the target could feed.
    Downstream,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Upstream => f.write_str("upstream"),
            Direction::Downstream => f.write_str("downstream"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown direction '{0}'. Expected 'upstream' or 'downstream'.")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upstream" | "up" => Ok(Direction::Upstream),
            "downstream" | "down" => Ok(Direction::Downstream),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

pub struct CompatibilityResolver<'a> {
    catalog: &'a ModuleCatalog,
}

impl<'a> CompatibilityResolver<'a> {
    pub fn new(catalog: &'a ModuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, from_id: &str, to_id: &str) -> CompatibilityResult {
        match (self.catalog.get(from_id), self.catalog.get(to_id)) {
            (Some(from), Some(to)) => resolve_descriptors(from, to),
            _ => CompatibilityResult::not_found(),
        }
    }

    /// Catalog modules that can be chained with `module_id` in the given direction,
    /// excluding the module itself. Unknown identifiers yield an empty list.
    pub fn compatible_modules(&self, module_id: &str, direction: Direction) -> Vec<&'a ModuleDescriptor> {
        let Some(target) = self.catalog.get(module_id) else {
            return Vec::new();
        };
        self.catalog
            .iter()
            .filter(|candidate| candidate.id != target.id)
            .filter(|candidate| match direction {
                Direction::Upstream => candidate.can_feed(target),
                Direction::Downstream => target.can_feed(candidate),
            })
            .collect()
    }

    /// The format an edge from `from_id` to `to_id` would carry, if any.
    pub fn negotiated_format(&self, from_id: &str, to_id: &str) -> Option<String> {
        let from = self.catalog.get(from_id)?;
        let to = self.catalog.get(to_id)?;
        from.shared_formats(to).first().map(|s| s.to_string())
    }
}

pub fn resolve_descriptors(from: &ModuleDescriptor, to: &ModuleDescriptor) -> CompatibilityResult {
    let shared = from.shared_formats(to);
    let message = if shared.is_empty() {
        format!(
            "{} outputs [{}] but {} accepts [{}]; no shared format",
            from.name,
            from.outputs.join(", "),
            to.name,
            to.inputs.join(", ")
        )
    } else {
        format!("Compatible via {}", shared.join(", "))
    };
    CompatibilityResult {
        valid: !shared.is_empty(),
        message,
        learning_note: learning_note(from, to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::descriptor::tests::descriptor;
    use crate::core::compatibility::notes::{curated_note, generic_note};

    fn small_catalog() -> ModuleCatalog {
        ModuleCatalog::new(vec![
            descriptor("seq", &["fasta"], &["fasta"], false),
            descriptor("fold", &["fasta"], &["pdb", "pae"], true),
            descriptor("qc", &["pdb", "pae"], &["report"], false),
            descriptor("tree", &["msa"], &["newick"], false),
        ])
        .unwrap()
    }

    #[test]
    fn intersecting_formats_are_valid() {
        let catalog = small_catalog();
        let resolver = CompatibilityResolver::new(&catalog);
        let result = resolver.resolve("fold", "qc");
        assert!(result.valid);
        assert_eq!(result.message, "Compatible via pdb, pae");
    }

    #[test]
    fn disjoint_formats_are_invalid_with_explicit_mismatch() {
        let catalog = small_catalog();
        let resolver = CompatibilityResolver::new(&catalog);
        let result = resolver.resolve("fold", "tree");
        assert!(!result.valid);
        assert!(result.message.contains("outputs [pdb, pae]"));
        assert!(result.message.contains("accepts [msa]"));
    }

    #[test]
    fn resolution_is_directional() {
        let catalog = small_catalog();
        let resolver = CompatibilityResolver::new(&catalog);
        assert!(resolver.resolve("fold", "qc").valid);
        assert!(!resolver.resolve("qc", "fold").valid);
    }

    #[test]
    fn unknown_module_is_reported_as_data_not_fault() {
        let catalog = small_catalog();
        let resolver = CompatibilityResolver::new(&catalog);
        for (from, to) in [("ghost", "qc"), ("fold", "ghost"), ("ghost", "ghost")] {
            let result = resolver.resolve(from, to);
            assert!(!result.valid);
            assert_eq!(result.message, MODULE_NOT_FOUND);
            assert!(result.learning_note.is_empty());
            assert!(result.is_not_found());
        }
    }

    #[test]
    fn curated_annotation_overrides_generic_one() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let resolver = CompatibilityResolver::new(&catalog);
        let result = resolver.resolve("rfdiffusion", "proteinmpnn");
        assert!(result.valid);
        assert_eq!(
            result.learning_note,
            curated_note("rfdiffusion", "proteinmpnn").unwrap()
        );
        let generic = generic_note(
            catalog.get("rfdiffusion").unwrap(),
            catalog.get("proteinmpnn").unwrap(),
        );
        assert_ne!(result.learning_note, generic);
    }

    #[test]
    fn validity_matches_format_intersection_for_every_builtin_pair() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let resolver = CompatibilityResolver::new(&catalog);
        for from in catalog.iter() {
            for to in catalog.iter() {
                let intersects = from.outputs.iter().any(|f| to.inputs.contains(f));
                assert_eq!(
                    resolver.resolve(&from.id, &to.id).valid,
                    intersects,
                    "{} -> {}",
                    from.id,
                    to.id
                );
            }
        }
    }

    #[test]
    fn upstream_candidates_exclude_self_and_keep_catalog_order() {
        let catalog = small_catalog();
        let resolver = CompatibilityResolver::new(&catalog);
        let upstream: Vec<_> = resolver
            .compatible_modules("fold", Direction::Upstream)
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(upstream, vec!["seq"]);

        let seq_downstream: Vec<_> = resolver
            .compatible_modules("seq", Direction::Downstream)
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(seq_downstream, vec!["fold"]);
    }

    #[test]
    fn downstream_candidates_of_unknown_module_are_empty() {
        let catalog = small_catalog();
        let resolver = CompatibilityResolver::new(&catalog);
        assert!(resolver
            .compatible_modules("ghost", Direction::Downstream)
            .is_empty());
    }

    #[test]
    fn negotiated_format_is_first_shared_output() {
        let catalog = small_catalog();
        let resolver = CompatibilityResolver::new(&catalog);
        assert_eq!(resolver.negotiated_format("fold", "qc").as_deref(), Some("pdb"));
        assert_eq!(resolver.negotiated_format("fold", "tree"), None);
    }

    #[test]
    fn direction_parses_from_common_spellings() {
        assert_eq!("Upstream".parse::<Direction>(), Ok(Direction::Upstream));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Downstream));
        assert!("sideways".parse::<Direction>().is_err());
    }
}

use crate::core::catalog::registry::ModuleCatalog;
use crate::core::compatibility::resolver::CompatibilityResolver;
use crate::core::pipeline::{EdgeCheck, PipelineReport};
use crate::engine::error::EngineError;
use indexmap::IndexSet;
use tracing::{debug, info, instrument};

/// Resolves every adjacent pair of `module_ids`.
///
/// The report is valid only when every identifier is known and every edge is
/// compatible. Unknown identifiers are listed once each, in order of appearance.
#[instrument(skip(catalog), name = "validate_workflow")]
pub fn run(catalog: &ModuleCatalog, module_ids: &[String]) -> Result<PipelineReport, EngineError> {
    let ids: Vec<&str> = module_ids.iter().map(|id| id.trim()).collect();
    if ids.is_empty() || ids.iter().any(|id| id.is_empty()) {
        return Err(EngineError::Validation { field: "module_ids" });
    }

    let resolver = CompatibilityResolver::new(catalog);
    let edges: Vec<EdgeCheck> = ids
        .windows(2)
        .enumerate()
        .map(|(source, pair)| EdgeCheck {
            source,
            target: source + 1,
            from_id: pair[0].to_string(),
            to_id: pair[1].to_string(),
            result: resolver.resolve(pair[0], pair[1]),
        })
        .collect();

    let unknown_modules: Vec<String> = ids
        .iter()
        .filter(|id| !catalog.contains(id))
        .map(|id| id.to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    let requires_gpu = ids
        .iter()
        .filter_map(|id| catalog.get(id))
        .any(|descriptor| descriptor.requires_gpu());

    let valid = unknown_modules.is_empty() && edges.iter().all(|edge| edge.result.valid);
    for edge in edges.iter().filter(|edge| !edge.result.valid) {
        debug!(from = %edge.from_id, to = %edge.to_id, "Incompatible edge: {}", edge.result.message);
    }
    info!(modules = ids.len(), valid, "Validated pipeline.");

    Ok(PipelineReport {
        valid,
        edges,
        unknown_modules,
        requires_gpu,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compatibility::resolver::MODULE_NOT_FOUND;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn compatible_chain_is_valid() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let report = run(&catalog, &ids(&["rfdiffusion", "proteinmpnn", "esmfold"])).unwrap();
        assert!(report.valid);
        assert_eq!(report.edges.len(), 2);
        assert!(report.requires_gpu);
        assert!(report.unknown_modules.is_empty());
    }

    #[test]
    fn incompatible_edge_invalidates_report() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let report = run(&catalog, &ids(&["foldx", "gromacs-md"])).unwrap();
        assert!(!report.valid);
        assert!(!report.edges[0].result.valid);
        assert!(!report.edges[0].result.learning_note.is_empty());
    }

    #[test]
    fn unknown_modules_are_listed_once() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let report = run(&catalog, &ids(&["ghost", "esmfold", "ghost"])).unwrap();
        assert!(!report.valid);
        assert_eq!(report.unknown_modules, vec!["ghost"]);
        assert_eq!(report.edges[0].result.message, MODULE_NOT_FOUND);
    }

    #[test]
    fn single_module_has_no_edges() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let report = run(&catalog, &ids(&["foldx"])).unwrap();
        assert!(report.valid);
        assert!(report.edges.is_empty());
        assert!(!report.requires_gpu);
    }

    #[test]
    fn empty_list_is_rejected() {
        let catalog = ModuleCatalog::builtin().unwrap();
        assert!(run(&catalog, &[]).unwrap_err().is_validation());
        assert!(run(&catalog, &ids(&["esmfold", "  "])).unwrap_err().is_validation());
    }
}

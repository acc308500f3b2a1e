use crate::core::catalog::registry::ModuleCatalog;
use crate::core::compatibility::resolver::CompatibilityResolver;
use crate::core::pipeline::{Constraints, PipelineDraft, PipelineEdge, PipelineNode, Provenance};
use crate::core::suggestion;
use crate::engine::config::ComposerConfig;
use crate::engine::error::{EngineError, require_non_empty};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reasoning::prompt::{SYSTEM_PROMPT, build_user_prompt};
use crate::engine::reasoning::response::{AiComposition, ResponseError, parse_response};
use crate::engine::reasoning::{ReasoningClient, ReasoningError};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

const MAX_NAME_CHARS: usize = 60;

#[derive(Debug, Clone, Default)]
pub struct ComposeRequest {
    pub goal: String,
    pub constraints: Constraints,
    pub use_reasoning: bool,
}

/// Why the reasoning path was abandoned. Every variant leads to the heuristic path.
#[derive(Debug, Error)]
enum FallbackReason {
    #[error("reasoning service failed: {0}")]
    Reasoning(#[from] ReasoningError),
    #[error("unusable reasoning response: {0}")]
    Response(#[from] ResponseError),
}

/// Composes a pipeline for `request.goal`.
///
/// With reasoning requested and a client supplied, the client is asked once; any
/// failure or unusable reply degrades to the heuristic path with a warning on the
/// draft. The only error surfaced to callers is an empty goal (or an internal
/// catalog inconsistency).
#[instrument(skip_all, name = "compose_workflow")]
pub async fn run(
    request: &ComposeRequest,
    catalog: &ModuleCatalog,
    config: &ComposerConfig,
    reasoning: Option<&dyn ReasoningClient>,
    reporter: &ProgressReporter<'_>,
) -> Result<PipelineDraft, EngineError> {
    let goal = require_non_empty(&request.goal, "goal")?;
    info!(goal, use_reasoning = request.use_reasoning, "Composing pipeline.");

    let mut degraded = Vec::new();
    match (request.use_reasoning, reasoning) {
        (true, Some(client)) => {
            reporter.report(Progress::PhaseStart {
                name: "Consulting reasoning service",
            });
            let attempt = compose_with_reasoning(goal, &request.constraints, catalog, config, client).await;
            reporter.report(Progress::PhaseFinish);
            match attempt {
                Ok(draft) => {
                    info!(modules = draft.nodes.len(), "Reasoning service produced a pipeline.");
                    return Ok(draft);
                }
                Err(reason) => {
                    warn!(%reason, "Falling back to heuristic composition.");
                    reporter.report(Progress::Message(format!("Falling back: {reason}")));
                    degraded.push(format!(
                        "AI composition unavailable ({reason}); used keyword-based suggestions instead."
                    ));
                }
            }
        }
        (true, None) => debug!("No reasoning client configured; using heuristic composition."),
        (false, _) => {}
    }

    reporter.report(Progress::PhaseStart {
        name: "Composing from keywords",
    });
    let mut draft = compose_fallback(goal, &request.constraints, catalog, config)?;
    reporter.report(Progress::PhaseFinish);

    degraded.append(&mut draft.warnings);
    draft.warnings = degraded;
    Ok(draft)
}

async fn compose_with_reasoning(
    goal: &str,
    constraints: &Constraints,
    catalog: &ModuleCatalog,
    config: &ComposerConfig,
    client: &dyn ReasoningClient,
) -> Result<PipelineDraft, FallbackReason> {
    let prompt = build_user_prompt(goal, constraints, catalog);
    let reply = client.complete(SYSTEM_PROMPT, &prompt).await?;
    if reply.trim().is_empty() {
        return Err(ReasoningError::EmptyResponse.into());
    }
    let composition = parse_response(&reply, catalog)?;
    Ok(draft_from_composition(goal, composition, constraints, catalog, config))
}

fn draft_from_composition(
    goal: &str,
    composition: AiComposition,
    constraints: &Constraints,
    catalog: &ModuleCatalog,
    config: &ComposerConfig,
) -> PipelineDraft {
    let mut warnings = composition.warnings;

    let mut picked: Vec<_> = composition
        .modules
        .into_iter()
        .filter_map(|module| catalog.get(module.id.trim()).map(|d| (d, module.reasoning)))
        .collect();
    if constraints.gpu_available == Some(false) {
        picked = filter_gpu(picked, |(d, _)| d.id.as_str(), catalog, &mut warnings);
    }
    truncate_to_limit(&mut picked, constraints, &mut warnings);

    let nodes: Vec<PipelineNode> = picked
        .into_iter()
        .enumerate()
        .map(|(i, (descriptor, reasoning))| {
            PipelineNode::from_descriptor(descriptor, config.position_for(i), reasoning)
        })
        .collect();

    let (edges, mut edge_warnings) = connect(&nodes, catalog);
    warnings.append(&mut edge_warnings);

    let confidence = composition
        .confidence
        .filter(|c| c.is_finite())
        .unwrap_or(config.min_ai_confidence)
        .clamp(config.min_ai_confidence, 1.0);

    PipelineDraft {
        name: composition
            .workflow_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| default_name(goal)),
        description: composition
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("AI-composed pipeline for: {goal}")),
        nodes,
        edges,
        confidence,
        warnings,
        clarifying_question: composition
            .clarifying_question
            .filter(|q| !q.trim().is_empty()),
        provenance: Provenance::Ai,
    }
}

/// Deterministic, keyword-driven composition. Identical input always yields an
/// identical draft.
pub fn compose_fallback(
    goal: &str,
    constraints: &Constraints,
    catalog: &ModuleCatalog,
    config: &ComposerConfig,
) -> Result<PipelineDraft, EngineError> {
    let goal = require_non_empty(goal, "goal")?;
    let mut warnings = Vec::new();

    let mut candidates = suggestion::suggest(goal);
    candidates.retain(|id| catalog.contains(id));
    if candidates.is_empty() {
        debug!(default = %config.default_module, "No keyword matched; using default module.");
        if !catalog.contains(&config.default_module) {
            return Err(EngineError::Internal(format!(
                "default module '{}' is not in the catalog",
                config.default_module
            )));
        }
        candidates.push(config.default_module.clone());
        warnings.push(
            "No topic keywords recognised in the goal; starting from a general-purpose module."
                .to_string(),
        );
    }

    let mut selected = if constraints.gpu_available == Some(false) {
        filter_gpu(candidates, String::as_str, catalog, &mut warnings)
    } else {
        candidates
    };
    truncate_to_limit(&mut selected, constraints, &mut warnings);

    let nodes: Vec<PipelineNode> = selected
        .iter()
        .filter_map(|id| catalog.get(id))
        .enumerate()
        .map(|(i, descriptor)| PipelineNode::from_descriptor(descriptor, config.position_for(i), None))
        .collect();

    let (edges, mut edge_warnings) = connect(&nodes, catalog);
    warnings.append(&mut edge_warnings);

    Ok(PipelineDraft {
        name: default_name(goal),
        description: format!(
            "Suggested from keywords in the goal. Review each step before running: {goal}"
        ),
        nodes,
        edges,
        confidence: config.fallback_confidence,
        warnings,
        clarifying_question: None,
        provenance: Provenance::Fallback,
    })
}

/// Removes GPU-bound modules. If nothing survives, keeps the first two original
/// candidates so the user still gets a pipeline.
fn filter_gpu<T>(
    candidates: Vec<T>,
    id_of: impl Fn(&T) -> &str,
    catalog: &ModuleCatalog,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    let total = candidates.len();
    let (cpu_only, gpu_bound): (Vec<T>, Vec<T>) = candidates
        .into_iter()
        .partition(|c| catalog.get(id_of(c)).is_some_and(|d| !d.requires_gpu()));

    if cpu_only.is_empty() {
        warnings.push(
            "Every suggested module needs a GPU; kept the first two so the pipeline is not empty."
                .to_string(),
        );
        return gpu_bound.into_iter().take(2).collect();
    }

    let removed = total - cpu_only.len();
    if removed > 0 {
        warnings.push(format!("Removed {removed} GPU-dependent module(s)."));
    }
    cpu_only
}

fn truncate_to_limit<T>(selected: &mut Vec<T>, constraints: &Constraints, warnings: &mut Vec<String>) {
    if let Some(max) = constraints.max_modules.filter(|&m| m > 0) {
        if selected.len() > max {
            selected.truncate(max);
            warnings.push(format!("Pipeline truncated to {max} module(s)."));
        }
    }
}

/// Edges between consecutive nodes. Only compatible pairs get an edge; each
/// incompatible pair is reported as a warning instead.
fn connect(nodes: &[PipelineNode], catalog: &ModuleCatalog) -> (Vec<PipelineEdge>, Vec<String>) {
    let resolver = CompatibilityResolver::new(catalog);
    let mut edges = Vec::new();
    let mut warnings = Vec::new();

    for (source, pair) in nodes.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let result = resolver.resolve(&from.module_id, &to.module_id);
        if !result.valid {
            warnings.push(format!("{} → {}: {}", from.module_id, to.module_id, result.message));
            continue;
        }
        let Some(data_type) = resolver.negotiated_format(&from.module_id, &to.module_id) else {
            continue;
        };
        edges.push(PipelineEdge {
            source,
            target: source + 1,
            data_type,
            learning_note: result.learning_note,
            valid: true,
        });
    }
    (edges, warnings)
}

fn default_name(goal: &str) -> String {
    let name = format!("Pipeline for: {goal}");
    if name.chars().count() <= MAX_NAME_CHARS {
        return name;
    }
    let truncated: String = name.chars().take(MAX_NAME_CHARS - 1).collect();
    format!("{}…", truncated.trim_end())
}

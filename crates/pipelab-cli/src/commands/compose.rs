use crate::cli::{ComposeArgs, ReasoningToggle};
use crate::config::{AppConfig, ReasoningSettings};
use crate::error::Result;
use crate::reasoning::HttpReasoningClient;
use crate::utils::progress::CliProgressHandler;
use pipelab::core::pipeline::{Constraints, PipelineDraft, Provenance};
use pipelab::engine::reasoning::ReasoningClient;
use pipelab::workflows::compose::{self, ComposeRequest};
use tracing::info;

pub async fn run(args: ComposeArgs, config: &AppConfig) -> Result<()> {
    let catalog = super::load_catalog(config)?;

    let settings = reasoning_settings(&config.reasoning, args.reasoning);
    let client = HttpReasoningClient::from_settings(&settings)?;

    let request = ComposeRequest {
        goal: args.goal.join(" "),
        constraints: Constraints {
            gpu_available: args.no_gpu.then_some(false),
            max_modules: args.max_modules,
            notes: args.notes,
        },
        use_reasoning: settings.enabled,
    };

    let reporter = CliProgressHandler::new(!args.json).reporter();

    info!("Invoking the pipeline composition workflow...");
    let draft = compose::run(
        &request,
        &catalog,
        &config.composer,
        client.as_ref().map(|c| c as &dyn ReasoningClient),
        &reporter,
    )
    .await?;

    if args.json {
        let json = serde_json::to_string_pretty(&draft).map_err(anyhow::Error::from)?;
        println!("{}", json);
    } else {
        print!("{}", render(&draft));
    }
    Ok(())
}

/// Applies `--ai` / `--no-ai` on top of the configured setting.
fn reasoning_settings(configured: &ReasoningSettings, toggle: ReasoningToggle) -> ReasoningSettings {
    let mut settings = configured.clone();
    if toggle.ai {
        settings.enabled = true;
    } else if toggle.no_ai {
        settings.enabled = false;
    }
    settings
}

fn render(draft: &PipelineDraft) -> String {
    let origin = match draft.provenance {
        Provenance::Ai => "AI-composed",
        Provenance::Fallback => "keyword heuristic",
    };
    let mut out = format!(
        "{}\n  {}\n  Source: {} (confidence {:.2})\n\n",
        draft.name, draft.description, origin, draft.confidence
    );

    for (index, node) in draft.nodes.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} ({}) [{}] -> [{}]\n",
            index + 1,
            node.name,
            node.module_id,
            node.inputs.join(", "),
            node.outputs.join(", ")
        ));
        if let Some(reasoning) = &node.reasoning {
            out.push_str(&format!("     why: {}\n", reasoning));
        }
        if let Some(edge) = draft.edges.iter().find(|e| e.source == index) {
            out.push_str(&format!("     ↓ {}\n", edge.data_type));
        }
    }

    if !draft.edges.is_empty() {
        out.push_str("\nConnections:\n");
        for edge in &draft.edges {
            let from = &draft.nodes[edge.source].module_id;
            let to = &draft.nodes[edge.target].module_id;
            out.push_str(&format!("  {} → {} ({}): {}\n", from, to, edge.data_type, edge.learning_note));
        }
    }
    if !draft.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &draft.warnings {
            out.push_str(&format!("  ⚠ {}\n", warning));
        }
    }
    if let Some(question) = &draft.clarifying_question {
        out.push_str(&format!("\nTo refine this pipeline: {}\n", question));
    }
    out
}

use crate::core::catalog::registry::ModuleCatalog;
use crate::core::pipeline::Constraints;
use std::fmt::Write;

pub const SYSTEM_PROMPT: &str = r#"You are an expert computational biologist helping a student assemble an analysis pipeline.
Choose modules ONLY from the catalog provided by the user, identified by their exact `id`.
Order the modules so that each module's outputs can feed the next module's inputs.

OUTPUT FORMAT (JSON only, no explanation outside the JSON):
{
  "workflow_name": "short descriptive name",
  "description": "one or two sentences on what the pipeline achieves",
  "modules": [
    {"id": "catalog module id", "reasoning": "why this step is needed here"}
  ],
  "confidence": 0.0-1.0,
  "warnings": ["caveats the student should know about"],
  "clarifying_question": "a question to ask if the goal is ambiguous, or null"
}

Rules:
- Use between 1 and 6 modules.
- Never invent module ids.
- Respect the stated constraints; if GPU is unavailable prefer CPU modules and explain any exception in warnings.
"#;

/// User prompt carrying the goal, the constraints and the full catalog.
pub fn build_user_prompt(goal: &str, constraints: &Constraints, catalog: &ModuleCatalog) -> String {
    let mut prompt = String::with_capacity(256 + catalog.len() * 160);

    let _ = writeln!(prompt, "RESEARCH GOAL:\n{}\n", goal.trim());

    prompt.push_str("CONSTRAINTS:\n");
    match constraints.gpu_available {
        Some(true) => prompt.push_str("- GPU: available\n"),
        Some(false) => prompt.push_str("- GPU: NOT available\n"),
        None => prompt.push_str("- GPU: unspecified\n"),
    }
    if let Some(max) = constraints.max_modules {
        let _ = writeln!(prompt, "- At most {max} modules");
    }
    if let Some(notes) = constraints.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(prompt, "- Notes: {}", notes.trim());
    }

    prompt.push_str("\nMODULE CATALOG:\n");
    for module in catalog.iter() {
        let _ = writeln!(
            prompt,
            "- id: {} | name: {} | category: {} | inputs: [{}] | outputs: [{}] | gpu: {}",
            module.id,
            module.name,
            module.category,
            module.inputs.join(", "),
            module.outputs.join(", "),
            if module.requires_gpu() { "required" } else { "no" },
        );
    }

    prompt.push_str("\nRespond with the JSON object only.");
    prompt
}

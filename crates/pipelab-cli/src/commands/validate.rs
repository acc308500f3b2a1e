use crate::cli::ValidateArgs;
use crate::config::AppConfig;
use crate::error::Result;
use pipelab::core::pipeline::PipelineReport;
use pipelab::workflows::validate;

pub fn run(args: ValidateArgs, config: &AppConfig) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let report = validate::run(&catalog, &args.modules)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
        println!("{}", json);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

fn render(report: &PipelineReport) -> String {
    let mut out = String::new();
    for edge in &report.edges {
        let mark = if edge.result.valid { "✓" } else { "✗" };
        out.push_str(&format!(
            "{} {} → {}: {}\n",
            mark, edge.from_id, edge.to_id, edge.result.message
        ));
    }
    if !report.unknown_modules.is_empty() {
        out.push_str(&format!(
            "Unknown modules: {}\n",
            report.unknown_modules.join(", ")
        ));
    }
    if report.requires_gpu {
        out.push_str("Note: at least one module requires a GPU.\n");
    }
    out.push_str(if report.valid {
        "Pipeline is valid.\n"
    } else {
        "Pipeline has problems.\n"
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipelab::core::catalog::registry::ModuleCatalog;

    #[test]
    fn render_marks_each_edge() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let ids: Vec<String> = ["proteinmpnn", "esmfold", "iqtree"].iter().map(|s| s.to_string()).collect();
        let report = validate::run(&catalog, &ids).unwrap();
        let text = render(&report);
        assert!(text.contains("✓ proteinmpnn → esmfold"));
        assert!(text.contains("✗ esmfold → iqtree"));
        assert!(text.ends_with("Pipeline has problems.\n"));
    }
}

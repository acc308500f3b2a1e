use crate::cli::{CatalogArgs, CatalogCommands};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use pipelab::core::catalog::descriptor::ModuleDescriptor;
use pipelab::core::catalog::registry::ModuleCatalog;

pub fn run(args: CatalogArgs, config: &AppConfig) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    match args.command {
        CatalogCommands::List { category } => {
            let modules: Vec<&ModuleDescriptor> = match category {
                Some(category) => catalog.by_category(category).collect(),
                None => catalog.iter().collect(),
            };
            if modules.is_empty() {
                println!("No modules in this category.");
            }
            for module in modules {
                println!("{}", summary_line(module));
            }
            Ok(())
        }
        CatalogCommands::Show { id } => {
            let module = find(&catalog, &id)?;
            print!("{}", details(module));
            Ok(())
        }
    }
}

pub(crate) fn find<'a>(catalog: &'a ModuleCatalog, id: &str) -> Result<&'a ModuleDescriptor> {
    catalog
        .get(id.trim())
        .ok_or_else(|| CliError::Argument(format!("Unknown module '{}'. Try 'pipelab catalog list'.", id)))
}

fn summary_line(module: &ModuleDescriptor) -> String {
    format!(
        "{:<14} {:<10} [{}] -> [{}]{}",
        module.id,
        module.category,
        module.inputs.join(", "),
        module.outputs.join(", "),
        if module.requires_gpu() { "  (GPU)" } else { "" }
    )
}

fn details(module: &ModuleDescriptor) -> String {
    let mut out = format!(
        "{} ({})\n  Category: {}\n  Inputs:   {}\n  Outputs:  {}\n  Compute:  {}, {}\n",
        module.name,
        module.id,
        module.category,
        module.inputs.join(", "),
        module.outputs.join(", "),
        if module.requires_gpu() { "GPU required" } else { "CPU" },
        module.compute.time_estimate,
    );
    let learning = &module.learning;
    if !learning.summary.is_empty() {
        out.push_str(&format!("\n  {}\n", learning.summary));
    }
    if !learning.prerequisites.is_empty() {
        out.push_str(&format!("\n  Prerequisites: {}\n", learning.prerequisites.join(", ")));
    }
    if !learning.common_mistakes.is_empty() {
        out.push_str("\n  Common mistakes:\n");
        for mistake in &learning.common_mistakes {
            out.push_str(&format!("    - {}\n", mistake));
        }
    }
    out
}

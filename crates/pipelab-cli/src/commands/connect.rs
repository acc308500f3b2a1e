use crate::cli::{ConnectArgs, NeighborsArgs};
use crate::config::AppConfig;
use crate::error::Result;
use pipelab::core::compatibility::resolver::CompatibilityResolver;
use tracing::info;

pub fn run(args: ConnectArgs, config: &AppConfig) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let resolver = CompatibilityResolver::new(&catalog);
    let result = resolver.resolve(args.from.trim(), args.to.trim());
    info!("Resolved {} -> {}: valid = {}", args.from, args.to, result.valid);

    let mark = if result.valid { "✓" } else { "✗" };
    println!("{} {} → {}: {}", mark, args.from, args.to, result.message);
    if !result.learning_note.is_empty() {
        println!("\n  {}", result.learning_note);
    }
    Ok(())
}

pub fn neighbors(args: NeighborsArgs, config: &AppConfig) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let module = super::catalog::find(&catalog, &args.id)?;
    let resolver = CompatibilityResolver::new(&catalog);
    let neighbours = resolver.compatible_modules(&module.id, args.direction);

    if neighbours.is_empty() {
        println!("No {} modules connect to {}.", args.direction, module.id);
        return Ok(());
    }
    println!("{} modules for {}:", args.direction, module.id);
    for other in neighbours {
        println!("  {:<14} {}", other.id, other.name);
    }
    Ok(())
}

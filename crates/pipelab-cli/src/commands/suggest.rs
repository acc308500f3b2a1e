use crate::cli::SuggestArgs;
use crate::config::AppConfig;
use crate::error::Result;
use pipelab::core::suggestion;

pub fn run(args: SuggestArgs, config: &AppConfig) -> Result<()> {
    let goal = args.goal.join(" ");
    let catalog = super::load_catalog(config)?;

    let topics = suggestion::matched_topics(&goal);
    if topics.is_empty() {
        println!("No topic keywords recognised in the goal.");
        return Ok(());
    }
    let names: Vec<&str> = topics.iter().map(|t| t.label()).collect();
    println!("Matched topics: {}", names.join(", "));

    for (position, id) in suggestion::suggest(&goal).iter().enumerate() {
        let name = catalog.get(id).map(|m| m.name.as_str()).unwrap_or("not in catalog");
        println!("  {}. {:<14} {}", position + 1, id, name);
    }
    Ok(())
}

mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;
mod reasoning;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 PipeLab CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = config::build_config(cli.config.as_deref(), &cli.set_values)?;

    let command_result = match cli.command {
        Commands::Catalog(args) => {
            info!("Dispatching to 'catalog' command.");
            commands::catalog::run(args, &config)
        }
        Commands::Connect(args) => {
            info!("Dispatching to 'connect' command.");
            commands::connect::run(args, &config)
        }
        Commands::Neighbors(args) => {
            info!("Dispatching to 'neighbors' command.");
            commands::connect::neighbors(args, &config)
        }
        Commands::Suggest(args) => {
            info!("Dispatching to 'suggest' command.");
            commands::suggest::run(args, &config)
        }
        Commands::Compose(args) => {
            info!("Dispatching to 'compose' command.");
            commands::compose::run(args, &config).await
        }
        Commands::Validate(args) => {
            info!("Dispatching to 'validate' command.");
            commands::validate::run(args, &config)
        }
        Commands::Mastery(args) => {
            info!("Dispatching to 'mastery' command.");
            commands::mastery::run(args, &config)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}

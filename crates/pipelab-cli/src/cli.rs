use clap::{Args, Parser, Subcommand};
use pipelab::core::catalog::descriptor::Category;
use pipelab::core::compatibility::resolver::Direction;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "PipeLab Contributors",
    version,
    about = "PipeLab CLI - Compose, check and learn computational-biology pipelines from the command line.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S composer.default-module=alphafold2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true, action = clap::ArgAction::Append)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the module catalog.
    Catalog(CatalogArgs),
    /// Check whether one module's outputs can feed another module's inputs.
    Connect(ConnectArgs),
    /// List modules that can feed, or be fed by, a module.
    Neighbors(NeighborsArgs),
    /// Suggest modules for a research goal using the keyword table.
    Suggest(SuggestArgs),
    /// Compose a pipeline for a research goal.
    Compose(ComposeArgs),
    /// Validate a pipeline assembled by hand, edge by edge.
    Validate(ValidateArgs),
    /// Record learning signals and inspect skill levels.
    Mastery(MasteryArgs),
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List modules, optionally restricted to one category.
    List {
        #[arg(long, value_name = "CATEGORY")]
        category: Option<Category>,
    },
    /// Show the full descriptor of one module.
    Show {
        #[arg(required = true)]
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Upstream module identifier.
    pub from: String,
    /// Downstream module identifier.
    pub to: String,
}

#[derive(Args, Debug)]
pub struct NeighborsArgs {
    pub id: String,

    /// `upstream` lists producers this module can consume from; `downstream` lists consumers.
    #[arg(short, long, default_value = "downstream")]
    pub direction: Direction,
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Free-text research goal.
    #[arg(required = true, num_args = 1..)]
    pub goal: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Free-text research goal.
    #[arg(required = true, num_args = 1..)]
    pub goal: Vec<String>,

    /// Assume no GPU is available.
    #[arg(long)]
    pub no_gpu: bool,

    /// Keep at most this many modules.
    #[arg(long, value_name = "INT")]
    pub max_modules: Option<usize>,

    /// Extra context passed to the reasoning service.
    #[arg(long, value_name = "TEXT")]
    pub notes: Option<String>,

    #[command(flatten)]
    pub reasoning: ReasoningToggle,

    /// Print the draft as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Mutually exclusive flags overriding `reasoning.enabled`.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct ReasoningToggle {
    /// Ask the reasoning service even if the config file disables it.
    #[arg(long)]
    pub ai: bool,
    /// Use only the keyword heuristic.
    #[arg(long)]
    pub no_ai: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Module identifiers in pipeline order.
    #[arg(required = true, num_args = 1..)]
    pub modules: Vec<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MasteryArgs {
    /// Override the mastery store location.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: MasteryCommands,
}

#[derive(Args, Debug, Clone)]
pub struct MasteryTarget {
    #[arg(short, long, required = true)]
    pub user: String,
    #[arg(short, long, required = true)]
    pub module: String,
}

#[derive(Subcommand, Debug)]
pub enum MasteryCommands {
    /// Record that a concept was explored.
    Explore {
        #[command(flatten)]
        target: MasteryTarget,
        concept: String,
    },
    /// Record that an insight was unlocked.
    Insight {
        #[command(flatten)]
        target: MasteryTarget,
        insight: String,
    },
    /// Record a completed exercise.
    Exercise {
        #[command(flatten)]
        target: MasteryTarget,
        exercise: String,
    },
    /// Record an answered question.
    Question {
        #[command(flatten)]
        target: MasteryTarget,
    },
    /// Grade a quiz file against the given answers and record the score.
    Quiz {
        #[command(flatten)]
        target: MasteryTarget,
        /// TOML file with `[[question]]` entries (prompt, options, correct-index).
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
        /// Zero-based answer indices, comma separated (e.g. 0,2,1).
        #[arg(long, value_name = "LIST")]
        answers: String,
    },
    /// Re-evaluate the skill level without recording a signal.
    Evaluate {
        #[command(flatten)]
        target: MasteryTarget,
    },
    /// Show mastery records for a user.
    Show {
        #[arg(short, long, required = true)]
        user: String,
        #[arg(short, long)]
        module: Option<String>,
    },
}

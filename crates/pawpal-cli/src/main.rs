use clap::{Parser, Subcommand};
use pawpal_core::PlannerConfig;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pawpal", version, about = "PawPal pet care planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through planning on a built-in household
    Demo,
    /// Generate the daily plan and its explanation
    Plan(commands::plan::PlanArgs),
    /// List tasks ordered by time label
    Sort(commands::HouseholdArgs),
    /// Filter tasks by completion status and pet name
    Filter(commands::view::FilterArgs),
    /// Show overlapping dated tasks
    Conflicts(commands::HouseholdArgs),
    /// Complete a task and show its next occurrence
    Complete(commands::view::CompleteArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    // The log level lives in the config, so a load failure is reported only
    // once the subscriber exists.
    let (config, load_error) = match PlannerConfig::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (PlannerConfig::default(), Some(e)),
    };
    init_tracing(&config.logging.level);
    if let Some(e) = load_error {
        tracing::warn!("using default planner config: {e}");
    }

    let result = match cli.command {
        Commands::Demo => commands::demo::run(&config),
        Commands::Plan(args) => commands::plan::run(args, &config),
        Commands::Sort(args) => commands::view::sort(args, &config),
        Commands::Filter(args) => commands::view::filter(args, &config),
        Commands::Conflicts(args) => commands::view::conflicts(args, &config),
        Commands::Complete(args) => commands::view::complete(args, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

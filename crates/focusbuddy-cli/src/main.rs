use clap::{Parser, Subcommand};

mod commands;
mod host;
mod render;

#[derive(Parser)]
#[command(name = "focusbuddy", version, about = "FocusBuddy focus/break timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a focus session (or a break) in the terminal
    Run(commands::run::RunArgs),
    /// Print a summary of the current statistics as JSON
    Status,
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Export settings and statistics to a JSON file
    Export {
        /// Output path (defaults to focusbuddy-data-<date>.json)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Import settings and statistics from an exported JSON file
    Import {
        path: std::path::PathBuf,
    },
    /// Delete all settings and statistics
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let host = host::HostConfig::load_or_default();
    init_tracing(&host.log_filter);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &host),
        Commands::Status => commands::data::status(&host),
        Commands::Config { action } => commands::config::run(action, &host),
        Commands::Stats { action } => commands::stats::run(action, &host),
        Commands::Export { out } => commands::data::export(out, &host),
        Commands::Import { path } => commands::data::import(&path, &host),
        Commands::Reset { yes } => commands::data::reset(yes, &host),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

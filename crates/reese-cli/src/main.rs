//! Reese CLI - render audio files through the Reese bass processor.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reese")]
#[command(author, version, about = "Reese bass processor CLI", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the Reese chain
    Process(commands::process::ProcessArgs),

    /// Generate a test signal
    Generate(commands::generate::GenerateArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),

    /// List the ten parameters with ranges and defaults
    Params(commands::params::ParamsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}

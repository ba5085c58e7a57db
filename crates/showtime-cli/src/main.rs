//! Showtime CLI - headless driver for the showtime live dataflow editor.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showtime")]
#[command(author, version, about = "Beat-clocked live dataflow graphs", long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the frame loop on a saved graph
    Run(commands::run::RunArgs),

    /// Evaluate a saved graph for a number of ticks
    Tick(commands::tick::TickArgs),

    /// List the nodes and wires of a saved graph
    Inspect(commands::inspect::InspectArgs),

    /// Write an example graph
    Demo(commands::demo::DemoArgs),

    /// Replay an editing script
    Script(commands::script::ScriptArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = commands::common::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => commands::run::run(args, settings),
        Commands::Tick(args) => commands::tick::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Demo(args) => commands::demo::run(args, settings),
        Commands::Script(args) => commands::script::run(args, settings),
    }
}

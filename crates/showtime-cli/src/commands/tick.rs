//! Offline evaluation command.

use std::path::PathBuf;

use clap::Args;
use showtime_config::save_graph;

use super::common::{load_state, print_graph};

#[derive(Args)]
pub struct TickArgs {
    /// Saved state file
    state: PathBuf,

    /// Number of ticks to evaluate
    #[arg(short = 'n', long, default_value = "1")]
    count: u64,

    /// Write the evaluated graph here
    #[arg(long)]
    save: Option<PathBuf>,
}

pub fn run(args: TickArgs) -> anyhow::Result<()> {
    let mut graph = load_state(&args.state)?;
    for _ in 0..args.count {
        graph.tick();
    }

    println!("After {} tick(s):", args.count);
    print_graph(&graph);

    if let Some(path) = &args.save {
        save_graph(&graph, path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

//! Saved-state inspection command.

use std::path::PathBuf;

use clap::Args;

use super::common::{load_state, print_graph};

#[derive(Args)]
pub struct InspectArgs {
    /// Saved state file
    state: PathBuf,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let graph = load_state(&args.state)?;
    println!("{}", args.state.display());
    print_graph(&graph);
    Ok(())
}

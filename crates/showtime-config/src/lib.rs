//! Persistence and settings for the showtime dataflow editor.
//!
//! - **State**: save a [`Graph`](showtime_core::Graph) to a JSON document and
//!   rebuild it, skipping entries it does not recognize
//! - **Settings**: tempo, state file location and frame interval from TOML
//! - **Paths**: platform-specific config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use showtime_config::{Settings, load_graph, save_graph, paths};
//!
//! let settings = Settings::load_or_default(paths::settings_path()).unwrap();
//! let (graph, report) = load_graph(&settings.state_file).unwrap();
//! if !report.is_complete() {
//!     eprintln!("skipped {:?}", report.skipped_nodes);
//! }
//! save_graph(&graph, &settings.state_file).unwrap();
//! ```

mod error;
mod settings;
mod state;

/// Platform-specific paths for settings and saved state.
pub mod paths;

pub use error::ConfigError;
pub use settings::Settings;
pub use state::{
    NodeRecord, RestoreReport, StateFile, TerminalRecord, WireRecord, load_graph, save_graph,
    type_name, variant_from_type,
};

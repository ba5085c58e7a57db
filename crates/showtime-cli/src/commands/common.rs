//! Shared CLI helpers used across multiple commands.

use std::path::Path;

use anyhow::Context;
use showtime_config::{Settings, load_graph, paths};
use showtime_core::value::display_slot;
use showtime_core::{Graph, Node};

/// Load settings from `path`, or from the user config directory when no
/// path is given. Only an explicit path has to exist.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(Settings::load_or_default(paths::settings_path())?),
    }
}

/// Load a saved graph, reporting anything restore had to skip.
pub fn load_state(path: &Path) -> anyhow::Result<Graph> {
    let (graph, report) =
        load_graph(path).with_context(|| format!("restoring {}", path.display()))?;
    if !report.is_complete() {
        eprintln!(
            "warning: skipped {} unknown node(s) {:?}, dropped {} wire(s)",
            report.skipped_nodes.len(),
            report.skipped_nodes,
            report.dropped_wires
        );
    }
    Ok(graph)
}

/// One-line description of a node and its current output.
pub fn describe_node(node: &Node) -> String {
    let pos = node.position();
    let mut line = format!(
        "#{} {:<11} {:<10} at ({}, {})",
        node.id().index(),
        node.variant().name(),
        node.label(),
        pos.x,
        pos.y
    );
    if !node.outputs().is_empty() {
        line.push_str(&format!(" -> {}", display_slot(node.output(0))));
    }
    if node.is_frozen() {
        line.push_str(" [frozen]");
    }
    line
}

/// Print every node and wire.
pub fn print_graph(graph: &Graph) {
    println!(
        "{} node(s), {} wire(s)",
        graph.node_count(),
        graph.wire_count()
    );
    for node in graph.nodes() {
        println!("  {}", describe_node(node));
    }
    for wire in graph.wires() {
        println!(
            "  #{}.out[{}] -> #{}.in[{}]",
            wire.start().node.index(),
            wire.start().index,
            wire.end().node.index(),
            wire.end().index
        );
    }
}

/// Print each node's current output, for per-tick traces.
pub fn print_outputs(graph: &Graph) {
    for node in graph.nodes().filter(|n| !n.outputs().is_empty()) {
        println!(
            "  #{} {}: {}",
            node.id().index(),
            node.variant().name(),
            display_slot(node.output(0))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showtime_core::{Variant, Vec2};

    #[test]
    fn test_describe_register() {
        let mut graph = Graph::new();
        let id = graph.add_node(Variant::Register, Vec2::new(10.0, 20.0));
        graph.set_register_value(id, 5).unwrap();
        graph.set_frozen(id, true).unwrap();
        let line = describe_node(graph.node(id).unwrap());
        assert!(line.starts_with("#0 Register"), "{line}");
        assert!(line.contains(":5"), "{line}");
        assert!(line.contains("at (10, 20)"), "{line}");
        assert!(line.contains("-> 5"), "{line}");
        assert!(line.ends_with("[frozen]"), "{line}");
    }

    #[test]
    fn test_describe_plot_has_no_output() {
        let mut graph = Graph::new();
        let id = graph.add_node(Variant::Plot, Vec2::ZERO);
        let line = describe_node(graph.node(id).unwrap());
        assert!(!line.contains("->"), "{line}");
        assert!(line.contains("0 points"), "{line}");
    }

    #[test]
    fn test_describe_absent_output() {
        let mut graph = Graph::new();
        let id = graph.add_node(Variant::Arithmetic, Vec2::ZERO);
        graph.tick();
        let line = describe_node(graph.node(id).unwrap());
        assert!(line.contains("-> null"), "{line}");
    }
}

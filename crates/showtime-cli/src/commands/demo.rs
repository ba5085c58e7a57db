//! Example graph generation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use showtime_config::{Settings, save_graph};
use showtime_core::{ArithmeticOp, Graph, Operation, Terminal, Variant, Vec2};

/// Which example to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Example {
    /// Two registers (3 and 4) summed by an Arithmetic node.
    Adder,
    /// A counter loop plotting the diagonal.
    Counter,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Example to generate
    #[arg(value_enum, default_value_t = Example::Adder)]
    example: Example,

    /// Output file (defaults to the configured state file)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub fn run(args: DemoArgs, settings: Settings) -> anyhow::Result<()> {
    let path = args.out.unwrap_or(settings.state_file);
    let graph = build(args.example)?;
    let state = save_graph(&graph, &path)?;
    println!(
        "Wrote {:?} example to {} ({} nodes, {} wires)",
        args.example,
        path.display(),
        state.nodes.len(),
        state.wires.len()
    );
    Ok(())
}

/// Builds an example graph.
pub fn build(example: Example) -> anyhow::Result<Graph> {
    let mut graph = Graph::new();
    match example {
        Example::Adder => {
            let a = graph.add_node(Variant::Register, Vec2::new(100.0, 200.0));
            let b = graph.add_node(Variant::Register, Vec2::new(100.0, 400.0));
            let sum = graph.add_node(Variant::Arithmetic, Vec2::new(400.0, 300.0));
            graph.set_register_value(a, 3)?;
            graph.set_register_value(b, 4)?;
            graph.connect(Terminal::output(a, 0), Terminal::input(sum, 0));
            graph.connect(Terminal::output(b, 0), Terminal::input(sum, 1));
        }
        Example::Counter => {
            let one = graph.add_node(Variant::Register, Vec2::new(100.0, 200.0));
            let acc = graph.add_node(Variant::Register, Vec2::new(100.0, 400.0));
            let add = graph.add_node(Variant::Arithmetic, Vec2::new(300.0, 300.0));
            let wrap = graph.add_node(Variant::Arithmetic, Vec2::new(500.0, 300.0));
            let limit = graph.add_node(Variant::Register, Vec2::new(300.0, 550.0));
            let point = graph.add_node(Variant::Point, Vec2::new(700.0, 300.0));
            let plot = graph.add_node(Variant::Plot, Vec2::new(900.0, 450.0));
            graph.set_register_value(one, 1)?;
            graph.set_register_value(limit, 40)?;
            graph.set_operation(wrap, Operation::Arithmetic(ArithmeticOp::Remainder))?;
            graph.connect(Terminal::output(one, 0), Terminal::input(add, 0));
            graph.connect(Terminal::output(acc, 0), Terminal::input(add, 1));
            graph.connect(Terminal::output(add, 0), Terminal::input(wrap, 0));
            graph.connect(Terminal::output(limit, 0), Terminal::input(wrap, 1));
            graph.connect(Terminal::output(wrap, 0), Terminal::input(acc, 0));
            graph.connect(Terminal::output(acc, 0), Terminal::input(point, 0));
            graph.connect(Terminal::output(acc, 0), Terminal::input(point, 1));
            graph.connect(Terminal::output(point, 0), Terminal::input(plot, 0));
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showtime_core::Value;

    #[test]
    fn test_adder_sums_after_two_ticks() {
        let mut graph = build(Example::Adder).unwrap();
        graph.tick();
        graph.tick();
        let sum = graph.nodes().nth(2).unwrap();
        assert_eq!(sum.output(0), Some(&Value::Int(7)));
    }

    #[test]
    fn test_counter_fills_plot() {
        let mut graph = build(Example::Counter).unwrap();
        assert_eq!(graph.wire_count(), 8);
        for _ in 0..30 {
            graph.tick();
        }
        let plot = graph.nodes().last().unwrap();
        assert!(plot.label() != "0 points", "{}", plot.label());
    }
}

//! Unit-delay synchronous evaluation.
//!
//! One tick runs two passes over the whole graph:
//!
//! 1. **Propagate** copies, for every wire, the value currently in the start
//!    node's output buffer into the end node's input buffer. Outputs still
//!    hold what the previous tick produced.
//! 2. **Recompute** clears each node's outputs, runs its `calculate`, then
//!    clears its inputs.
//!
//! Every hop therefore costs exactly one tick, which keeps evaluation
//! deterministic and terminating over cyclic wiring, and makes the order in
//! which nodes are recomputed irrelevant. An input that is not refreshed by a
//! wire on the next tick reads as absent, never as a stale value.

use super::processing::Graph;
use super::terminal::Terminal;
use crate::value::Value;

impl Graph {
    /// Advances the graph by one tick.
    pub fn tick(&mut self) {
        let deliveries: Vec<(Terminal, Option<Value>)> = self
            .wires()
            .iter()
            .map(|wire| {
                let value = self
                    .node(wire.start().node)
                    .and_then(|n| n.output(wire.start().index))
                    .cloned();
                (wire.end(), value)
            })
            .collect();

        for (end, value) in deliveries {
            if let Some(node) = self.node_mut(end.node) {
                node.set_input(end.index, value);
            }
        }

        for node in self.nodes_mut() {
            node.clear_outputs();
            node.calculate();
            node.clear_inputs();
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            "graph_tick: {} nodes, {} wires",
            self.node_count(),
            self.wire_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Vec2;
    use crate::graph::{ArithmeticOp, Graph, NodeId, Operation, Terminal, Variant};
    use crate::value::{Point, Value};

    fn output(graph: &Graph, id: NodeId) -> Option<Value> {
        graph.node(id).and_then(|n| n.output(0)).cloned()
    }

    #[test]
    fn test_one_hop_per_tick() {
        let mut graph = Graph::new();
        let src = graph.add_node(Variant::Register, Vec2::ZERO);
        let mid = graph.add_node(Variant::Register, Vec2::ZERO);
        let dst = graph.add_node(Variant::Register, Vec2::ZERO);
        graph.set_register_value(src, 5).unwrap();
        graph.connect(Terminal::output(src, 0), Terminal::input(mid, 0));
        graph.connect(Terminal::output(mid, 0), Terminal::input(dst, 0));

        graph.tick();
        assert_eq!(output(&graph, mid), Some(Value::Int(5)));
        assert_eq!(output(&graph, dst), Some(Value::Int(0)));

        graph.tick();
        assert_eq!(output(&graph, dst), Some(Value::Int(5)));
    }

    #[test]
    fn test_inputs_are_single_use() {
        let mut graph = Graph::new();
        let a = graph.add_node(Variant::Register, Vec2::ZERO);
        let b = graph.add_node(Variant::Register, Vec2::ZERO);
        let sum = graph.add_node(Variant::Arithmetic, Vec2::ZERO);
        graph.set_register_value(a, 1).unwrap();
        graph.set_register_value(b, 2).unwrap();
        graph.connect(Terminal::output(a, 0), Terminal::input(sum, 0));
        graph.connect(Terminal::output(b, 0), Terminal::input(sum, 1));

        graph.tick();
        assert_eq!(output(&graph, sum), Some(Value::Int(3)));
        assert!(graph.node(sum).unwrap().inputs().iter().all(Option::is_none));

        graph.disconnect(Terminal::input(sum, 1));
        graph.tick();
        assert_eq!(output(&graph, sum), None);
    }

    #[test]
    fn test_cycle_counts_one_per_tick() {
        let mut graph = Graph::new();
        let one = graph.add_node(Variant::Register, Vec2::ZERO);
        let acc = graph.add_node(Variant::Register, Vec2::ZERO);
        let add = graph.add_node(Variant::Arithmetic, Vec2::ZERO);
        graph.set_register_value(one, 1).unwrap();
        graph.connect(Terminal::output(one, 0), Terminal::input(add, 0));
        graph.connect(Terminal::output(acc, 0), Terminal::input(add, 1));
        graph.connect(Terminal::output(add, 0), Terminal::input(acc, 0));

        // acc and add feed each other, so the counter advances every two ticks.
        let mut seen = Vec::new();
        for _ in 0..6 {
            graph.tick();
            seen.push(output(&graph, acc));
        }
        assert_eq!(
            seen,
            [0, 0, 1, 1, 2, 2].map(|n| Some(Value::Int(n))).to_vec()
        );
    }

    #[test]
    fn test_absence_cascades_one_hop() {
        let mut graph = Graph::new();
        let a = graph.add_node(Variant::Register, Vec2::ZERO);
        let div = graph.add_node(Variant::Arithmetic, Vec2::ZERO);
        let reg = graph.add_node(Variant::Register, Vec2::ZERO);
        let cond = graph.add_node(Variant::Conditional, Vec2::ZERO);
        graph
            .set_operation(div, Operation::Arithmetic(ArithmeticOp::Divide))
            .unwrap();
        graph.set_register_value(a, 7).unwrap();
        graph.set_register_value(reg, 9).unwrap();
        graph.connect(Terminal::output(a, 0), Terminal::input(div, 0));
        graph.connect(Terminal::output(reg, 0), Terminal::input(div, 1));
        graph.connect(Terminal::output(div, 0), Terminal::input(cond, 3));

        graph.tick();
        assert_eq!(output(&graph, div), Some(Value::Int(0)));
        graph.tick();
        assert_eq!(output(&graph, cond), Some(Value::Int(0)));

        graph.set_register_value(reg, 0).unwrap();
        graph.tick();
        assert_eq!(output(&graph, div), None);
        assert_eq!(output(&graph, cond), Some(Value::Int(0)));
        graph.tick();
        assert_eq!(output(&graph, cond), None);
    }

    #[test]
    fn test_plot_collects_points() {
        let mut graph = Graph::new();
        let x = graph.add_node(Variant::Register, Vec2::ZERO);
        let y = graph.add_node(Variant::Register, Vec2::ZERO);
        let point = graph.add_node(Variant::Point, Vec2::ZERO);
        let plot = graph.add_node(Variant::Plot, Vec2::ZERO);
        graph.set_register_value(x, 2).unwrap();
        graph.set_register_value(y, 3).unwrap();
        graph.connect(Terminal::output(x, 0), Terminal::input(point, 0));
        graph.connect(Terminal::output(y, 0), Terminal::input(point, 1));
        graph.connect(Terminal::output(point, 0), Terminal::input(plot, 5));

        for _ in 0..3 {
            graph.tick();
        }
        let crate::graph::NodeKind::Plot { points } = graph.node(plot).unwrap().kind() else {
            panic!("not a plot");
        };
        assert_eq!(points.iter().copied().collect::<Vec<_>>(), [Point::new(2, 3)]);
    }

    #[test]
    fn test_wire_to_removed_node_is_gone() {
        let mut graph = Graph::new();
        let a = graph.add_node(Variant::Register, Vec2::ZERO);
        let b = graph.add_node(Variant::Register, Vec2::ZERO);
        graph.connect(Terminal::output(a, 0), Terminal::input(b, 0));
        graph.remove_node(b).unwrap();
        graph.tick();
        assert_eq!(output(&graph, a), Some(Value::Int(0)));
    }
}

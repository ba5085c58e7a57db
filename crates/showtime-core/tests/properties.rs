//! Property-based tests for graph invariants.
//!
//! Random sequences of edits and ticks are applied to small graphs; the
//! structural invariants and the order independence of evaluation must hold
//! after every step.

use proptest::prelude::*;
use showtime_core::{Direction, Graph, NodeId, Terminal, Value, Variant, Vec2};

const VARIANTS: [Variant; 5] = Variant::ALL;

/// One random edit.
#[derive(Debug, Clone)]
enum Edit {
    Connect {
        a: (usize, bool, usize),
        b: (usize, bool, usize),
    },
    Disconnect(usize, bool, usize),
    Remove(usize),
    Tick,
}

fn edit() -> impl Strategy<Value = Edit> {
    let terminal = (0usize..8, any::<bool>(), 0usize..8);
    prop_oneof![
        4 => (terminal.clone(), terminal.clone()).prop_map(|(a, b)| Edit::Connect { a, b }),
        1 => terminal.prop_map(|(n, o, i)| Edit::Disconnect(n, o, i)),
        1 => (0usize..8).prop_map(Edit::Remove),
        2 => Just(Edit::Tick),
    ]
}

fn build(kinds: &[usize], values: &[i64]) -> (Graph, Vec<NodeId>) {
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = kinds
        .iter()
        .enumerate()
        .map(|(i, &k)| {
            graph.add_node(
                VARIANTS[k % VARIANTS.len()],
                Vec2::new(150.0 * i as f64, 0.0),
            )
        })
        .collect();
    for (&id, &v) in ids.iter().zip(values) {
        // Only registers accept a value; others report an error we ignore.
        let _ = graph.set_register_value(id, v);
    }
    (graph, ids)
}

fn terminal(ids: &[NodeId], (n, output, index): (usize, bool, usize)) -> Terminal {
    let direction = if output {
        Direction::Output
    } else {
        Direction::Input
    };
    Terminal::new(ids[n % ids.len()], direction, index)
}

fn apply(graph: &mut Graph, ids: &[NodeId], edit: &Edit) {
    match edit {
        Edit::Connect { a, b } => {
            graph.connect(terminal(ids, *a), terminal(ids, *b));
        }
        Edit::Disconnect(n, o, i) => {
            graph.disconnect(terminal(ids, (*n, *o, *i)));
        }
        Edit::Remove(n) => {
            let _ = graph.remove_node(ids[n % ids.len()]);
        }
        Edit::Tick => graph.tick(),
    }
}

fn outputs(graph: &Graph) -> Vec<(NodeId, Vec<Option<Value>>)> {
    graph
        .nodes()
        .map(|n| (n.id(), n.outputs().to_vec()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// After any edit sequence, every input terminal has at most one
    /// incoming wire.
    #[test]
    fn fan_in_at_most_one(
        kinds in prop::collection::vec(0usize..5, 2..8),
        edits in prop::collection::vec(edit(), 0..40),
    ) {
        let (mut graph, ids) = build(&kinds, &[]);
        for e in &edits {
            apply(&mut graph, &ids, e);
            let mut ends: Vec<Terminal> = graph.wires().iter().map(|w| w.end()).collect();
            let total = ends.len();
            ends.sort();
            ends.dedup();
            prop_assert_eq!(ends.len(), total, "duplicate wire into an input after {:?}", e);
        }
    }

    /// No wire ever joins two terminals of one node, and every wire runs
    /// from an existing output slot to an existing input slot.
    #[test]
    fn wires_are_well_formed(
        kinds in prop::collection::vec(0usize..5, 2..8),
        edits in prop::collection::vec(edit(), 0..40),
    ) {
        let (mut graph, ids) = build(&kinds, &[]);
        for e in &edits {
            apply(&mut graph, &ids, e);
            for w in graph.wires() {
                prop_assert_ne!(w.start().node, w.end().node);
                prop_assert_eq!(w.start().direction, Direction::Output);
                prop_assert_eq!(w.end().direction, Direction::Input);
                prop_assert!(graph.has_terminal(w.start()));
                prop_assert!(graph.has_terminal(w.end()));
            }
        }
    }

    /// Connecting two terminals of the same node never creates a wire.
    #[test]
    fn self_loops_rejected(
        kind in 0usize..5,
        a in (any::<bool>(), 0usize..8),
        b in (any::<bool>(), 0usize..8),
    ) {
        let (mut graph, ids) = build(&[kind], &[]);
        let result = graph.connect(terminal(&ids, (0, a.0, a.1)), terminal(&ids, (0, b.0, b.1)));
        prop_assert!(result.is_none());
        prop_assert_eq!(graph.wire_count(), 0);
    }

    /// Removing a node leaves no wire referencing it.
    #[test]
    fn removal_cascades(
        kinds in prop::collection::vec(0usize..5, 2..8),
        edits in prop::collection::vec(edit(), 0..40),
        victim in 0usize..8,
    ) {
        let (mut graph, ids) = build(&kinds, &[]);
        for e in &edits {
            apply(&mut graph, &ids, e);
        }
        let id = ids[victim % ids.len()];
        let _ = graph.remove_node(id);
        prop_assert!(graph.wires().iter().all(|w| !w.touches_node(id)));
    }

    /// Tick results do not depend on the order nodes were inserted in.
    #[test]
    fn tick_is_order_independent(
        kinds in prop::collection::vec(0usize..5, 2..7),
        values in prop::collection::vec(-50i64..50, 7),
        wiring in prop::collection::vec(((0usize..7, 0usize..8), (0usize..7, 0usize..8)), 0..16),
        ticks in 1usize..6,
    ) {
        let n = kinds.len();
        let (mut forward, fwd_ids) = build(&kinds, &values);

        // Same nodes inserted back to front.
        let mut backward = Graph::new();
        let mut rev_ids = vec![None; n];
        for i in (0..n).rev() {
            let id = backward.add_node(VARIANTS[kinds[i] % VARIANTS.len()], Vec2::ZERO);
            let _ = backward.set_register_value(id, values[i]);
            rev_ids[i] = Some(id);
        }
        let rev_ids: Vec<NodeId> = rev_ids.into_iter().flatten().collect();

        for &((from, out), (to, inp)) in &wiring {
            forward.connect(
                Terminal::output(fwd_ids[from % n], out),
                Terminal::input(fwd_ids[to % n], inp),
            );
            backward.connect(
                Terminal::output(rev_ids[from % n], out),
                Terminal::input(rev_ids[to % n], inp),
            );
        }

        for _ in 0..ticks {
            forward.tick();
            backward.tick();
        }

        for i in 0..n {
            let f = forward.node(fwd_ids[i]).unwrap();
            let b = backward.node(rev_ids[i]).unwrap();
            prop_assert_eq!(f.outputs(), b.outputs(), "node {} diverged", i);
            prop_assert_eq!(f.kind(), b.kind());
        }
    }

    /// Each tick's outputs are a function of the previous tick's outputs:
    /// two graphs in the same state stay in the same state.
    #[test]
    fn tick_is_deterministic(
        kinds in prop::collection::vec(0usize..5, 2..7),
        values in prop::collection::vec(-50i64..50, 7),
        edits in prop::collection::vec(edit(), 0..30),
    ) {
        let (mut a, ids) = build(&kinds, &values);
        for e in &edits {
            apply(&mut a, &ids, e);
        }
        let mut b = a.clone();
        for _ in 0..3 {
            a.tick();
            b.tick();
            prop_assert_eq!(outputs(&a), outputs(&b));
        }
    }
}

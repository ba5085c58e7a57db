//! Showtime Core - a beat-clocked live dataflow graph
//!
//! Nodes sit on an infinite canvas, wires join their terminals, and the whole
//! graph is evaluated once per musical beat while the user keeps editing it.
//!
//! # Core Abstractions
//!
//! - [`Graph`] - nodes, wires, structural invariants and hit-testing
//! - [`Graph::tick`] - unit-delay synchronous evaluation
//! - [`Value`] - what travels on wires; `Option<Value>` marks absence
//! - [`Shape`] - beat-phase deformed node geometry
//! - [`BeatClock`] / [`Scheduler`] - wall time to beat-phase, beat-phase to ticks
//! - [`Engine`] - a graph driven by host frames
//!
//! # Features
//!
//! - `tracing`: emit `tracing` events for graph mutations and ticks.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use showtime_core::{Engine, Graph, Terminal, Value, Variant, Vec2};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node(Variant::Register, Vec2::new(0.0, 0.0));
//! let b = graph.add_node(Variant::Register, Vec2::new(0.0, 150.0));
//! let sum = graph.add_node(Variant::Arithmetic, Vec2::new(250.0, 75.0));
//! graph.set_register_value(a, 3).unwrap();
//! graph.set_register_value(b, 4).unwrap();
//! graph.connect(Terminal::output(a, 0), Terminal::input(sum, 0));
//! graph.connect(Terminal::output(b, 0), Terminal::input(sum, 1));
//!
//! let mut engine = Engine::new(graph, 130.0);
//! for frame in 0..40u64 {
//!     engine.frame(Duration::from_millis(frame * 16));
//! }
//! assert_eq!(engine.graph().node(sum).unwrap().output(0), Some(&Value::Int(7)));
//! ```

pub mod geometry;
pub mod graph;
pub mod tempo;
pub mod value;

pub use geometry::{Shape, Vec2, WireCurve};
pub use graph::{
    ArithmeticOp, CompareOp, Direction, Engine, FrameReport, Graph, GraphError, Hit, Node, NodeId,
    NodeKind, Operation, Terminal, Variant, Wire,
};
pub use tempo::{BeatClock, Scheduler, WallClock};
pub use value::{Point, Value};

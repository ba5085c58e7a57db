//! The dataflow graph: nodes, terminals, wires and their evaluation.
//!
//! # Architecture
//!
//! - [`Graph`] owns every [`Node`] (in z-order) and every [`Wire`]. It is the
//!   only place wires are created, so the fan-in and no-self-loop invariants
//!   hold by construction.
//! - [`Graph::tick`] is the evaluator: a propagate pass over wires followed
//!   by a recompute pass over nodes. Each wire hop costs one tick, so
//!   cycles need no special casing.
//! - [`Graph::locate`] hit-tests canvas positions against phase-deformed node
//!   geometry for the interaction layer.
//! - [`Engine`] pairs a graph with the beat clock and decides per host frame
//!   whether to tick.
//!
//! Everything runs on one thread; editing and ticking are serialized by
//! `&mut` access rather than by locks.

pub mod engine;
mod evaluator;
pub mod node;
mod processing;
pub mod terminal;
pub mod wire;

pub use engine::{Engine, FrameReport};
pub use node::{ArithmeticOp, CompareOp, Node, NodeId, NodeKind, Operation, Variant};
pub use processing::{Graph, GraphError, Hit};
pub use terminal::{Direction, Terminal};
pub use wire::Wire;

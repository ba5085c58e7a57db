//! The editable dataflow graph.

use super::node::{Node, NodeId, NodeKind, Operation, Variant};
use super::terminal::{Direction, Terminal};
use super::wire::Wire;
use crate::geometry::{Vec2, WireCurve, within_terminal};
use crate::value::Value;

/// Errors from operations that name a specific node.
///
/// Wire requests are not errors: [`Graph::connect`] silently rejects invalid
/// requests by returning `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The specified node was not found in the graph.
    NodeNotFound(NodeId),
    /// The node exists but is not a Register.
    NotARegister(NodeId),
    /// The node exists but is not a Plot.
    NotAPlot(NodeId),
    /// The operation belongs to a different variant than the node.
    OperationMismatch(NodeId, Operation),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node {} not found", id.index()),
            Self::NotARegister(id) => write!(f, "node {} is not a register", id.index()),
            Self::NotAPlot(id) => write!(f, "node {} is not a plot", id.index()),
            Self::OperationMismatch(id, op) => {
                write!(f, "operation {op} does not apply to node {}", id.index())
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Result of a hit-test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// A terminal's capture radius.
    Terminal(Terminal),
    /// A node body.
    Body(NodeId),
}

impl Hit {
    /// The node that was hit.
    pub fn node(self) -> NodeId {
        match self {
            Self::Terminal(t) => t.node,
            Self::Body(id) => id,
        }
    }
}

/// Nodes and wires of one editing session.
///
/// Nodes are kept in insertion order, which is also their z-order: a later
/// node is drawn in front of, and hit-tested before, an earlier one. The
/// graph owns every wire and maintains two structural invariants:
///
/// - an input terminal has at most one incoming wire,
/// - no wire joins two terminals of the same node.
///
/// Longer cycles are allowed; the evaluator's unit delay keeps them well
/// defined. See [`tick()`](Self::tick).
///
/// # Example
///
/// ```rust
/// use showtime_core::{Graph, Terminal, Value, Variant, Vec2};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(Variant::Register, Vec2::new(0.0, 0.0));
/// let b = graph.add_node(Variant::Register, Vec2::new(0.0, 200.0));
/// let sum = graph.add_node(Variant::Arithmetic, Vec2::new(300.0, 100.0));
/// graph.set_register_value(a, 3).unwrap();
/// graph.set_register_value(b, 4).unwrap();
///
/// graph.connect(Terminal::output(a, 0), Terminal::input(sum, 0)).unwrap();
/// graph.connect(Terminal::input(sum, 1), Terminal::output(b, 0)).unwrap();
///
/// graph.tick();
/// assert_eq!(graph.node(sum).unwrap().output(0), Some(&Value::Int(7)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    wires: Vec<Wire>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node mutations ---

    /// Adds a node of `variant` with default parameters at `position`.
    pub fn add_node(&mut self, variant: Variant, position: Vec2) -> NodeId {
        self.add_node_with(NodeKind::new(variant), position)
    }

    /// Adds a node with explicit parameters at `position`.
    pub fn add_node_with(&mut self, kind: NodeKind, position: Vec2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_add: {} node {id}", kind.variant());
        self.nodes.push(Some(Node::new(id, kind, position)));
        id
    }

    /// Removes a node and every wire touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let slot = self
            .nodes
            .get_mut(id.0 as usize)
            .filter(|n| n.is_some())
            .ok_or(GraphError::NodeNotFound(id))?;
        *slot = None;

        let before = self.wires.len();
        self.wires.retain(|w| !w.touches_node(id));
        let _removed = before - self.wires.len();
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_remove: node {id}, {_removed} wires");
        Ok(())
    }

    /// Moves a node so its body's bottom-left corner sits at `position`.
    pub fn move_node(&mut self, id: NodeId, position: Vec2) -> Result<(), GraphError> {
        self.get_mut(id)?.set_position(position);
        Ok(())
    }

    /// Freezes or thaws a node.
    pub fn set_frozen(&mut self, id: NodeId, frozen: bool) -> Result<(), GraphError> {
        self.get_mut(id)?.set_frozen(frozen);
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_freeze: {id} frozen={frozen}");
        Ok(())
    }

    /// Replaces the operation of an Arithmetic or Conditional node.
    pub fn set_operation(&mut self, id: NodeId, operation: Operation) -> Result<(), GraphError> {
        match (self.get_mut(id)?.kind_mut(), operation) {
            (NodeKind::Arithmetic { op, .. }, Operation::Arithmetic(new)) => *op = new,
            (NodeKind::Conditional { op }, Operation::Compare(new)) => *op = new,
            _ => return Err(GraphError::OperationMismatch(id, operation)),
        }
        Ok(())
    }

    /// Stores `value` in a Register and emits it immediately on its output.
    pub fn set_register_value(&mut self, id: NodeId, value: i64) -> Result<(), GraphError> {
        let node = self.get_mut(id)?;
        let NodeKind::Register { value: stored } = node.kind_mut() else {
            return Err(GraphError::NotARegister(id));
        };
        *stored = value;
        node.set_output(0, Some(Value::Int(value)));
        Ok(())
    }

    /// Empties the point set of a Plot.
    pub fn clear_plot(&mut self, id: NodeId) -> Result<(), GraphError> {
        let NodeKind::Plot { points } = self.get_mut(id)?.kind_mut() else {
            return Err(GraphError::NotAPlot(id));
        };
        points.clear();
        Ok(())
    }

    /// Removes every node and wire.
    ///
    /// IDs handed out before the reset are not reused.
    pub fn clear(&mut self) {
        self.nodes.iter_mut().for_each(|n| *n = None);
        self.wires.clear();
    }

    // --- Wire mutations ---

    /// Connects two terminals in either order.
    ///
    /// Returns the created wire, oriented output to input, or `None` when
    /// the request is rejected without changing the graph:
    ///
    /// - both terminals belong to the same node,
    /// - the terminals are not one output and one input,
    /// - either terminal names a missing node or slot.
    ///
    /// A wire already ending at the same input is replaced.
    pub fn connect(&mut self, a: Terminal, b: Terminal) -> Option<Wire> {
        if a.node == b.node {
            return None;
        }
        let (start, end) = match (a.direction, b.direction) {
            (Direction::Output, Direction::Input) => (a, b),
            (Direction::Input, Direction::Output) => (b, a),
            _ => return None,
        };
        if !self.has_terminal(start) || !self.has_terminal(end) {
            return None;
        }

        self.wires.retain(|w| w.end() != end);
        let wire = Wire::new(start, end);
        self.wires.push(wire);
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_connect: {start} → {end}");
        Some(wire)
    }

    /// Removes every wire starting or ending at `terminal`. Returns how many
    /// were removed.
    pub fn disconnect(&mut self, terminal: Terminal) -> usize {
        let before = self.wires.len();
        self.wires.retain(|w| !w.touches(terminal));
        let removed = before - self.wires.len();
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_disconnect: {terminal}, {removed} wires");
        removed
    }

    // --- Queries ---

    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Whether `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Live nodes in insertion (z) order, back to front.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// All wires, in creation order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Number of wires.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// The wire feeding input `terminal`, if any.
    pub fn wire_into(&self, terminal: Terminal) -> Option<Wire> {
        self.wires.iter().copied().find(|w| w.end() == terminal)
    }

    /// Whether `terminal` addresses an existing slot of a live node.
    pub fn has_terminal(&self, terminal: Terminal) -> bool {
        self.node(terminal.node)
            .is_some_and(|n| n.has_terminal(terminal))
    }

    /// Canvas position of `terminal` at beat-phase `phase`.
    pub fn terminal_position(&self, terminal: Terminal, phase: f64) -> Option<Vec2> {
        self.node(terminal.node)?
            .terminal_position(terminal.direction, terminal.index, phase)
    }

    /// Curve along which `wire` is drawn at beat-phase `phase`.
    pub fn wire_curve(&self, wire: Wire, phase: f64) -> Option<WireCurve> {
        let start = self.terminal_position(wire.start(), phase)?;
        let end = self.terminal_position(wire.end(), phase)?;
        Some(WireCurve::between(start, end))
    }

    /// Finds what lies under canvas position `point` at beat-phase `phase`.
    ///
    /// Nodes are tested front to back. Within a node, terminals win over the
    /// body, so a terminal overlapping its own body edge is still reachable.
    pub fn locate(&self, point: Vec2, phase: f64) -> Option<Hit> {
        self.nodes().rev().find_map(|node| hit_node(node, point, phase))
    }

    pub(super) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut().flatten()
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.node_mut(id).ok_or(GraphError::NodeNotFound(id))
    }
}

fn hit_node(node: &Node, point: Vec2, phase: f64) -> Option<Hit> {
    let offset = point - node.position();
    let shape = node.shape(phase);
    for direction in [Direction::Input, Direction::Output] {
        let count = node.terminal_count(direction);
        for index in 0..count {
            if within_terminal(offset, shape.terminal(direction, index, count)) {
                return Some(Hit::Terminal(Terminal::new(node.id(), direction, index)));
            }
        }
    }
    shape.contains(offset).then_some(Hit::Body(node.id()))
}

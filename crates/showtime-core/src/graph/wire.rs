//! Wires between terminals.
//!
//! A [`Wire`] always runs from an output terminal to an input terminal of a
//! different node. Only [`Graph::connect`](super::Graph::connect) builds
//! wires, so the orientation holds for every wire in a graph.

use core::fmt;

use super::node::NodeId;
use super::terminal::Terminal;

/// A directed connection from an output terminal to an input terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wire {
    start: Terminal,
    end: Terminal,
}

impl Wire {
    pub(crate) fn new(start: Terminal, end: Terminal) -> Self {
        Self { start, end }
    }

    /// The output terminal the wire reads from.
    pub fn start(&self) -> Terminal {
        self.start
    }

    /// The input terminal the wire writes to.
    pub fn end(&self) -> Terminal {
        self.end
    }

    /// Whether either endpoint belongs to `node`.
    pub fn touches_node(&self, node: NodeId) -> bool {
        self.start.node == node || self.end.node == node
    }

    /// Whether `terminal` is either endpoint.
    pub fn touches(&self, terminal: Terminal) -> bool {
        self.start == terminal || self.end == terminal
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

//! Terminal addressing.
//!
//! A [`Terminal`] names one connection point of a node: which node, which
//! side, and which slot on that side. It holds no state; values live in the
//! node's buffers.

use core::fmt;

use super::node::NodeId;

/// Which side of a node a terminal sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Receives values; drawn on the left edge.
    Input,
    /// Emits values; drawn on the right edge.
    Output,
}

impl Direction {
    /// The opposite side.
    pub fn flip(self) -> Self {
        match self {
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }
}

/// A connection point, compared structurally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal {
    /// Owning node.
    pub node: NodeId,
    /// Side of the node.
    pub direction: Direction,
    /// Slot index among terminals of the same direction.
    pub index: usize,
}

impl Terminal {
    /// Creates a terminal address.
    pub const fn new(node: NodeId, direction: Direction, index: usize) -> Self {
        Self {
            node,
            direction,
            index,
        }
    }

    /// Input slot `index` of `node`.
    pub const fn input(node: NodeId, index: usize) -> Self {
        Self::new(node, Direction::Input, index)
    }

    /// Output slot `index` of `node`.
    pub const fn output(node: NodeId, index: usize) -> Self {
        Self::new(node, Direction::Output, index)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.direction {
            Direction::Input => "in",
            Direction::Output => "out",
        };
        write!(f, "{}.{side}[{}]", self.node, self.index)
    }
}

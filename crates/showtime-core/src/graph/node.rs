//! Node variants and their per-tick computation.
//!
//! Each node has a [`NodeId`], a [`NodeKind`] holding the variant-specific
//! parameters, and input and output buffers whose lengths are fixed by the
//! variant at construction. [`Node::calculate`] reads only the node's own
//! input buffer and parameters, so the evaluator may recompute nodes in any
//! order.

use std::collections::BTreeSet;
use std::fmt;

use crate::geometry::{Shape, Vec2};
use crate::value::{Point, Value};

use super::terminal::{Direction, Terminal};

/// Unique identifier for a node in a graph.
///
/// IDs are assigned sequentially and never reused within a graph instance,
/// so a stale ID held by the editor can never alias a newer node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// The closed set of node variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Stores an integer and emits it every tick.
    Register,
    /// Combines two integers with an [`ArithmeticOp`].
    Arithmetic,
    /// Pairs two integers into a [`Point`].
    Point,
    /// Routes one of two inputs depending on a [`CompareOp`].
    Conditional,
    /// Accumulates every point it receives.
    Plot,
}

impl Variant {
    /// All variants, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Register,
        Self::Arithmetic,
        Self::Point,
        Self::Conditional,
        Self::Plot,
    ];

    /// Number of (input, output) terminals.
    pub fn arity(self) -> (usize, usize) {
        match self {
            Self::Register => (1, 1),
            Self::Arithmetic | Self::Point => (2, 1),
            Self::Conditional => (4, 1),
            Self::Plot => (8, 0),
        }
    }

    /// Undeformed body size.
    pub fn size(self) -> Vec2 {
        match self {
            Self::Conditional => Vec2::new(100.0, 150.0),
            Self::Plot => Vec2::new(300.0, 300.0),
            _ => Vec2::new(100.0, 100.0),
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::Arithmetic => "Arithmetic",
            Self::Point => "Point",
            Self::Conditional => "Conditional",
            Self::Plot => "Plot",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary integer operation of an Arithmetic node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    /// `+`
    #[default]
    Add,
    /// `×`
    Multiply,
    /// `-`
    Subtract,
    /// `/`, rounding toward negative infinity.
    Divide,
    /// `%`, taking the sign of the divisor.
    Remainder,
}

impl ArithmeticOp {
    /// All operations, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Multiply,
        Self::Subtract,
        Self::Divide,
        Self::Remainder,
    ];

    /// Canonical symbol, as shown on the node and persisted.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Multiply => "×",
            Self::Subtract => "-",
            Self::Divide => "/",
            Self::Remainder => "%",
        }
    }

    /// Parses a canonical symbol or its ASCII spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Self::Add),
            "×" | "*" => Some(Self::Multiply),
            "-" | "−" => Some(Self::Subtract),
            "/" | "÷" => Some(Self::Divide),
            "%" => Some(Self::Remainder),
            _ => None,
        }
    }

    /// Applies the operation. Division or remainder by zero and results
    /// outside the `i64` range are absent.
    ///
    /// ```rust
    /// use showtime_core::ArithmeticOp;
    ///
    /// assert_eq!(ArithmeticOp::Divide.apply(-7, 2), Some(-4));
    /// assert_eq!(ArithmeticOp::Remainder.apply(-7, 2), Some(1));
    /// assert_eq!(ArithmeticOp::Divide.apply(7, 0), None);
    /// ```
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Self::Add => a.checked_add(b),
            Self::Multiply => a.checked_mul(b),
            Self::Subtract => a.checked_sub(b),
            Self::Divide => floor_div(a, b),
            Self::Remainder => floor_rem(a, b),
        }
    }
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

fn floor_rem(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return None;
    }
    if b == -1 {
        return Some(0);
    }
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Some(r + b)
    } else {
        Some(r)
    }
}

/// Comparison of a Conditional node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `>`
    #[default]
    Greater,
    /// `<`
    Less,
    /// `=`
    Equal,
    /// `≠`
    NotEqual,
    /// `≥`
    GreaterEqual,
    /// `≤`
    LessEqual,
}

impl CompareOp {
    /// All comparisons, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Greater,
        Self::Less,
        Self::Equal,
        Self::NotEqual,
        Self::GreaterEqual,
        Self::LessEqual,
    ];

    /// Canonical symbol, as shown on the node and persisted.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::Less => "<",
            Self::Equal => "=",
            Self::NotEqual => "≠",
            Self::GreaterEqual => "≥",
            Self::LessEqual => "≤",
        }
    }

    /// Parses a canonical symbol or its ASCII spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            "=" | "==" => Some(Self::Equal),
            "≠" | "!=" => Some(Self::NotEqual),
            "≥" | ">=" => Some(Self::GreaterEqual),
            "≤" | "<=" => Some(Self::LessEqual),
            _ => None,
        }
    }

    /// Evaluates `a <op> b`.
    pub fn holds(self, a: i64, b: i64) -> bool {
        match self {
            Self::Greater => a > b,
            Self::Less => a < b,
            Self::Equal => a == b,
            Self::NotEqual => a != b,
            Self::GreaterEqual => a >= b,
            Self::LessEqual => a <= b,
        }
    }
}

/// An operation of either operation-bearing variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Operation of an Arithmetic node.
    Arithmetic(ArithmeticOp),
    /// Operation of a Conditional node.
    Compare(CompareOp),
}

impl Operation {
    /// Canonical symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Arithmetic(op) => op.symbol(),
            Self::Compare(op) => op.symbol(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Variant tag plus variant-specific parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Stored integer.
    Register {
        /// Current value, emitted every tick.
        value: i64,
    },
    /// Integer operation.
    Arithmetic {
        /// Applied operation.
        op: ArithmeticOp,
        /// Result of the most recent tick.
        value: Option<i64>,
    },
    /// Point constructor.
    Point {
        /// Point built on the most recent unfrozen tick.
        value: Option<Point>,
    },
    /// Two-way switch.
    Conditional {
        /// Comparison between inputs 0 and 1.
        op: CompareOp,
    },
    /// Point accumulator.
    Plot {
        /// Every distinct point received since the last clear.
        points: BTreeSet<Point>,
    },
}

impl NodeKind {
    /// Default parameters for `variant`.
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Register => Self::Register { value: 0 },
            Variant::Arithmetic => Self::Arithmetic {
                op: ArithmeticOp::default(),
                value: None,
            },
            Variant::Point => Self::Point { value: None },
            Variant::Conditional => Self::Conditional {
                op: CompareOp::default(),
            },
            Variant::Plot => Self::Plot {
                points: BTreeSet::new(),
            },
        }
    }

    /// The variant tag.
    pub fn variant(&self) -> Variant {
        match self {
            Self::Register { .. } => Variant::Register,
            Self::Arithmetic { .. } => Variant::Arithmetic,
            Self::Point { .. } => Variant::Point,
            Self::Conditional { .. } => Variant::Conditional,
            Self::Plot { .. } => Variant::Plot,
        }
    }

    /// The operation, for variants that have one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Arithmetic { op, .. } => Some(Operation::Arithmetic(*op)),
            Self::Conditional { op } => Some(Operation::Compare(*op)),
            _ => None,
        }
    }
}

/// A node on the canvas.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    position: Vec2,
    frozen: bool,
    inputs: Vec<Option<Value>>,
    outputs: Vec<Option<Value>>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, position: Vec2) -> Self {
        let (n_in, n_out) = kind.variant().arity();
        Self {
            id,
            kind,
            position,
            frozen: false,
            inputs: vec![None; n_in],
            outputs: vec![None; n_out],
        }
    }

    /// Node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Variant parameters.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Variant tag.
    pub fn variant(&self) -> Variant {
        self.kind.variant()
    }

    /// Canvas position of the bottom-left corner of the undeformed body.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Whether the node is frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Value at input slot `index`, if any.
    pub fn input(&self, index: usize) -> Option<&Value> {
        self.inputs.get(index).and_then(Option::as_ref)
    }

    /// Value at output slot `index`, if any.
    pub fn output(&self, index: usize) -> Option<&Value> {
        self.outputs.get(index).and_then(Option::as_ref)
    }

    /// The whole input buffer.
    pub fn inputs(&self) -> &[Option<Value>] {
        &self.inputs
    }

    /// The whole output buffer.
    pub fn outputs(&self) -> &[Option<Value>] {
        &self.outputs
    }

    /// Number of terminals on the `direction` side.
    pub fn terminal_count(&self, direction: Direction) -> usize {
        match direction {
            Direction::Input => self.inputs.len(),
            Direction::Output => self.outputs.len(),
        }
    }

    /// Whether `terminal` addresses an existing slot of this node.
    pub fn has_terminal(&self, terminal: Terminal) -> bool {
        terminal.node == self.id && terminal.index < self.terminal_count(terminal.direction)
    }

    /// All terminals of this node, inputs first.
    pub fn terminals(&self) -> impl Iterator<Item = Terminal> + '_ {
        let inputs = (0..self.inputs.len()).map(|i| Terminal::input(self.id, i));
        let outputs = (0..self.outputs.len()).map(|i| Terminal::output(self.id, i));
        inputs.chain(outputs)
    }

    /// Undeformed body size.
    pub fn size(&self) -> Vec2 {
        self.variant().size()
    }

    /// Body shape at beat-phase `phase`. Frozen nodes stay at rest.
    pub fn shape(&self, phase: f64) -> Shape {
        let phase = if self.frozen { 0.0 } else { phase };
        Shape::at(phase, self.size())
    }

    /// Canvas position of terminal slot `index` on the `direction` side, or
    /// `None` if the slot does not exist.
    pub fn terminal_position(&self, direction: Direction, index: usize, phase: f64) -> Option<Vec2> {
        let count = self.terminal_count(direction);
        (index < count)
            .then(|| self.position + self.shape(phase).terminal(direction, index, count))
    }

    /// Short caption a renderer shows on the body.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Register { value } => format!(":{value}"),
            NodeKind::Arithmetic { op, .. } => op.symbol().to_owned(),
            NodeKind::Point { .. } => "(x, y)".to_owned(),
            NodeKind::Conditional { op } => op.symbol().to_owned(),
            NodeKind::Plot { points } => format!("{} points", points.len()),
        }
    }

    pub(crate) fn set_input(&mut self, index: usize, value: Option<Value>) {
        if let Some(slot) = self.inputs.get_mut(index) {
            *slot = value;
        }
    }

    pub(crate) fn set_output(&mut self, index: usize, value: Option<Value>) {
        if let Some(slot) = self.outputs.get_mut(index) {
            *slot = value;
        }
    }

    pub(crate) fn clear_inputs(&mut self) {
        self.inputs.iter_mut().for_each(|slot| *slot = None);
    }

    pub(crate) fn clear_outputs(&mut self) {
        self.outputs.iter_mut().for_each(|slot| *slot = None);
    }

    /// Computes the output buffer from the input buffer and parameters.
    ///
    /// The output buffer is expected to be cleared beforehand; variants that
    /// produce nothing leave their outputs absent.
    pub(crate) fn calculate(&mut self) {
        let Self {
            kind,
            frozen,
            inputs,
            outputs,
            ..
        } = self;
        let input = |i: usize| inputs.get(i).and_then(Option::as_ref);
        let mut emit = |value: Option<Value>| {
            if let Some(slot) = outputs.first_mut() {
                *slot = value;
            }
        };

        match kind {
            NodeKind::Register { value } => {
                if !*frozen && let Some(v) = input(0) {
                    *value = v.coerce_int(10);
                }
                emit(Some(Value::Int(*value)));
            }
            NodeKind::Arithmetic { op, value } => {
                *value = match (input(0), input(1)) {
                    (Some(a), Some(b)) => op.apply(a.coerce_int(10), b.coerce_int(10)),
                    _ => None,
                };
                emit(value.map(Value::Int));
            }
            NodeKind::Point { value } => {
                if *frozen {
                    return;
                }
                *value = match (input(0), input(1)) {
                    (Some(x), Some(y)) => Some(Point::new(x.coerce_int(10), y.coerce_int(10))),
                    _ => None,
                };
                emit(value.map(Value::Point));
            }
            NodeKind::Conditional { op } => {
                let holds = match (input(0), input(1)) {
                    (Some(a), Some(b)) => op.holds(a.coerce_int(10), b.coerce_int(10)),
                    _ => false,
                };
                let chosen = if holds { input(2) } else { input(3) };
                emit(chosen.cloned());
            }
            NodeKind::Plot { points } => {
                points.extend(inputs.iter().flatten().filter_map(Value::as_point));
            }
        }
    }
}

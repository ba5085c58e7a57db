//! Persisted graph state.
//!
//! The whole graph is written as one JSON document:
//!
//! ```json
//! {
//!     "nodes": [
//!         { "type": "RegisterNode", "value": 3, "frozen": false,
//!           "operation": "", "x": 0.0, "y": 200.0 }
//!     ],
//!     "wires": [
//!         { "start": { "node": 0, "terminal_type": 1, "idx": 0 },
//!           "end":   { "node": 1, "terminal_type": 0, "idx": 0 } }
//!     ]
//! }
//! ```
//!
//! Wires address nodes by their position in `nodes`, so the array order is
//! the contract. `terminal_type` is 0 for inputs and 1 for outputs.
//!
//! Restoring is all-or-nothing: [`StateFile::restore`] builds a fresh
//! [`Graph`] and only returns it once every entry has been processed.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use showtime_core::{
    ArithmeticOp, CompareOp, Direction, Graph, NodeId, NodeKind, Point, Terminal, Value, Variant,
    Vec2,
};

use crate::error::ConfigError;

/// One node as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Variant name, e.g. `RegisterNode`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Variant-specific payload.
    #[serde(default)]
    pub value: Json,
    /// Whether the node was frozen.
    #[serde(default)]
    pub frozen: bool,
    /// Operation symbol, empty for variants without one.
    #[serde(default)]
    pub operation: String,
    /// Canvas x.
    pub x: f64,
    /// Canvas y.
    pub y: f64,
}

/// One end of a persisted wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalRecord {
    /// Index into [`StateFile::nodes`].
    pub node: usize,
    /// 0 = input, 1 = output.
    pub terminal_type: u8,
    /// Slot index.
    pub idx: usize,
}

/// One persisted wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    /// Output end.
    pub start: TerminalRecord,
    /// Input end.
    pub end: TerminalRecord,
}

/// The persisted form of a whole graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    /// Nodes in z-order.
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    /// Wires between entries of `nodes`.
    #[serde(default)]
    pub wires: Vec<WireRecord>,
}

/// What restore had to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// `type` of every node entry that was not recognized.
    pub skipped_nodes: Vec<String>,
    /// Wires dropped because an end was skipped or the graph refused them.
    pub dropped_wires: usize,
}

impl RestoreReport {
    /// Whether everything in the file made it into the graph.
    pub fn is_complete(&self) -> bool {
        self.skipped_nodes.is_empty() && self.dropped_wires == 0
    }
}

/// Persisted name of a variant.
pub fn type_name(variant: Variant) -> &'static str {
    match variant {
        Variant::Register => "RegisterNode",
        Variant::Arithmetic => "ArithmeticNode",
        Variant::Point => "PointNode",
        Variant::Conditional => "ConditionalNode",
        Variant::Plot => "GraphNode",
    }
}

/// Variant for a persisted name.
pub fn variant_from_type(name: &str) -> Option<Variant> {
    match name {
        "RegisterNode" => Some(Variant::Register),
        "ArithmeticNode" => Some(Variant::Arithmetic),
        "PointNode" => Some(Variant::Point),
        "ConditionalNode" => Some(Variant::Conditional),
        "GraphNode" | "PlotNode" => Some(Variant::Plot),
        _ => None,
    }
}

impl StateFile {
    /// Snapshots a graph.
    pub fn capture(graph: &Graph) -> Self {
        let mut index: HashMap<NodeId, usize> = HashMap::new();
        let nodes = graph
            .nodes()
            .enumerate()
            .map(|(i, node)| {
                index.insert(node.id(), i);
                let kind = node.kind();
                NodeRecord {
                    kind: type_name(node.variant()).to_owned(),
                    value: encode_value(kind),
                    frozen: node.is_frozen(),
                    operation: kind
                        .operation()
                        .map(|op| op.symbol().to_owned())
                        .unwrap_or_default(),
                    x: node.position().x,
                    y: node.position().y,
                }
            })
            .collect();

        let terminal = |t: Terminal| {
            index.get(&t.node).map(|&node| TerminalRecord {
                node,
                terminal_type: match t.direction {
                    Direction::Input => 0,
                    Direction::Output => 1,
                },
                idx: t.index,
            })
        };
        let wires = graph
            .wires()
            .iter()
            .filter_map(|w| {
                Some(WireRecord {
                    start: terminal(w.start())?,
                    end: terminal(w.end())?,
                })
            })
            .collect();

        Self { nodes, wires }
    }

    /// Rebuilds a graph.
    ///
    /// Unknown node types are skipped, along with wires that touch them.
    /// Wires are replayed through [`Graph::connect`] and obey the same rules
    /// as live editing. A wire naming a node index past the end of `nodes`,
    /// or a `terminal_type` other than 0 or 1, makes the whole file invalid.
    pub fn restore(&self) -> Result<(Graph, RestoreReport), ConfigError> {
        let mut graph = Graph::new();
        let mut report = RestoreReport::default();
        let mut ids = Vec::with_capacity(self.nodes.len());

        for (i, record) in self.nodes.iter().enumerate() {
            let Some(variant) = variant_from_type(&record.kind) else {
                tracing::warn!(index = i, kind = %record.kind, "skipping unknown node type");
                report.skipped_nodes.push(record.kind.clone());
                ids.push(None);
                continue;
            };
            let kind = decode_kind(variant, record);
            let id = graph.add_node_with(kind, Vec2::new(record.x, record.y));
            if record.frozen {
                graph.set_frozen(id, true)?;
            }
            ids.push(Some(id));
        }

        for (i, wire) in self.wires.iter().enumerate() {
            let start = resolve(&ids, i, wire.start)?;
            let end = resolve(&ids, i, wire.end)?;
            let (Some(start), Some(end)) = (start, end) else {
                tracing::warn!(index = i, "dropping wire to skipped node");
                report.dropped_wires += 1;
                continue;
            };
            if graph.connect(start, end).is_none() {
                tracing::warn!(index = i, %start, %end, "dropping invalid wire");
                report.dropped_wires += 1;
            }
        }

        Ok((graph, report))
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON, indented by four spaces.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(out).map_err(|e| ConfigError::InvalidState(e.to_string()))
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_json(&content)
    }

    /// Save to a JSON file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }
}

/// Captures `graph` and writes it to `path`.
pub fn save_graph(graph: &Graph, path: impl AsRef<Path>) -> Result<StateFile, ConfigError> {
    let path = path.as_ref();
    let state = StateFile::capture(graph);
    state.save(path)?;
    tracing::info!(
        path = %path.display(),
        nodes = state.nodes.len(),
        wires = state.wires.len(),
        "state saved"
    );
    Ok(state)
}

/// Reads `path` and rebuilds the graph it describes.
///
/// Nothing is returned unless the file was read, parsed and rebuilt in full,
/// so a caller swapping the result in never ends up with a partial graph.
pub fn load_graph(path: impl AsRef<Path>) -> Result<(Graph, RestoreReport), ConfigError> {
    let path = path.as_ref();
    let (graph, report) = StateFile::load(path)?.restore()?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        wires = graph.wire_count(),
        skipped = report.skipped_nodes.len(),
        "state restored"
    );
    Ok((graph, report))
}

fn resolve(
    ids: &[Option<NodeId>],
    wire: usize,
    record: TerminalRecord,
) -> Result<Option<Terminal>, ConfigError> {
    let slot = ids.get(record.node).ok_or_else(|| {
        ConfigError::InvalidState(format!(
            "wire {wire}: node index {} out of range ({} nodes)",
            record.node,
            ids.len()
        ))
    })?;
    let direction = match record.terminal_type {
        0 => Direction::Input,
        1 => Direction::Output,
        other => {
            return Err(ConfigError::InvalidState(format!(
                "wire {wire}: terminal_type {other} is neither 0 nor 1"
            )));
        }
    };
    Ok(slot.map(|node| Terminal::new(node, direction, record.idx)))
}

fn encode_value(kind: &NodeKind) -> Json {
    let point = |p: &Point| Json::from(vec![p.x, p.y]);
    match kind {
        NodeKind::Register { value } => Json::from(*value),
        NodeKind::Arithmetic { value, .. } => value.map_or(Json::Null, Json::from),
        NodeKind::Point { value } => value.as_ref().map_or(Json::Null, point),
        NodeKind::Conditional { .. } => Json::Null,
        NodeKind::Plot { points } => points.iter().map(point).collect(),
    }
}

fn decode_kind(variant: Variant, record: &NodeRecord) -> NodeKind {
    let mut kind = NodeKind::new(variant);
    match &mut kind {
        NodeKind::Register { value } => {
            *value = decode_scalar(&record.value).map_or(0, |v| v.coerce_int(10));
        }
        NodeKind::Arithmetic { op, value } => {
            *op = decode_op(&record.operation, ArithmeticOp::from_symbol, *op);
            *value = record.value.as_i64();
        }
        NodeKind::Point { value } => *value = decode_point(&record.value),
        NodeKind::Conditional { op } => {
            *op = decode_op(&record.operation, CompareOp::from_symbol, *op);
        }
        NodeKind::Plot { points } => {
            if let Some(items) = record.value.as_array() {
                points.extend(items.iter().filter_map(decode_point));
            }
        }
    }
    kind
}

fn decode_op<T: Copy>(symbol: &str, parse: fn(&str) -> Option<T>, default: T) -> T {
    parse(symbol).unwrap_or_else(|| {
        tracing::warn!(operation = symbol, "unknown operation, using default");
        default
    })
}

fn decode_point(json: &Json) -> Option<Point> {
    match json.as_array()?.as_slice() {
        [x, y] => Some(Point::new(x.as_i64()?, y.as_i64()?)),
        _ => None,
    }
}

/// Maps a persisted scalar onto a [`Value`], for coercion.
fn decode_scalar(json: &Json) -> Option<Value> {
    match json {
        Json::Bool(b) => Some(Value::Bool(*b)),
        Json::Number(n) => Some(n.as_i64().map_or_else(
            || Value::Float(n.as_f64().unwrap_or_default()),
            Value::Int,
        )),
        Json::String(s) => Some(Value::Text(s.clone())),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

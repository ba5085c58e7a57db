//! Value prompts: a request/response boundary for text entry.
//!
//! The editor never blocks waiting for the user. It emits a [`ValuePrompt`]
//! and the host, whenever it has an answer, calls [`ValuePrompt::answer`].

use showtime_core::value::parse_int;
use showtime_core::{Graph, GraphError, NodeId, NodeKind};

/// A request to ask the user for a new Register value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValuePrompt {
    /// Register being edited.
    pub node: NodeId,
    /// Dialog title.
    pub title: &'static str,
    /// Dialog description.
    pub description: &'static str,
    /// Text pre-filled in the entry: the current value.
    pub default: String,
}

impl ValuePrompt {
    /// Builds a prompt for Register `node`.
    pub fn for_register(graph: &Graph, node: NodeId) -> Result<Self, GraphError> {
        let kind = graph
            .node(node)
            .ok_or(GraphError::NodeNotFound(node))?
            .kind();
        let NodeKind::Register { value } = kind else {
            return Err(GraphError::NotARegister(node));
        };
        Ok(Self {
            node,
            title: "New Constant Value",
            description: "Enter new constant value:",
            default: value.to_string(),
        })
    }

    /// Applies the user's answer.
    ///
    /// `None` (cancelled) and empty text leave the Register untouched and
    /// return `Ok(false)`. Any other text is parsed with base prefix
    /// detection (`0x`, `0o`, `0b`), falling back to 0, then stored and
    /// emitted immediately.
    pub fn answer(&self, graph: &mut Graph, text: Option<&str>) -> Result<bool, GraphError> {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Ok(false);
        };
        let value = parse_int(text, 0).unwrap_or(0);
        graph.set_register_value(self.node, value)?;
        tracing::debug!(node = %self.node, value, "register value set");
        Ok(true)
    }
}

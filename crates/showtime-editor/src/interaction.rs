//! The interaction state machine.
//!
//! Pointer positions arrive in widget space; the editor adds its pan
//! `origin` to get canvas space before hit-testing. Commands act on whatever
//! lies under the pointer at the time; there is no persistent selection.

use showtime_core::{Graph, GraphError, Hit, NodeId, Terminal, Vec2, Wire, WireCurve};

use crate::keys::{Command, Key};
use crate::menu::{ContextMenu, MenuAction};
use crate::prompt::ValuePrompt;

/// A pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Usually the left button: drag nodes, draw wires, pan.
    Primary,
    /// Ignored by the canvas.
    Middle,
    /// Usually the right button: context menus.
    Secondary,
}

impl Button {
    /// Maps a conventional button number (1 = primary, 2 = middle,
    /// 3 = secondary).
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::Primary),
            2 => Some(Self::Middle),
            3 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// What a primary-button drag is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    /// No drag in progress.
    #[default]
    Default,
    /// Dragging a node body.
    MovingNode {
        /// Node being moved.
        node: NodeId,
        /// Pointer position minus node position at press time.
        grab: Vec2,
    },
    /// Drawing a wire out of a terminal.
    CreatingWire {
        /// Terminal the drag started on.
        start: Terminal,
        /// Loose end, in canvas space.
        end: Vec2,
    },
    /// Panning the canvas.
    MovingCanvas,
}

/// Something only the host can do, emitted by the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// Present a context menu at the pointer.
    ContextMenu(ContextMenu),
    /// Ask the user for a value and answer with [`ValuePrompt::answer`].
    AskValue(ValuePrompt),
    /// Persist the graph.
    Save,
    /// Replace the graph with persisted state, then call
    /// [`Editor::reset_view`].
    Restore,
}

/// Canvas interaction state for one editing session.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    state: InteractionState,
    origin: Vec2,
    pointer: Vec2,
    highlighted: Option<Terminal>,
}

impl Editor {
    /// Creates an editor with the view at the canvas origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Pan offset: canvas position of the widget's top-left corner.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Last pointer position, in widget space.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Last pointer position, in canvas space.
    pub fn canvas_pointer(&self) -> Vec2 {
        self.to_canvas(self.pointer)
    }

    /// Converts a widget-space position to canvas space.
    pub fn to_canvas(&self, widget: Vec2) -> Vec2 {
        widget + self.origin
    }

    /// Terminal under the pointer after the last motion, for highlighting.
    pub fn highlighted(&self) -> Option<Terminal> {
        self.highlighted
    }

    /// Resets the pan to the canvas origin and abandons any drag. Called
    /// after the graph is restored.
    pub fn reset_view(&mut self) {
        self.origin = Vec2::ZERO;
        self.state = InteractionState::Default;
        self.highlighted = None;
    }

    /// Curve of the wire being drawn, if any.
    pub fn pending_wire(&self, graph: &Graph, phase: f64) -> Option<WireCurve> {
        match self.state {
            InteractionState::CreatingWire { start, end } => {
                let from = graph.terminal_position(start, phase)?;
                Some(WireCurve::between(from, end))
            }
            _ => None,
        }
    }

    /// Handles a button press at widget position `at`.
    ///
    /// A primary press starts a drag chosen by what lies under the pointer;
    /// a secondary press returns the context menu for it.
    pub fn pointer_pressed(
        &mut self,
        graph: &Graph,
        phase: f64,
        at: Vec2,
        button: Button,
    ) -> Option<Request> {
        self.pointer = at;
        let pos = self.to_canvas(at);
        let hit = graph.locate(pos, phase);

        match button {
            Button::Primary => {
                self.state = match hit {
                    Some(Hit::Body(node)) => {
                        let origin = graph.node(node).map_or(pos, |n| n.position());
                        InteractionState::MovingNode {
                            node,
                            grab: pos - origin,
                        }
                    }
                    Some(Hit::Terminal(start)) => InteractionState::CreatingWire {
                        start,
                        end: graph.terminal_position(start, phase).unwrap_or(pos),
                    },
                    None => InteractionState::MovingCanvas,
                };
                tracing::debug!(state = ?self.state, "pointer pressed");
                None
            }
            Button::Secondary => {
                let variant = hit.and_then(|h| graph.node(h.node())).map(|n| n.variant());
                Some(Request::ContextMenu(ContextMenu::for_hit(hit, variant, pos)))
            }
            Button::Middle => None,
        }
    }

    /// Handles pointer motion to widget position `at`.
    pub fn pointer_moved(&mut self, graph: &mut Graph, phase: f64, at: Vec2) {
        let delta = at - self.pointer;
        self.pointer = at;

        match &mut self.state {
            InteractionState::MovingNode { node, grab } => {
                let target = at + self.origin - *grab;
                if graph.move_node(*node, target).is_err() {
                    // The node was deleted mid-drag.
                    self.state = InteractionState::Default;
                }
            }
            InteractionState::CreatingWire { end, .. } => *end = at + self.origin,
            InteractionState::MovingCanvas => self.origin -= delta,
            InteractionState::Default => {}
        }

        self.highlighted = match graph.locate(self.canvas_pointer(), phase) {
            Some(Hit::Terminal(t)) => Some(t),
            _ => None,
        };
    }

    /// Handles a button release at widget position `at`. Returns the wire
    /// created by a completed wire drag.
    ///
    /// Every release ends the current drag. A wire drag released on a
    /// different terminal connects the two; anywhere else it is abandoned.
    pub fn pointer_released(
        &mut self,
        graph: &mut Graph,
        phase: f64,
        at: Vec2,
        button: Button,
    ) -> Option<Wire> {
        self.pointer = at;
        let state = std::mem::take(&mut self.state);

        let InteractionState::CreatingWire { start, .. } = state else {
            return None;
        };
        if button != Button::Primary {
            return None;
        }
        match graph.locate(self.canvas_pointer(), phase) {
            Some(Hit::Terminal(end)) if end != start => {
                let wire = graph.connect(start, end);
                tracing::debug!(%start, %end, created = wire.is_some(), "wire drag released");
                wire
            }
            _ => None,
        }
    }

    /// Handles a key press, acting at the current pointer position.
    ///
    /// Node commands apply to the body under the pointer (not a terminal).
    pub fn key_pressed(
        &mut self,
        graph: &mut Graph,
        phase: f64,
        key: Key,
    ) -> Result<Option<Request>, GraphError> {
        let pos = self.canvas_pointer();
        let body = match graph.locate(pos, phase) {
            Some(Hit::Body(id)) => Some(id),
            _ => None,
        };
        tracing::debug!(%key, ?body, "key pressed");

        match (key.command(), body) {
            (Command::AddNode(variant), _) => {
                graph.add_node(variant, pos);
            }
            (Command::Freeze, Some(id)) => graph.set_frozen(id, true)?,
            (Command::Thaw, Some(id)) => graph.set_frozen(id, false)?,
            (Command::Delete, Some(id)) => graph.remove_node(id)?,
            (Command::EditValue, Some(id)) => {
                return Ok(ValuePrompt::for_register(graph, id)
                    .ok()
                    .map(Request::AskValue));
            }
            (Command::Save, _) => return Ok(Some(Request::Save)),
            (Command::Restore, _) => return Ok(Some(Request::Restore)),
            _ => {}
        }
        Ok(None)
    }

    /// Performs a context-menu action.
    pub fn apply_menu_action(
        &mut self,
        graph: &mut Graph,
        action: MenuAction,
    ) -> Result<Option<Request>, GraphError> {
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::AddNode(variant, at) => {
                graph.add_node(variant, at);
            }
            MenuAction::Save => return Ok(Some(Request::Save)),
            MenuAction::Load => return Ok(Some(Request::Restore)),
            MenuAction::Disconnect(terminal) => {
                graph.disconnect(terminal);
            }
            MenuAction::SetValue(id) => {
                return ValuePrompt::for_register(graph, id).map(|p| Some(Request::AskValue(p)));
            }
            MenuAction::Freeze(id) => graph.set_frozen(id, true)?,
            MenuAction::Thaw(id) => graph.set_frozen(id, false)?,
            MenuAction::SetOperation(id, op) => graph.set_operation(id, op)?,
            MenuAction::ClearPlot(id) => graph.clear_plot(id)?,
            MenuAction::Remove(id) => graph.remove_node(id)?,
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showtime_core::{ArithmeticOp, Operation, Variant};

    const PHASE: f64 = 0.0;

    /// Register at (0, 200) and Arithmetic at (300, 200); bodies span
    /// y in [95, 195] on the beat.
    fn setup() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node(Variant::Register, Vec2::new(0.0, 200.0));
        let b = graph.add_node(Variant::Arithmetic, Vec2::new(300.0, 200.0));
        (graph, a, b)
    }

    fn terminal_at(graph: &Graph, t: Terminal) -> Vec2 {
        graph.terminal_position(t, PHASE).unwrap()
    }

    #[test]
    fn test_press_on_body_moves_node() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        editor.pointer_pressed(&graph, PHASE, Vec2::new(50.0, 150.0), Button::Primary);
        assert_eq!(
            editor.state(),
            InteractionState::MovingNode {
                node: a,
                grab: Vec2::new(50.0, -50.0)
            }
        );
        editor.pointer_moved(&mut graph, PHASE, Vec2::new(70.0, 160.0));
        assert_eq!(graph.node(a).unwrap().position(), Vec2::new(20.0, 210.0));
        editor.pointer_released(&mut graph, PHASE, Vec2::new(70.0, 160.0), Button::Primary);
        assert_eq!(editor.state(), InteractionState::Default);
    }

    #[test]
    fn test_press_on_blank_pans() {
        let (mut graph, _, _) = setup();
        let mut editor = Editor::new();
        editor.pointer_pressed(&graph, PHASE, Vec2::new(500.0, 500.0), Button::Primary);
        assert_eq!(editor.state(), InteractionState::MovingCanvas);
        editor.pointer_moved(&mut graph, PHASE, Vec2::new(520.0, 490.0));
        assert_eq!(editor.origin(), Vec2::new(-20.0, 10.0));
        assert_eq!(editor.to_canvas(Vec2::new(520.0, 490.0)), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_wire_drag_connects() {
        let (mut graph, a, b) = setup();
        let mut editor = Editor::new();
        let from = terminal_at(&graph, Terminal::output(a, 0));
        let to = terminal_at(&graph, Terminal::input(b, 1));

        editor.pointer_pressed(&graph, PHASE, from, Button::Primary);
        assert!(matches!(
            editor.state(),
            InteractionState::CreatingWire { start, .. } if start == Terminal::output(a, 0)
        ));
        editor.pointer_moved(&mut graph, PHASE, to);
        assert_eq!(editor.highlighted(), Some(Terminal::input(b, 1)));
        assert!(editor.pending_wire(&graph, PHASE).is_some());

        let wire = editor
            .pointer_released(&mut graph, PHASE, to, Button::Primary)
            .unwrap();
        assert_eq!(wire.start(), Terminal::output(a, 0));
        assert_eq!(wire.end(), Terminal::input(b, 1));
        assert_eq!(graph.wire_count(), 1);
    }

    #[test]
    fn test_wire_drag_from_input_is_normalized() {
        let (mut graph, a, b) = setup();
        let mut editor = Editor::new();
        let from = terminal_at(&graph, Terminal::input(b, 0));
        let to = terminal_at(&graph, Terminal::output(a, 0));
        editor.pointer_pressed(&graph, PHASE, from, Button::Primary);
        let wire = editor
            .pointer_released(&mut graph, PHASE, to, Button::Primary)
            .unwrap();
        assert_eq!(wire.start(), Terminal::output(a, 0));
    }

    #[test]
    fn test_wire_drag_abandoned_on_blank() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        let from = terminal_at(&graph, Terminal::output(a, 0));
        editor.pointer_pressed(&graph, PHASE, from, Button::Primary);
        let released = editor.pointer_released(
            &mut graph,
            PHASE,
            Vec2::new(900.0, 900.0),
            Button::Primary,
        );
        assert!(released.is_none());
        assert_eq!(graph.wire_count(), 0);
        assert_eq!(editor.state(), InteractionState::Default);
    }

    #[test]
    fn test_wire_drag_released_on_start_does_nothing() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        let from = terminal_at(&graph, Terminal::output(a, 0));
        editor.pointer_pressed(&graph, PHASE, from, Button::Primary);
        assert!(editor
            .pointer_released(&mut graph, PHASE, from, Button::Primary)
            .is_none());
    }

    #[test]
    fn test_wire_to_same_node_rejected() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        let from = terminal_at(&graph, Terminal::output(a, 0));
        let to = terminal_at(&graph, Terminal::input(a, 0));
        editor.pointer_pressed(&graph, PHASE, from, Button::Primary);
        assert!(editor
            .pointer_released(&mut graph, PHASE, to, Button::Primary)
            .is_none());
        assert_eq!(graph.wire_count(), 0);
    }

    #[test]
    fn test_panned_view_hits_canvas_positions() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        editor.pointer_pressed(&graph, PHASE, Vec2::new(600.0, 600.0), Button::Primary);
        editor.pointer_moved(&mut graph, PHASE, Vec2::new(700.0, 600.0));
        editor.pointer_released(&mut graph, PHASE, Vec2::new(700.0, 600.0), Button::Primary);
        assert_eq!(editor.origin(), Vec2::new(-100.0, 0.0));

        // Canvas (50, 150) now sits at widget (150, 150).
        editor.pointer_pressed(&graph, PHASE, Vec2::new(150.0, 150.0), Button::Primary);
        assert!(matches!(
            editor.state(),
            InteractionState::MovingNode { node, .. } if node == a
        ));
    }

    #[test]
    fn test_secondary_press_opens_menu() {
        let (graph, a, _) = setup();
        let mut editor = Editor::new();
        let req = editor.pointer_pressed(&graph, PHASE, Vec2::new(50.0, 150.0), Button::Secondary);
        let Some(Request::ContextMenu(menu)) = req else {
            panic!("expected a menu, got {req:?}");
        };
        assert_eq!(menu.target, crate::menu::MenuTarget::Node(a, Variant::Register));
        assert_eq!(editor.state(), InteractionState::Default);
    }

    #[test]
    fn test_keys_act_on_body_under_pointer() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        editor.pointer_moved(&mut graph, PHASE, Vec2::new(50.0, 150.0));

        editor.key_pressed(&mut graph, PHASE, Key::F).unwrap();
        assert!(graph.node(a).unwrap().is_frozen());
        editor.key_pressed(&mut graph, PHASE, Key::T).unwrap();
        assert!(!graph.node(a).unwrap().is_frozen());

        let req = editor.key_pressed(&mut graph, PHASE, Key::V).unwrap();
        assert!(matches!(req, Some(Request::AskValue(p)) if p.node == a));

        editor.key_pressed(&mut graph, PHASE, Key::D).unwrap();
        assert!(!graph.contains(a));
    }

    #[test]
    fn test_keys_ignore_terminals_and_blank() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        let out = terminal_at(&graph, Terminal::output(a, 0));
        editor.pointer_moved(&mut graph, PHASE, out);
        editor.key_pressed(&mut graph, PHASE, Key::D).unwrap();
        assert!(graph.contains(a));

        editor.pointer_moved(&mut graph, PHASE, Vec2::new(900.0, 900.0));
        assert_eq!(editor.key_pressed(&mut graph, PHASE, Key::V), Ok(None));
    }

    #[test]
    fn test_add_keys_place_at_pointer() {
        let mut graph = Graph::new();
        let mut editor = Editor::new();
        editor.pointer_moved(&mut graph, PHASE, Vec2::new(40.0, 60.0));
        editor.key_pressed(&mut graph, PHASE, Key::R).unwrap();
        editor.key_pressed(&mut graph, PHASE, Key::A).unwrap();
        let variants: Vec<_> = graph.nodes().map(|n| n.variant()).collect();
        assert_eq!(variants, [Variant::Register, Variant::Arithmetic]);
        assert!(graph.nodes().all(|n| n.position() == Vec2::new(40.0, 60.0)));
    }

    #[test]
    fn test_save_and_restore_keys_emit_requests() {
        let mut graph = Graph::new();
        let mut editor = Editor::new();
        assert_eq!(editor.key_pressed(&mut graph, PHASE, Key::F9), Ok(Some(Request::Save)));
        assert_eq!(editor.key_pressed(&mut graph, PHASE, Key::F6), Ok(Some(Request::Restore)));
    }

    #[test]
    fn test_menu_actions() {
        let (mut graph, a, b) = setup();
        let mut editor = Editor::new();
        graph.connect(Terminal::output(a, 0), Terminal::input(b, 0));

        editor
            .apply_menu_action(&mut graph, MenuAction::Disconnect(Terminal::input(b, 0)))
            .unwrap();
        assert_eq!(graph.wire_count(), 0);

        let op = Operation::Arithmetic(ArithmeticOp::Subtract);
        editor
            .apply_menu_action(&mut graph, MenuAction::SetOperation(b, op))
            .unwrap();
        assert_eq!(graph.node(b).unwrap().kind().operation(), Some(op));

        assert_eq!(
            editor.apply_menu_action(&mut graph, MenuAction::SetOperation(a, op)),
            Err(GraphError::OperationMismatch(a, op))
        );

        editor
            .apply_menu_action(&mut graph, MenuAction::Remove(b))
            .unwrap();
        assert!(!graph.contains(b));
        assert_eq!(
            editor.apply_menu_action(&mut graph, MenuAction::Freeze(b)),
            Err(GraphError::NodeNotFound(b))
        );
    }

    #[test]
    fn test_deleting_dragged_node_ends_drag() {
        let (mut graph, a, _) = setup();
        let mut editor = Editor::new();
        editor.pointer_pressed(&graph, PHASE, Vec2::new(50.0, 150.0), Button::Primary);
        graph.remove_node(a).unwrap();
        editor.pointer_moved(&mut graph, PHASE, Vec2::new(60.0, 150.0));
        assert_eq!(editor.state(), InteractionState::Default);
    }

    #[test]
    fn test_reset_view() {
        let mut graph = Graph::new();
        let mut editor = Editor::new();
        editor.pointer_pressed(&graph, PHASE, Vec2::ZERO, Button::Primary);
        editor.pointer_moved(&mut graph, PHASE, Vec2::new(-30.0, -40.0));
        assert_ne!(editor.origin(), Vec2::ZERO);
        editor.reset_view();
        assert_eq!(editor.origin(), Vec2::ZERO);
        assert_eq!(editor.state(), InteractionState::Default);
    }

    #[test]
    fn test_button_numbers() {
        assert_eq!(Button::from_number(1), Some(Button::Primary));
        assert_eq!(Button::from_number(3), Some(Button::Secondary));
        assert_eq!(Button::from_number(9), None);
    }
}

//! Context menus.
//!
//! A secondary press produces a [`ContextMenu`] describing what the host
//! should pop up. Every item carries a fully-bound [`MenuAction`], so the
//! host hands the chosen action back to [`Editor::apply_menu_action`]
//! without tracking what was under the pointer.
//!
//! [`Editor::apply_menu_action`]: crate::Editor::apply_menu_action

use showtime_core::{ArithmeticOp, CompareOp, Hit, NodeId, Operation, Terminal, Variant, Vec2};

/// What the menu was opened on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuTarget {
    /// Empty canvas at this canvas position.
    BlankSpace(Vec2),
    /// A terminal.
    Terminal(Terminal),
    /// A node body.
    Node(NodeId, Variant),
}

/// A bound menu command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuAction {
    /// Add a node of the variant at the canvas position.
    AddNode(Variant, Vec2),
    /// Ask the host to save.
    Save,
    /// Ask the host to restore.
    Load,
    /// Remove every wire at the terminal.
    Disconnect(Terminal),
    /// Prompt for a new Register value.
    SetValue(NodeId),
    /// Freeze the node.
    Freeze(NodeId),
    /// Thaw the node.
    Thaw(NodeId),
    /// Replace the node's operation.
    SetOperation(NodeId, Operation),
    /// Empty a Plot.
    ClearPlot(NodeId),
    /// Delete the node.
    Remove(NodeId),
}

/// One row of a menu.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuEntry {
    /// Insensitive heading.
    Title(&'static str),
    /// Selectable item.
    Item {
        /// Text shown to the user.
        label: String,
        /// Action performed when chosen.
        action: MenuAction,
    },
    /// Visual separator.
    Separator,
}

impl MenuEntry {
    fn item(label: impl Into<String>, action: MenuAction) -> Self {
        Self::Item {
            label: label.into(),
            action,
        }
    }
}

/// A menu for the host to present.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
    /// What the menu applies to.
    pub target: MenuTarget,
    /// Rows, top to bottom.
    pub entries: Vec<MenuEntry>,
    /// Suggested number of columns.
    pub columns: usize,
}

impl ContextMenu {
    /// Builds the menu for a hit-test result, or for blank space at `at`.
    pub fn for_hit(hit: Option<Hit>, variant: Option<Variant>, at: Vec2) -> Self {
        match (hit, variant) {
            (Some(Hit::Terminal(t)), _) => Self::terminal(t),
            (Some(Hit::Body(id)), Some(v)) => Self::node(id, v),
            _ => Self::blank_space(at),
        }
    }

    /// Add-node and schema commands.
    pub fn blank_space(at: Vec2) -> Self {
        let mut entries = vec![MenuEntry::Title("Add Node")];
        entries.extend(
            Variant::ALL
                .into_iter()
                .map(|v| MenuEntry::item(v.name(), MenuAction::AddNode(v, at))),
        );
        entries.extend([
            MenuEntry::Separator,
            MenuEntry::Title("Schema"),
            MenuEntry::item("Save", MenuAction::Save),
            MenuEntry::item("Load", MenuAction::Load),
        ]);
        Self {
            target: MenuTarget::BlankSpace(at),
            entries,
            columns: 2,
        }
    }

    /// Terminal commands.
    pub fn terminal(terminal: Terminal) -> Self {
        Self {
            target: MenuTarget::Terminal(terminal),
            entries: vec![
                MenuEntry::Title("Terminal"),
                MenuEntry::item("Disconnect", MenuAction::Disconnect(terminal)),
            ],
            columns: 1,
        }
    }

    /// Per-variant node commands.
    pub fn node(id: NodeId, variant: Variant) -> Self {
        let freeze = [
            MenuEntry::item("Freeze", MenuAction::Freeze(id)),
            MenuEntry::item("Thaw", MenuAction::Thaw(id)),
        ];
        let remove = MenuEntry::item("Remove", MenuAction::Remove(id));

        let (title, entries, columns) = match variant {
            Variant::Register => {
                let mut e = vec![MenuEntry::item("Set Value", MenuAction::SetValue(id))];
                e.extend(freeze);
                ("Register Node", e, 1)
            }
            Variant::Arithmetic => {
                let mut e = freeze.to_vec();
                e.extend(ArithmeticOp::ALL.into_iter().map(|op| {
                    MenuEntry::item(
                        format!("({})", op.symbol()),
                        MenuAction::SetOperation(id, Operation::Arithmetic(op)),
                    )
                }));
                ("Arithmetic Node", e, 2)
            }
            Variant::Point => ("Point Node", freeze.to_vec(), 1),
            Variant::Conditional => {
                let mut e = freeze.to_vec();
                e.extend(CompareOp::ALL.into_iter().map(|op| {
                    MenuEntry::item(
                        format!("({})", op.symbol()),
                        MenuAction::SetOperation(id, Operation::Compare(op)),
                    )
                }));
                ("Conditional Node", e, 2)
            }
            Variant::Plot => (
                "Plot Node",
                vec![MenuEntry::item("Clear", MenuAction::ClearPlot(id))],
                1,
            ),
        };

        let mut all = vec![MenuEntry::Title(title)];
        all.extend(entries);
        all.push(remove);
        Self {
            target: MenuTarget::Node(id, variant),
            entries: all,
            columns,
        }
    }

    /// Selectable actions, in order.
    pub fn actions(&self) -> impl Iterator<Item = MenuAction> + '_ {
        self.entries.iter().filter_map(|e| match e {
            MenuEntry::Item { action, .. } => Some(*action),
            _ => None,
        })
    }

    /// Finds an item by its label.
    pub fn action_labelled(&self, label: &str) -> Option<MenuAction> {
        self.entries.iter().find_map(|e| match e {
            MenuEntry::Item { label: l, action } if l.eq_ignore_ascii_case(label) => Some(*action),
            _ => None,
        })
    }
}

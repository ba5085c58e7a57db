//! Showtime Editor - canvas interaction for a live dataflow graph
//!
//! A toolkit-neutral state machine that turns pointer and keyboard events
//! into edits on a [`showtime_core::Graph`]. It never draws anything and
//! never blocks: anything only the host can do (popping up a menu, asking
//! for text, touching the filesystem) comes back as a [`Request`].
//!
//! # Core Abstractions
//!
//! - [`Editor`] - pan origin, pointer, drag state and terminal highlight
//! - [`InteractionState`] - what the current primary-button drag is doing
//! - [`Key`] / [`Command`] - keyboard commands at the pointer
//! - [`ContextMenu`] / [`MenuAction`] - per-target secondary-press menus
//! - [`ValuePrompt`] - the asynchronous "new constant value" dialog
//!
//! # Example
//!
//! ```rust
//! use showtime_core::{Graph, Terminal, Variant, Vec2};
//! use showtime_editor::{Button, Editor};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node(Variant::Register, Vec2::new(0.0, 200.0));
//! let b = graph.add_node(Variant::Register, Vec2::new(300.0, 200.0));
//! let from = graph.terminal_position(Terminal::output(a, 0), 0.0).unwrap();
//! let to = graph.terminal_position(Terminal::input(b, 0), 0.0).unwrap();
//!
//! let mut editor = Editor::new();
//! editor.pointer_pressed(&graph, 0.0, from, Button::Primary);
//! editor.pointer_moved(&mut graph, 0.0, to);
//! let wire = editor.pointer_released(&mut graph, 0.0, to, Button::Primary);
//! assert!(wire.is_some());
//! assert_eq!(graph.wire_count(), 1);
//! ```

mod interaction;
pub mod keys;
pub mod menu;
pub mod prompt;

pub use interaction::{Button, Editor, InteractionState, Request};
pub use keys::{Command, Key, UnknownKey};
pub use menu::{ContextMenu, MenuAction, MenuEntry, MenuTarget};
pub use prompt::ValuePrompt;

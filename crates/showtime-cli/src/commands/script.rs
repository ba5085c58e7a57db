//! Scripted editing sessions.
//!
//! A script is a text file with one event per line, replayed through the
//! same editor a windowed host would drive. Blank lines and `#` comments are
//! ignored.
//!
//! ```text
//! move 50 150          # pointer motion, widget coordinates
//! key r                # add a Register at the pointer
//! press 150 145 1      # button 1 = primary, 3 = secondary
//! release 300 170 1
//! key v
//! answer 0x10          # reply to the open value prompt ("cancel" to dismiss)
//! press 50 150 3
//! menu Freeze          # pick an item from the open context menu
//! frame 1000           # host frame at this many ms since the start
//! tick 2               # evaluate directly, bypassing the clock
//! print
//! ```
//!
//! `key f9` saves to the state file and `key f6` restores from it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Args;
use showtime_config::{Settings, load_graph, save_graph};
use showtime_core::{Engine, Graph, Vec2};
use showtime_editor::{Button, ContextMenu, Editor, Key, Request, ValuePrompt};

use super::common::print_graph;

#[derive(Args)]
pub struct ScriptArgs {
    /// Script file
    file: PathBuf,

    /// State file used by save and restore (overrides settings)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Write the final graph here
    #[arg(long)]
    save: Option<PathBuf>,
}

pub fn run(args: ScriptArgs, settings: Settings) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let state_path = args.state.unwrap_or(settings.state_file);
    let mut session = Session::new(settings.bpm, state_path);

    for (n, line) in text.lines().enumerate() {
        let line_no = n + 1;
        let Some(command) = parse_line(line).with_context(|| format!("line {line_no}"))? else {
            continue;
        };
        session
            .apply(command)
            .with_context(|| format!("line {line_no}: {}", line.trim()))?;
    }

    println!("Final graph:");
    print_graph(session.engine.graph());

    if let Some(path) = &args.save {
        save_graph(session.engine.graph(), path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// One script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// Button press at a widget position.
    Press(Vec2, Button),
    /// Pointer motion.
    Move(Vec2),
    /// Button release.
    Release(Vec2, Button),
    /// Key press.
    Key(Key),
    /// Choose an item of the open menu by label.
    Menu(String),
    /// Reply to the open prompt; `None` cancels.
    Answer(Option<String>),
    /// Host frame at this elapsed time.
    Frame(Duration),
    /// Direct evaluation.
    Tick(u64),
    /// Print the graph.
    Print,
}

/// Parses one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "press" => {
            let (pos, button) = pointer_args(&args)?;
            ScriptCommand::Press(pos, button)
        }
        "release" => {
            let (pos, button) = pointer_args(&args)?;
            ScriptCommand::Release(pos, button)
        }
        "move" => ScriptCommand::Move(pointer_args(&args)?.0),
        "key" => {
            let [name] = args[..] else {
                bail!("expected: key NAME");
            };
            ScriptCommand::Key(name.parse()?)
        }
        "menu" if !rest.is_empty() => ScriptCommand::Menu(rest.to_owned()),
        "menu" => bail!("expected: menu LABEL"),
        "answer" => ScriptCommand::Answer(Some(rest.to_owned())),
        "cancel" => ScriptCommand::Answer(None),
        "frame" => {
            let [ms] = args[..] else {
                bail!("expected: frame MILLISECONDS");
            };
            ScriptCommand::Frame(Duration::from_millis(ms.parse()?))
        }
        "tick" => match args[..] {
            [] => ScriptCommand::Tick(1),
            [n] => ScriptCommand::Tick(n.parse()?),
            _ => bail!("expected: tick [COUNT]"),
        },
        "print" => ScriptCommand::Print,
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(command))
}

fn pointer_args(args: &[&str]) -> anyhow::Result<(Vec2, Button)> {
    let (x, y, button) = match args {
        [x, y] => (x, y, 1),
        [x, y, b] => (x, y, b.parse()?),
        _ => bail!("expected: X Y [BUTTON]"),
    };
    let button = Button::from_number(button)
        .with_context(|| format!("button must be 1, 2 or 3, got {button}"))?;
    Ok((Vec2::new(x.parse()?, y.parse()?), button))
}

/// An editing session: the engine, the editor, and whatever the editor is
/// waiting on.
struct Session {
    engine: Engine,
    editor: Editor,
    state_path: PathBuf,
    menu: Option<ContextMenu>,
    prompt: Option<ValuePrompt>,
}

impl Session {
    fn new(bpm: f64, state_path: PathBuf) -> Self {
        Self {
            engine: Engine::new(Graph::new(), bpm),
            editor: Editor::new(),
            state_path,
            menu: None,
            prompt: None,
        }
    }

    fn apply(&mut self, command: ScriptCommand) -> anyhow::Result<()> {
        let phase = self.engine.phase();
        match command {
            ScriptCommand::Press(pos, button) => {
                let request = self
                    .editor
                    .pointer_pressed(self.engine.graph(), phase, pos, button);
                self.handle(request)?;
            }
            ScriptCommand::Move(pos) => {
                self.editor.pointer_moved(self.engine.graph_mut(), phase, pos);
            }
            ScriptCommand::Release(pos, button) => {
                let graph = self.engine.graph_mut();
                if let Some(wire) = self.editor.pointer_released(graph, phase, pos, button) {
                    println!("wired {wire}");
                }
            }
            ScriptCommand::Key(key) => {
                let request = self
                    .editor
                    .key_pressed(self.engine.graph_mut(), phase, key)?;
                self.handle(request)?;
            }
            ScriptCommand::Menu(label) => {
                let menu = self.menu.take().context("no menu is open")?;
                let action = menu
                    .action_labelled(&label)
                    .with_context(|| format!("menu has no item '{label}'"))?;
                let request = self
                    .editor
                    .apply_menu_action(self.engine.graph_mut(), action)?;
                self.handle(request)?;
            }
            ScriptCommand::Answer(text) => {
                let prompt = self.prompt.take().context("no prompt is open")?;
                prompt.answer(self.engine.graph_mut(), text.as_deref())?;
            }
            ScriptCommand::Frame(elapsed) => {
                self.engine.frame(elapsed);
            }
            ScriptCommand::Tick(n) => {
                for _ in 0..n {
                    self.engine.graph_mut().tick();
                }
            }
            ScriptCommand::Print => print_graph(self.engine.graph()),
        }
        Ok(())
    }

    fn handle(&mut self, request: Option<Request>) -> anyhow::Result<()> {
        match request {
            None => {}
            Some(Request::ContextMenu(menu)) => self.menu = Some(menu),
            Some(Request::AskValue(prompt)) => self.prompt = Some(prompt),
            Some(Request::Save) => {
                save_graph(self.engine.graph(), &self.state_path)?;
                println!("state saved to {}", self.state_path.display());
            }
            Some(Request::Restore) => {
                let path = self.state_path.clone();
                self.restore(&path);
            }
        }
        Ok(())
    }

    /// A failed restore is reported and leaves the graph as it was.
    fn restore(&mut self, path: &Path) {
        match load_graph(path) {
            Ok((graph, _)) => {
                self.engine.restore(graph);
                self.editor.reset_view();
                self.menu = None;
                self.prompt = None;
                println!("state restored from {}", path.display());
            }
            Err(e) => {
                tracing::error!("restore failed: {e}");
                println!("restore failed, graph unchanged");
            }
        }
    }
}

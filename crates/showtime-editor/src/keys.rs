//! Keyboard commands.
//!
//! Keys are identified by what they do on the canvas, not by layout. Hosts
//! that deliver X11 hardware keycodes can map them with
//! [`Key::from_hardware_keycode`].

use std::fmt;
use std::str::FromStr;

use showtime_core::Variant;

/// A key the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `R`: add a Register at the pointer.
    R,
    /// `A`: add an Arithmetic node at the pointer.
    A,
    /// `F`: freeze the node under the pointer.
    F,
    /// `T`: thaw the node under the pointer.
    T,
    /// `D`: delete the node under the pointer.
    D,
    /// `V`: edit the value of the Register under the pointer.
    V,
    /// `F6`: restore saved state.
    F6,
    /// `F9`: save state.
    F9,
}

/// What a key asks the editor to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a node of this variant at the pointer.
    AddNode(Variant),
    /// Freeze the node body under the pointer.
    Freeze,
    /// Thaw the node body under the pointer.
    Thaw,
    /// Delete the node body under the pointer.
    Delete,
    /// Prompt for a new value of the Register under the pointer.
    EditValue,
    /// Ask the host to save.
    Save,
    /// Ask the host to restore.
    Restore,
}

impl Key {
    /// Every key, in keycode order.
    pub const ALL: [Self; 8] = [
        Self::R,
        Self::T,
        Self::A,
        Self::D,
        Self::F,
        Self::V,
        Self::F6,
        Self::F9,
    ];

    /// Maps an X11 hardware keycode (US layout, evdev) to a key.
    pub fn from_hardware_keycode(code: u16) -> Option<Self> {
        match code {
            27 => Some(Self::R),
            28 => Some(Self::T),
            38 => Some(Self::A),
            40 => Some(Self::D),
            41 => Some(Self::F),
            55 => Some(Self::V),
            72 => Some(Self::F6),
            75 => Some(Self::F9),
            _ => None,
        }
    }

    /// The X11 hardware keycode of this key.
    pub fn hardware_keycode(self) -> u16 {
        match self {
            Self::R => 27,
            Self::T => 28,
            Self::A => 38,
            Self::D => 40,
            Self::F => 41,
            Self::V => 55,
            Self::F6 => 72,
            Self::F9 => 75,
        }
    }

    /// The command bound to this key.
    pub fn command(self) -> Command {
        match self {
            Self::R => Command::AddNode(Variant::Register),
            Self::A => Command::AddNode(Variant::Arithmetic),
            Self::F => Command::Freeze,
            Self::T => Command::Thaw,
            Self::D => Command::Delete,
            Self::V => Command::EditValue,
            Self::F6 => Command::Restore,
            Self::F9 => Command::Save,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::A => "a",
            Self::F => "f",
            Self::T => "t",
            Self::D => "d",
            Self::V => "v",
            Self::F6 => "F6",
            Self::F9 => "F9",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}'", self.0)
    }
}

impl std::error::Error for UnknownKey {}

impl FromStr for Key {
    type Err = UnknownKey;

    /// Parses a key name, case-insensitively (`r`, `F9`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKey(s.to_owned()))
    }
}

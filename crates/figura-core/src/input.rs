//! Normalized pointer and keyboard events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only Control held.
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Only Shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Control, or Command on macOS hosts.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => *position,
        }
    }
}

/// Keys the editor binds to editing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    C,
    G,
    V,
    X,
    Delete,
    Escape,
}

/// Editing command bound to a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SelectAll,
    Copy,
    Cut,
    Paste,
    Group,
    Delete,
    Cancel,
}

impl Command {
    /// Resolve a key chord to its command.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Command> {
        match (key, modifiers.command()) {
            (Key::A, true) => Some(Command::SelectAll),
            (Key::C, true) => Some(Command::Copy),
            (Key::X, true) => Some(Command::Cut),
            (Key::V, true) => Some(Command::Paste),
            (Key::G, true) => Some(Command::Group),
            (Key::Delete, _) => Some(Command::Delete),
            (Key::Escape, _) => Some(Command::Cancel),
            _ => None,
        }
    }
}

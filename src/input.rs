//! Input model: tool modes, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` decides how a pointer-down on empty court is read. It never affects
//! token dragging. `InputState` is the gesture tracked between pointer-down and
//! pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::arrows::PendingArrow;
use crate::doc::{ArrowId, TokenId};
use crate::geometry::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Drag tokens only (default).
    #[default]
    Select,
    /// Draw arrows on the court.
    Arrow,
    /// Click arrows to delete them.
    Erase,
}

impl Tool {
    /// CSS cursor for the canvas while this tool is active.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Select => "default",
            Self::Arrow => "crosshair",
            Self::Erase => "pointer",
        }
    }

    /// Tool bound to a bare key press (`1`/`s`, `2`/`a`, `3`/`e`, `Escape`).
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "1" | "s" | "Escape" => Some(Self::Select),
            "2" | "a" => Some(Self::Arrow),
            "3" | "e" => Some(Self::Erase),
            _ => None,
        }
    }

    /// Name used by the host page and in serialized effects.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Arrow => "arrow",
            Self::Erase => "erase",
        }
    }

    /// Parse a tool name as used by the host page (`"select"`, `"arrow"`, `"erase"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Self::Select),
            "arrow" => Some(Self::Arrow),
            "erase" => Some(Self::Erase),
            _ => None,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"s"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Interaction state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    /// Arrow under the pointer while erasing; drawn highlighted.
    pub hovered_arrow: Option<ArrowId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A token is following the pointer.
    DraggingToken {
        id: TokenId,
        /// Token center minus the pointer position at grab time.
        grab_offset: Point,
    },
    /// An arrow is being drawn.
    DrawingArrow(PendingArrow),
}

impl InputState {
    /// Token being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<TokenId> {
        match self {
            Self::DraggingToken { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Arrow being drawn, if any.
    #[must_use]
    pub fn pending_arrow(&self) -> Option<&PendingArrow> {
        match self {
            Self::DrawingArrow(p) => Some(p),
            _ => None,
        }
    }
}

//! Input events fed to the editor state machine.
//!
//! Pointer positions are in screen pixels relative to the top-left corner of the displayed
//! canvas; the editor divides them by the viewport scale.

use crate::foundation::core::Point;

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    ArrowLeft,
    ArrowRight,
    /// Any other key; ignored.
    Other,
}

impl Key {
    /// Map a DOM-style key name (`"Delete"`, `"ArrowLeft"`, ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Where keyboard focus was when a key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// The canvas or nothing in particular.
    #[default]
    Canvas,
    /// A text field; editing shortcuts are suppressed.
    TextInput,
}

/// One user interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// Pointer left the canvas: clears hover and ends any drag.
    PointerLeave,
    KeyDown {
        key: Key,
        focus: Focus,
    },
    /// The displayed container changed width; the viewport scale is recomputed.
    ContainerResized {
        width: f64,
    },
}

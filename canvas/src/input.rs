//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the input engine. `Modifiers`
//! and `Button` capture the user's intent at the time of a pointer event.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying all context needed to compute incremental deltas and
//! emit the final committed action on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{GuestId, TableId};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the platform zoom modifier (ctrl or meta) is held.
    #[must_use]
    pub fn zoom(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"r"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The table that rotate/delete act on, if any.
    pub selected_id: Option<TableId>,
    /// Hovered drop target while a guest is being dragged.
    pub drop_target: Option<crate::hit::Hit>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging empty space.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
        /// Screen-space position of the press, used to tell a click from a pan.
        origin_screen: Point,
    },
    /// The user is moving a table across the canvas.
    DraggingTable {
        /// Id of the table being dragged.
        id: TableId,
        /// Pointer world position minus table centre at press time.
        grab_offset: Point,
        /// Table centre at press time; the last committed position.
        origin: Point,
    },
    /// The user is carrying a guest chip toward a seat.
    DraggingGuest {
        /// Id of the guest being dragged.
        guest_id: GuestId,
    },
}

impl InputState {
    /// Short mode name for logs and the host's status bar.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DraggingTable { .. } => "dragging-table",
            Self::DraggingGuest { .. } => "dragging-guest",
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

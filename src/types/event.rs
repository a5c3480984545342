//! Input events delivered by the host once per frame

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Keys the player reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    Escape,
    Other,
}

/// A discrete input event, processed in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary pointer button pressed at a window position
    PointerPressed(Point),
    /// Key pressed
    KeyPressed(Key),
}

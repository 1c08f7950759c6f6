//! Input events fed to the editor and viewer
//!
//! The windowing layer translates its own pointer, wheel and keyboard events
//! into these values; positions are always in screen pixels.

use kurbo::Point;

/// Pointer events over the plan
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    DoubleClick(Point),
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down(p)
            | PointerEvent::Move(p)
            | PointerEvent::Up(p)
            | PointerEvent::DoubleClick(p) => p,
        }
    }
}

/// Keyboard commands bound while a session is active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shortcut {
    Undo,
    Redo,
    DeleteVertex,
    /// Drop the interaction in progress and return to the select tool
    Escape,
    /// Close the polygon being drawn
    Finish,
}

/// Anything the editor can receive from the windowing layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorEvent {
    Pointer(PointerEvent),
    /// Wheel scroll at `position`; positive `delta` zooms in
    Wheel { position: Point, delta: f64 },
    Shortcut(Shortcut),
}

impl From<PointerEvent> for EditorEvent {
    fn from(event: PointerEvent) -> Self {
        EditorEvent::Pointer(event)
    }
}

impl From<Shortcut> for EditorEvent {
    fn from(shortcut: Shortcut) -> Self {
        EditorEvent::Shortcut(shortcut)
    }
}

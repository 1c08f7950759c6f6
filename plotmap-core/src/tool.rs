/// Tool system for the boundary editor toolbar
///
/// Defines the available drawing/editing tools and the transient state of an
/// interaction in progress.

use crate::point::NormalizedPoint;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Drawing and editing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    /// Select tool - pick an existing plot
    Select,
    /// Polygon tool - click to place boundary vertices
    Polygon,
    /// Rectangle tool - drag out a four-vertex boundary
    Rectangle,
    /// Edit tool - drag or delete vertices of the boundary
    Edit,
    /// Pan tool - drag the plan around
    Pan,
}

/// Tool state tracking for interactive operations
///
/// Nothing in here is committed: switching tools or pressing escape throws it
/// away without touching the undo history.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    /// Tool is idle (no operation in progress)
    Idle,

    /// Dragging a boundary vertex
    DraggingVertex {
        index: usize,
        /// Position before the drag, restored if the drag is abandoned
        origin: NormalizedPoint,
        /// A move arrived after the press; a bare click leaves the vertex alone
        moved: bool,
    },

    /// Creating a rectangle boundary
    CreatingRectangle {
        anchor: NormalizedPoint,
        current: NormalizedPoint,
    },

    /// Panning the view with the pan tool
    Panning { last: Point },
}

impl Default for ToolState {
    fn default() -> Self {
        Self::Idle
    }
}

impl Tool {
    /// Get display name for the tool
    pub fn display_name(self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Polygon => "Polygon",
            Tool::Rectangle => "Rectangle",
            Tool::Edit => "Edit Points",
            Tool::Pan => "Pan",
        }
    }

    /// Get all available tools
    pub fn all() -> &'static [Tool] {
        &[
            Tool::Select,
            Tool::Polygon,
            Tool::Rectangle,
            Tool::Edit,
            Tool::Pan,
        ]
    }

    /// Get keyboard shortcut hint
    pub fn shortcut_hint(self) -> &'static str {
        match self {
            Tool::Select => "V",
            Tool::Polygon => "P",
            Tool::Rectangle => "R",
            Tool::Edit => "E",
            Tool::Pan => "H",
        }
    }

    /// One-line usage hint for the status bar
    pub fn usage_hint(self) -> &'static str {
        match self {
            Tool::Select => "Click a plot to edit it",
            Tool::Polygon => "Click to add points, double-click or Enter to finish",
            Tool::Rectangle => "Drag to draw a rectangle",
            Tool::Edit => "Drag points to move them, Delete removes the selected point",
            Tool::Pan => "Drag to move the plan",
        }
    }

    /// Whether this tool changes the boundary geometry
    pub fn modifies_boundary(self) -> bool {
        matches!(self, Tool::Polygon | Tool::Rectangle | Tool::Edit)
    }
}

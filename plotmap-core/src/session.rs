//! Drawing session state
//!
//! A session is one continuous interaction of creating or editing a single
//! plot's boundary. It is created when drawing starts and dropped on commit or
//! cancel. Mutation is crate-private: outside code changes a session only by
//! feeding events through the tool state machine.

use crate::geometry::{is_valid_polygon, rectangle_to_quad};
use crate::point::{NormalizedPoint, Polygon};
use crate::tool::{Tool, ToolState};

/// Mutable state of one boundary edit
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingSession {
    pub(crate) mode: Tool,
    pub(crate) points: Polygon,
    pub(crate) selected_vertex: Option<usize>,
    pub(crate) state: ToolState,
    /// Last pointer position over the plan, for the polygon rubber band
    pub(crate) cursor: Option<NormalizedPoint>,
}

impl DrawingSession {
    /// Empty session with the given tool active
    pub fn new(mode: Tool) -> Self {
        Self::with_points(mode, Vec::new())
    }

    /// Session seeded with an existing boundary
    pub fn with_points(mode: Tool, points: Polygon) -> Self {
        Self {
            mode,
            points,
            selected_vertex: None,
            state: ToolState::Idle,
            cursor: None,
        }
    }

    /// Active tool
    pub fn mode(&self) -> Tool {
        self.mode
    }

    /// Boundary in progress, including any live (uncommitted) drag
    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub fn selected_vertex(&self) -> Option<usize> {
        self.selected_vertex
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn cursor(&self) -> Option<NormalizedPoint> {
        self.cursor
    }

    /// Anchor corner of a rectangle being dragged out
    pub fn rectangle_anchor(&self) -> Option<NormalizedPoint> {
        match self.state {
            ToolState::CreatingRectangle { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    /// Live preview quad of a rectangle being dragged out
    pub fn rectangle_preview(&self) -> Option<Polygon> {
        match self.state {
            ToolState::CreatingRectangle { anchor, current } => Some(rectangle_to_quad(anchor, current)),
            _ => None,
        }
    }

    pub fn is_dragging_vertex(&self) -> bool {
        matches!(self.state, ToolState::DraggingVertex { .. })
    }

    /// Whether the boundary could be committed as it stands
    pub fn is_valid(&self) -> bool {
        is_valid_polygon(&self.points)
    }

    /// Throw away uncommitted interaction state
    ///
    /// An abandoned vertex drag puts the vertex back where it was.
    pub(crate) fn cancel_interaction(&mut self) {
        if let ToolState::DraggingVertex { index, origin, .. } = self.state {
            if let Some(vertex) = self.points.get_mut(index) {
                *vertex = origin;
            }
        }
        self.state = ToolState::Idle;
        self.cursor = None;
    }

    /// Replace the boundary with a history snapshot
    pub(crate) fn restore(&mut self, points: &[NormalizedPoint]) {
        self.state = ToolState::Idle;
        self.cursor = None;
        self.points = points.to_vec();
        self.selected_vertex = None;
    }
}

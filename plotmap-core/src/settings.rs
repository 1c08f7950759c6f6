//! Tunable editor behaviour
//!
//! Persisted as part of the application config, so every field has a default
//! and unknown or missing keys never fail a load.

use crate::history::DEFAULT_MAX_DEPTH;
use crate::tool_machine::DEFAULT_VERTEX_HIT_RADIUS;
use crate::viewport::ZoomLimits;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// Vertex grab radius in screen pixels
    pub vertex_hit_radius: f64,
    /// Zoom range while drawing
    pub editor_zoom: ZoomLimits,
    /// Zoom range of the read-only viewer
    pub viewer_zoom: ZoomLimits,
    /// Zoom change per wheel delta unit
    pub wheel_sensitivity: f64,
    /// Zoom change of the zoom in/out buttons
    pub zoom_step: f64,
    /// Normalized offset applied to a duplicated boundary
    pub duplicate_offset: f64,
    /// Undo depth of a drawing session
    pub max_history: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            vertex_hit_radius: DEFAULT_VERTEX_HIT_RADIUS,
            editor_zoom: ZoomLimits::EDITOR,
            viewer_zoom: ZoomLimits::VIEWER,
            wheel_sensitivity: 0.0015,
            zoom_step: 0.2,
            duplicate_offset: 0.02,
            max_history: DEFAULT_MAX_DEPTH,
        }
    }
}

//! Coordinate transforms between screen, canvas and normalized space
//!
//! Three spaces are involved when a pointer lands on the plan:
//!
//! - **screen**: pixels as delivered by the windowing layer
//! - **canvas**: pixels of the unzoomed plan element, after removing the
//!   element origin, the pan offset and the zoom factor
//! - **normalized**: canvas pixels divided by the element's display size
//!
//! `canvas = (screen - element_origin - pan) / zoom` and
//! `normalized = canvas / element_size`. Everything here is pure.

use crate::point::NormalizedPoint;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Camera state of the plan view: zoom factor and pan offset in screen pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub zoom: f64,
    pub pan: Vec2,
}

impl ViewTransform {
    /// Unzoomed, unpanned view
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan: Vec2::ZERO,
    };

    pub fn new(zoom: f64, pan: Vec2) -> Self {
        Self { zoom, pan }
    }

    /// Camera affine mapping canvas pixels to element-local screen pixels
    ///
    /// Same composition as the stage camera: translate for pan, then scale for
    /// zoom.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    pub fn is_zoomed_in(&self) -> bool {
        self.zoom > 1.0
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Convert a screen position to canvas pixels
pub fn to_canvas(screen: Point, view: &ViewTransform, element: Rect) -> Point {
    let local = screen - element.origin() - view.pan;
    (local / view.zoom).to_point()
}

/// Convert a screen position to normalized plot space
///
/// A zero-sized element maps everything to the origin instead of producing
/// NaN coordinates.
pub fn to_normalized(screen: Point, view: &ViewTransform, element: Rect) -> NormalizedPoint {
    let (width, height) = (element.width(), element.height());
    if width <= 0.0 || height <= 0.0 {
        return NormalizedPoint::default();
    }

    let canvas = to_canvas(screen, view, element);
    NormalizedPoint::new(canvas.x / width, canvas.y / height)
}

/// Convert a normalized point back to a screen position (rendering only)
pub fn to_screen(point: NormalizedPoint, view: &ViewTransform, element: Rect) -> Point {
    let canvas = Vec2::new(point.x * element.width(), point.y * element.height());
    element.origin() + view.pan + canvas * view.zoom
}

/// A view transform bound to the screen rectangle of the plan element
///
/// Bundles everything the tool state machine needs to interpret a pointer
/// position, so handlers don't take the view and element separately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub view: ViewTransform,
    pub element: Rect,
}

impl Projection {
    pub fn new(view: ViewTransform, element: Rect) -> Self {
        Self { view, element }
    }

    pub fn to_normalized(&self, screen: Point) -> NormalizedPoint {
        to_normalized(screen, &self.view, self.element)
    }

    pub fn to_screen(&self, point: NormalizedPoint) -> Point {
        to_screen(point, &self.view, self.element)
    }

    /// Project a whole boundary into screen space
    pub fn polygon_to_screen(&self, polygon: &[NormalizedPoint]) -> Vec<Point> {
        polygon.iter().map(|p| self.to_screen(*p)).collect()
    }
}

//! Viewport controller
//!
//! Owns the zoom level and pan offset of a plan view and turns wheel and drag
//! gestures into [`ViewTransform`] updates. Zoom is multiplicative
//! (`zoom * (1 + delta)`) and always anchored at a screen point so the plan
//! under the cursor stays put.

use crate::transform::ViewTransform;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Allowed zoom range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    /// Boundary editor range
    pub const EDITOR: Self = Self { min: 0.25, max: 5.0 };
    /// Public viewer range; never zooms out past the whole plan
    pub const VIEWER: Self = Self { min: 1.0, max: 3.0 };

    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self::EDITOR
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportController {
    view: ViewTransform,
    limits: ZoomLimits,
    wheel_sensitivity: f64,
    zoom_step: f64,
    /// Last pointer position of a drag-pan in progress
    drag_last: Option<Point>,
    /// Keep the zoomed plan covering its element (no empty margins)
    contain: bool,
}

impl ViewportController {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            view: ViewTransform::IDENTITY,
            limits,
            wheel_sensitivity: 0.0015,
            zoom_step: 0.2,
            drag_last: None,
            contain: false,
        }
    }

    /// Clamp the pan so the plan always fills its element
    ///
    /// At zoom 1 this pins the pan to zero.
    pub fn contained(mut self) -> Self {
        self.contain = true;
        self
    }

    pub fn with_wheel_sensitivity(mut self, sensitivity: f64) -> Self {
        self.wheel_sensitivity = sensitivity;
        self
    }

    pub fn with_zoom_step(mut self, step: f64) -> Self {
        self.zoom_step = step;
        self
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Back to zoom 1, no pan
    pub fn reset(&mut self) {
        self.view = ViewTransform::IDENTITY;
        self.drag_last = None;
    }

    /// Zoom by `zoom_delta` keeping the plan point under `anchor` fixed
    ///
    /// Returns whether the view changed; at a zoom limit it does not.
    pub fn zoom_at(&mut self, anchor: Point, element: Rect, zoom_delta: f64) -> bool {
        let old_zoom = self.view.zoom;
        let new_zoom = self.limits.clamp(old_zoom * (1.0 + zoom_delta));
        if new_zoom == old_zoom {
            return false;
        }

        // Canvas point under the anchor before zooming
        let local = anchor - element.origin();
        let canvas = (local - self.view.pan) / old_zoom;

        self.view.zoom = new_zoom;
        self.view.pan = local - canvas * new_zoom;
        self.clamp_pan(element);
        true
    }

    fn clamp_pan(&mut self, element: Rect) {
        if !self.contain {
            return;
        }
        let slack = element.size().to_vec2() * (1.0 - self.view.zoom);
        let pan = &mut self.view.pan;
        pan.x = pan.x.clamp(slack.x.min(0.0), slack.x.max(0.0));
        pan.y = pan.y.clamp(slack.y.min(0.0), slack.y.max(0.0));
    }

    /// Wheel scroll at `position`; positive delta zooms in
    pub fn wheel(&mut self, position: Point, element: Rect, delta: f64) -> bool {
        self.zoom_at(position, element, delta * self.wheel_sensitivity)
    }

    /// Zoom in one step around the element centre
    pub fn zoom_in(&mut self, element: Rect) -> bool {
        self.zoom_at(element.center(), element, self.zoom_step)
    }

    /// Zoom out one step around the element centre
    pub fn zoom_out(&mut self, element: Rect) -> bool {
        self.zoom_at(element.center(), element, -self.zoom_step)
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.view.pan += delta;
    }

    /// Drag-panning only makes sense once the plan is larger than its element
    pub fn can_drag_pan(&self) -> bool {
        self.view.is_zoomed_in()
    }

    pub fn begin_drag(&mut self, position: Point) {
        self.drag_last = Some(position);
    }

    /// Pan by the pointer movement since the last drag position
    pub fn drag_to(&mut self, position: Point, element: Rect) -> bool {
        let Some(last) = self.drag_last else {
            return false;
        };
        self.drag_last = Some(position);
        let before = self.view.pan;
        self.pan_by(position - last);
        self.clamp_pan(element);
        self.view.pan != before
    }

    pub fn end_drag(&mut self) {
        self.drag_last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last.is_some()
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ZoomLimits::EDITOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{to_normalized, to_screen};

    const EPSILON: f64 = 1e-9;

    fn element() -> Rect {
        Rect::new(50.0, 20.0, 450.0, 420.0)
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let mut viewport = ViewportController::default();
        viewport.pan_by(Vec2::new(13.0, -7.0));
        let cursor = Point::new(210.0, 330.0);
        let under_cursor = to_normalized(cursor, &viewport.view(), element());

        for delta in [120.0, 120.0, -240.0, 500.0] {
            viewport.wheel(cursor, element(), delta);
            let screen = to_screen(under_cursor, &viewport.view(), element());
            assert!((screen - cursor).hypot() < EPSILON, "drifted to {screen:?}");
        }
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = ViewportController::default();
        for _ in 0..50 {
            viewport.zoom_in(element());
        }
        assert_eq!(viewport.zoom(), 5.0);
        assert!(!viewport.zoom_in(element()));

        for _ in 0..50 {
            viewport.zoom_out(element());
        }
        assert_eq!(viewport.zoom(), 0.25);
    }

    #[test]
    fn test_viewer_limits() {
        let mut viewport = ViewportController::new(ZoomLimits::VIEWER);
        assert!(!viewport.zoom_out(element()));
        assert_eq!(viewport.zoom(), 1.0);
        assert!(!viewport.can_drag_pan());

        viewport.zoom_in(element());
        assert!(viewport.can_drag_pan());
    }

    #[test]
    fn test_drag_pan() {
        let mut viewport = ViewportController::default();
        assert!(!viewport.drag_to(Point::new(5.0, 5.0), element()));

        viewport.begin_drag(Point::new(10.0, 10.0));
        assert!(viewport.drag_to(Point::new(30.0, 5.0), element()));
        assert!(viewport.drag_to(Point::new(35.0, 10.0), element()));
        viewport.end_drag();

        assert_eq!(viewport.view().pan, Vec2::new(25.0, 0.0));
        assert!(!viewport.is_dragging());
    }

    #[test]
    fn test_contained_pan_stays_inside_plan() {
        let mut viewport = ViewportController::new(ZoomLimits::VIEWER).contained();
        assert!(viewport.zoom_in(element()));
        // 400px element at 1.2x leaves 80px of slack on each axis
        viewport.begin_drag(Point::new(100.0, 100.0));
        assert!(viewport.drag_to(Point::new(400.0, 100.0), element()));
        assert_eq!(viewport.view().pan, Vec2::new(0.0, -40.0));
        assert!(!viewport.drag_to(Point::new(450.0, 100.0), element()));
        viewport.end_drag();

        while viewport.zoom_out(element()) {}
        assert_eq!(viewport.zoom(), 1.0);
        assert_eq!(viewport.view().pan, Vec2::ZERO);
    }

    #[test]
    fn test_reset() {
        let mut viewport = ViewportController::default();
        viewport.zoom_in(element());
        viewport.pan_by(Vec2::new(3.0, 4.0));
        viewport.reset();
        assert_eq!(viewport.view(), ViewTransform::IDENTITY);
    }
}

//! Read-only plan viewer
//!
//! The public face of the site plan: plots highlight under the pointer and a
//! click asks the host to open an inquiry for that plot. The viewer zooms
//! between 1x and 3x and can only be dragged once zoomed in.

use crate::hover::plot_at_screen;
use crate::input::{EditorEvent, PointerEvent};
use crate::plot::{PlotId, PlotSet};
use crate::settings::EditorSettings;
use crate::transform::{Projection, ViewTransform};
use crate::viewport::ViewportController;
use kurbo::{Point, Rect};

/// Pointer travel (screen pixels) beyond which a press is a drag, not a click
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerResponse {
    Nothing,
    HoverChanged(Option<PlotId>),
    ViewChanged,
    /// A plot was clicked
    Inquire(PlotId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    origin: Point,
    dragged: bool,
}

#[derive(Clone, Debug)]
pub struct PlotViewer {
    plots: PlotSet,
    viewport: ViewportController,
    element: Rect,
    hovered: Option<PlotId>,
    press: Option<Press>,
}

impl PlotViewer {
    pub fn new(plots: PlotSet, settings: &EditorSettings) -> Self {
        Self {
            plots,
            viewport: ViewportController::new(settings.viewer_zoom)
                .with_wheel_sensitivity(settings.wheel_sensitivity)
                .with_zoom_step(settings.zoom_step)
                .contained(),
            element: Rect::ZERO,
            hovered: None,
            press: None,
        }
    }

    pub fn plots(&self) -> &PlotSet {
        &self.plots
    }

    /// Swap in a fresh plot snapshot; hover on a plot that vanished is dropped
    pub fn set_plots(&mut self, plots: PlotSet) {
        if let Some(id) = self.hovered {
            if plots.get(id).is_none() {
                self.hovered = None;
            }
        }
        self.plots = plots;
    }

    /// Screen rectangle the plan is displayed in
    pub fn set_element(&mut self, element: Rect) {
        self.element = element;
    }

    pub fn hovered(&self) -> Option<PlotId> {
        self.hovered
    }

    pub fn view(&self) -> ViewTransform {
        self.viewport.view()
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.viewport.view(), self.element)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in(self.element)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out(self.element)
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn handle(&mut self, event: EditorEvent) -> ViewerResponse {
        match event {
            EditorEvent::Pointer(pointer) => self.handle_pointer(pointer),
            EditorEvent::Wheel { position, delta } => {
                if self.viewport.wheel(position, self.element, delta) {
                    ViewerResponse::ViewChanged
                } else {
                    ViewerResponse::Nothing
                }
            }
            EditorEvent::Shortcut(_) => ViewerResponse::Nothing,
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> ViewerResponse {
        match event {
            PointerEvent::Down(position) => {
                self.press = Some(Press {
                    origin: position,
                    dragged: false,
                });
                if self.viewport.can_drag_pan() {
                    self.viewport.begin_drag(position);
                }
                ViewerResponse::Nothing
            }
            PointerEvent::Move(position) => {
                if let Some(press) = self.press.as_mut() {
                    if press.origin.distance(position) > CLICK_SLOP {
                        press.dragged = true;
                    }
                    if self.viewport.drag_to(position, self.element) {
                        return ViewerResponse::ViewChanged;
                    }
                }
                self.update_hover(position)
            }
            PointerEvent::Up(position) => {
                self.viewport.end_drag();
                let Some(press) = self.press.take() else {
                    return ViewerResponse::Nothing;
                };
                if press.dragged {
                    return ViewerResponse::Nothing;
                }

                let projection = self.projection();
                match plot_at_screen(self.plots.as_slice(), position, &projection) {
                    Some(plot) => {
                        log::debug!("Inquiry for plot {}", plot.id);
                        ViewerResponse::Inquire(plot.id)
                    }
                    None => ViewerResponse::Nothing,
                }
            }
            PointerEvent::DoubleClick(_) => ViewerResponse::Nothing,
        }
    }

    fn update_hover(&mut self, position: Point) -> ViewerResponse {
        let projection = self.projection();
        let hovered = plot_at_screen(self.plots.as_slice(), position, &projection).map(|plot| plot.id);
        if hovered == self.hovered {
            return ViewerResponse::Nothing;
        }
        self.hovered = hovered;
        ViewerResponse::HoverChanged(hovered)
    }
}

/// Stage pane - the site plan with its plots
///
/// Translates egui pointer and wheel input into plan events for the boundary
/// editor (or the read-only viewer) and paints the plan, the plots and the
/// boundary being edited.

use super::{polygon_fill, status_color, to_kurbo_rect, to_point, to_pos, AppMode, PaneRenderer, SharedPaneState};
use crate::menu::MenuAction;
use eframe::egui;
use plotmap_core::geometry::centroid;
use plotmap_core::{
    EditorEvent, NormalizedPoint, PointerEvent, Projection, Tool, ViewTransform, ViewerResponse,
};

const HANDLE_RADIUS: f32 = 5.0;

pub struct StagePane {
    /// Primary button went down inside the stage and has not been released
    pressed: bool,
}

impl StagePane {
    pub fn new() -> Self {
        Self { pressed: false }
    }

    /// Collect this frame's plan events, in delivery order
    fn collect_events(&mut self, ui: &egui::Ui, response: &egui::Response) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        let hovered = response.hovered();

        ui.input(|i| {
            let Some(pos) = i.pointer.latest_pos() else {
                return;
            };
            let point = to_point(pos);

            if i.pointer.primary_pressed() && hovered {
                self.pressed = true;
                events.push(PointerEvent::Down(point).into());
            }

            if i.pointer.delta() != egui::Vec2::ZERO && (hovered || self.pressed) {
                events.push(PointerEvent::Move(point).into());
            }

            if i.pointer.primary_released() && self.pressed {
                self.pressed = false;
                events.push(PointerEvent::Up(point).into());
            }

            if hovered {
                let scroll = i.smooth_scroll_delta.y;
                if scroll != 0.0 {
                    events.push(EditorEvent::Wheel {
                        position: point,
                        delta: scroll as f64,
                    });
                }
            }
        });

        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(PointerEvent::DoubleClick(to_point(pos)).into());
            }
        }

        events
    }

    fn paint_plan(painter: &egui::Painter, shared: &SharedPaneState, view: ViewTransform, element: egui::Rect) {
        let plan_rect = egui::Rect::from_min_size(
            element.min + egui::vec2(view.pan.x as f32, view.pan.y as f32),
            element.size() * view.zoom as f32,
        );

        match &shared.plan.texture {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    plan_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(plan_rect, 0.0, egui::Color32::from_gray(235));
                painter.rect_stroke(
                    plan_rect,
                    0.0,
                    egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }

    fn paint_plots(painter: &egui::Painter, shared: &SharedPaneState, projection: &Projection) {
        let (plots, hovered, editing) = match shared.mode {
            AppMode::Editor => (shared.editor.plots(), shared.editor.hovered(), shared.editor.editing()),
            AppMode::Viewer => (shared.viewer.plots(), shared.viewer.hovered(), None),
        };

        for plot in plots.iter() {
            // The plot being edited is drawn from the session instead
            if editing == Some(plot.id) || !plot.has_boundary() {
                continue;
            }

            let is_hovered = hovered == Some(plot.id);
            let points: Vec<egui::Pos2> = projection
                .polygon_to_screen(&plot.boundary)
                .into_iter()
                .map(to_pos)
                .collect();

            let fill = status_color(plot.status, if is_hovered { 150 } else { 80 });
            let stroke_width = if is_hovered { 2.5 } else { 1.5 };
            if let Some(mesh) = polygon_fill(&points, fill) {
                painter.add(egui::Shape::mesh(mesh));
            }
            painter.add(egui::Shape::closed_line(
                points,
                egui::Stroke::new(stroke_width, status_color(plot.status, 255)),
            ));

            if let Some(center) = centroid(&plot.boundary) {
                painter.text(
                    to_pos(projection.to_screen(center)),
                    egui::Align2::CENTER_CENTER,
                    &plot.display_label,
                    egui::FontId::proportional(12.0),
                    egui::Color32::BLACK,
                );
            }
        }
    }

    fn paint_session(painter: &egui::Painter, shared: &SharedPaneState, projection: &Projection) {
        let Some(session) = shared.editor.session() else {
            return;
        };

        let accent = egui::Color32::from_rgb(37, 99, 235);
        let screen = |p: NormalizedPoint| to_pos(projection.to_screen(p));
        let points: Vec<egui::Pos2> = session.points().iter().map(|p| screen(*p)).collect();

        if session.mode() == Tool::Polygon {
            if points.len() >= 2 {
                painter.add(egui::Shape::line(points.clone(), egui::Stroke::new(2.0, accent)));
            }
            // Rubber band from the last point to the cursor
            if let (Some(last), Some(cursor)) = (points.last(), session.cursor()) {
                painter.line_segment([*last, screen(cursor)], egui::Stroke::new(1.0, accent));
            }
        } else if points.len() >= 3 {
            if let Some(mesh) = polygon_fill(&points, accent.gamma_multiply(0.2)) {
                painter.add(egui::Shape::mesh(mesh));
            }
            painter.add(egui::Shape::closed_line(points.clone(), egui::Stroke::new(2.0, accent)));
        }

        if let Some(preview) = session.rectangle_preview() {
            let preview: Vec<egui::Pos2> = preview.into_iter().map(screen).collect();
            painter.add(egui::Shape::closed_line(
                preview,
                egui::Stroke::new(1.5, egui::Color32::from_rgb(234, 88, 12)),
            ));
        }

        for (index, point) in points.iter().enumerate() {
            let selected = session.selected_vertex() == Some(index);
            let fill = if selected { accent } else { egui::Color32::WHITE };
            painter.circle(*point, HANDLE_RADIUS, fill, egui::Stroke::new(1.5, accent));
        }
    }

    fn cursor_for(shared: &SharedPaneState) -> egui::CursorIcon {
        match shared.mode {
            AppMode::Viewer => match shared.viewer.hovered() {
                Some(_) => egui::CursorIcon::PointingHand,
                None if shared.viewer.view().is_zoomed_in() => egui::CursorIcon::Grab,
                None => egui::CursorIcon::Default,
            },
            AppMode::Editor => match shared.editor.mode() {
                Some(Tool::Polygon) | Some(Tool::Rectangle) => egui::CursorIcon::Crosshair,
                Some(Tool::Pan) => egui::CursorIcon::Grab,
                _ if shared.editor.hovered().is_some() => egui::CursorIcon::PointingHand,
                _ => egui::CursorIcon::Default,
            },
        }
    }
}

impl PaneRenderer for StagePane {
    fn render_content(&mut self, ui: &mut egui::Ui, rect: egui::Rect, shared: &mut SharedPaneState) {
        let element = shared.plan.fit_into(rect.shrink(12.0));
        let response = ui.interact(rect, ui.id().with("stage"), egui::Sense::click_and_drag());

        match shared.mode {
            AppMode::Editor => shared.editor.set_element(to_kurbo_rect(element)),
            AppMode::Viewer => shared.viewer.set_element(to_kurbo_rect(element)),
        }

        for event in self.collect_events(ui, &response) {
            match shared.mode {
                AppMode::Editor => {
                    let response = shared.editor.handle(event);
                    shared.report(response);
                }
                AppMode::Viewer => {
                    if let ViewerResponse::Inquire(id) = shared.viewer.handle(event) {
                        shared.pending_actions.push(MenuAction::Inquire(id));
                    }
                }
            }
        }

        let (view, projection) = match shared.mode {
            AppMode::Editor => (shared.editor.view(), shared.editor.projection()),
            AppMode::Viewer => (shared.viewer.view(), shared.viewer.projection()),
        };

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(45));
        Self::paint_plan(&painter, shared, view, element);
        Self::paint_plots(&painter, shared, &projection);
        if shared.mode == AppMode::Editor {
            Self::paint_session(&painter, shared, &projection);
        }

        if response.hovered() {
            ui.ctx().set_cursor_icon(Self::cursor_for(shared));
        }

        // Camera info overlay
        painter.text(
            rect.min + egui::vec2(10.0, 10.0),
            egui::Align2::LEFT_TOP,
            format!("zoom: {:.2}, pan: {:.0},{:.0}", view.zoom, view.pan.x, view.pan.y),
            egui::FontId::proportional(12.0),
            egui::Color32::from_gray(200),
        );
    }

    fn name(&self) -> &str {
        "Stage"
    }
}

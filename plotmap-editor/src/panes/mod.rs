/// Pane implementations for the editor
///
/// Each pane type has its own module with implementation details.
/// Panes can hold local state and access shared state through SharedPaneState.

use crate::menu::MenuAction;
use eframe::egui;
use plotmap_core::{BoundaryEditor, EditorResponse, PlotViewer};

pub mod plot_list;
pub mod stage;
pub mod toolbar;

/// Whether the app edits boundaries or only shows them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Editor,
    Viewer,
}

/// Site plan image and its natural size in pixels
pub struct PlanImage {
    pub size: egui::Vec2,
    pub texture: Option<egui::TextureHandle>,
}

impl PlanImage {
    /// Largest rectangle with the plan's aspect ratio centred in `rect`
    ///
    /// This is the plan element at zoom 1; pan and zoom are applied on top.
    pub fn fit_into(&self, rect: egui::Rect) -> egui::Rect {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return rect;
        }
        let scale = (rect.width() / self.size.x).min(rect.height() / self.size.y);
        egui::Rect::from_center_size(rect.center(), self.size * scale)
    }
}

/// Shared state that all panes can access
pub struct SharedPaneState<'a> {
    pub mode: AppMode,
    pub editor: &'a mut BoundaryEditor,
    pub viewer: &'a mut PlotViewer,
    pub plan: &'a PlanImage,
    /// Message for the status bar (rejected actions, saves)
    pub status: &'a mut Option<String>,
    /// Actions to execute after rendering completes (two-phase dispatch)
    pub pending_actions: &'a mut Vec<MenuAction>,
}

impl SharedPaneState<'_> {
    /// Route an editor response to the status bar or the action queue
    pub fn report(&mut self, response: EditorResponse) {
        if let EditorResponse::PlotPicked(id) = response {
            self.pending_actions.push(MenuAction::EditPlot(id));
        } else if let Some(message) = status_message(&response) {
            *self.status = Some(message);
        }
    }
}

/// Status bar text for an editor response, if it deserves one
pub fn status_message(response: &EditorResponse) -> Option<String> {
    match response {
        EditorResponse::Rejected(error) => Some(error.to_string()),
        EditorResponse::Committed(description) => Some(description.clone()),
        EditorResponse::Undone(description) => Some(format!("Undo {description}")),
        EditorResponse::Redone(description) => Some(format!("Redo {description}")),
        EditorResponse::Completed => Some("Polygon closed, drag points to adjust".to_string()),
        EditorResponse::Nothing
        | EditorResponse::Changed
        | EditorResponse::ViewChanged
        | EditorResponse::HoverChanged(_)
        | EditorResponse::PlotPicked(_) => None,
    }
}

/// Trait for pane rendering
///
/// Panes implement this trait to provide custom rendering logic.
pub trait PaneRenderer {
    /// Render the main content area
    fn render_content(&mut self, ui: &mut egui::Ui, rect: egui::Rect, shared: &mut SharedPaneState);

    /// Get the display name of this pane
    fn name(&self) -> &str;
}

/// Kinds of pane in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneType {
    Toolbar,
    PlotList,
    Stage,
}

/// Enum wrapper for all pane implementations (enum dispatch pattern)
pub enum PaneInstance {
    Toolbar(toolbar::ToolbarPane),
    PlotList(plot_list::PlotListPane),
    Stage(stage::StagePane),
}

impl PaneInstance {
    /// Create a new pane instance for the given type
    pub fn new(pane_type: PaneType) -> Self {
        match pane_type {
            PaneType::Toolbar => PaneInstance::Toolbar(toolbar::ToolbarPane::new()),
            PaneType::PlotList => PaneInstance::PlotList(plot_list::PlotListPane::new()),
            PaneType::Stage => PaneInstance::Stage(stage::StagePane::new()),
        }
    }

    /// Get the pane type of this instance
    pub fn pane_type(&self) -> PaneType {
        match self {
            PaneInstance::Toolbar(_) => PaneType::Toolbar,
            PaneInstance::PlotList(_) => PaneType::PlotList,
            PaneInstance::Stage(_) => PaneType::Stage,
        }
    }
}

impl PaneRenderer for PaneInstance {
    fn render_content(&mut self, ui: &mut egui::Ui, rect: egui::Rect, shared: &mut SharedPaneState) {
        match self {
            PaneInstance::Toolbar(p) => p.render_content(ui, rect, shared),
            PaneInstance::PlotList(p) => p.render_content(ui, rect, shared),
            PaneInstance::Stage(p) => p.render_content(ui, rect, shared),
        }
    }

    fn name(&self) -> &str {
        match self {
            PaneInstance::Toolbar(p) => p.name(),
            PaneInstance::PlotList(p) => p.name(),
            PaneInstance::Stage(p) => p.name(),
        }
    }
}

/// Convert between egui and kurbo screen positions
pub fn to_point(pos: egui::Pos2) -> kurbo::Point {
    kurbo::Point::new(pos.x as f64, pos.y as f64)
}

pub fn to_pos(point: kurbo::Point) -> egui::Pos2 {
    egui::pos2(point.x as f32, point.y as f32)
}

pub fn to_kurbo_rect(rect: egui::Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    )
}

/// Triangulated fill for a simple polygon, concave or not
///
/// Returns `None` for fewer than three points or a degenerate outline.
pub fn polygon_fill(points: &[egui::Pos2], color: egui::Color32) -> Option<egui::Mesh> {
    if points.len() < 3 {
        return None;
    }

    let coords: Vec<f64> = points.iter().flat_map(|p| [p.x as f64, p.y as f64]).collect();
    let indices = match earcutr::earcut(&coords, &[], 2) {
        Ok(indices) => indices,
        Err(e) => {
            log::debug!("Could not triangulate {} point outline: {:?}", points.len(), e);
            return None;
        }
    };
    if indices.is_empty() {
        return None;
    }

    let mut mesh = egui::Mesh::default();
    for point in points {
        mesh.colored_vertex(*point, color);
    }
    for triangle in indices.chunks_exact(3) {
        mesh.add_triangle(triangle[0] as u32, triangle[1] as u32, triangle[2] as u32);
    }
    Some(mesh)
}

/// Plot status colour with the given alpha
pub fn status_color(status: plotmap_core::PlotStatus, alpha: u8) -> egui::Color32 {
    let [r, g, b] = status.color();
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_fits_with_aspect_ratio() {
        let plan = PlanImage {
            size: egui::vec2(2000.0, 1000.0),
            texture: None,
        };
        let fitted = plan.fit_into(egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0)));
        assert_eq!(fitted.width(), 400.0);
        assert_eq!(fitted.height(), 200.0);
        assert_eq!(fitted.min, egui::pos2(0.0, 100.0));
    }

    fn triangle_area(a: egui::Pos2, b: egui::Pos2, c: egui::Pos2) -> f32 {
        ((b - a).x * (c - a).y - (b - a).y * (c - a).x).abs() / 2.0
    }

    fn triangle_contains(a: egui::Pos2, b: egui::Pos2, c: egui::Pos2, p: egui::Pos2) -> bool {
        let total = triangle_area(a, b, c);
        let parts = triangle_area(p, b, c) + triangle_area(a, p, c) + triangle_area(a, b, p);
        (parts - total).abs() < 1e-3
    }

    #[test]
    fn test_concave_fill_leaves_notch_empty() {
        // U-shaped plot, 100px square with a 40x60 notch cut from the top
        let outline = [
            (0.0, 0.0),
            (30.0, 0.0),
            (30.0, 60.0),
            (70.0, 60.0),
            (70.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
        ]
        .map(|(x, y)| egui::pos2(x, y));

        let mesh = polygon_fill(&outline, egui::Color32::RED).unwrap();
        assert_eq!(mesh.vertices.len(), outline.len());
        assert_eq!(mesh.indices.len(), (outline.len() - 2) * 3);

        let triangles: Vec<[egui::Pos2; 3]> = mesh
            .indices
            .chunks_exact(3)
            .map(|t| [0, 1, 2].map(|i| mesh.vertices[t[i] as usize].pos))
            .collect();

        let area: f32 = triangles.iter().map(|[a, b, c]| triangle_area(*a, *b, *c)).sum();
        assert!((area - 7600.0).abs() < 1e-2, "filled area {area}");

        let covers = |p: egui::Pos2| triangles.iter().any(|[a, b, c]| triangle_contains(*a, *b, *c, p));
        assert!(!covers(egui::pos2(50.0, 30.0)));
        assert!(covers(egui::pos2(15.0, 50.0)));
        assert!(covers(egui::pos2(50.0, 80.0)));
    }

    #[test]
    fn test_fill_needs_three_points() {
        let line = [egui::pos2(0.0, 0.0), egui::pos2(10.0, 10.0)];
        assert!(polygon_fill(&line, egui::Color32::RED).is_none());
    }
}

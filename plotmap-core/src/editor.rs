//! Boundary editor
//!
//! [`BoundaryEditor`] owns everything a drawing session needs: the session
//! itself, its undo history, the viewport and a read-only snapshot of the other
//! plots. The windowing layer feeds it [`EditorEvent`]s and renders whatever
//! the accessors report. Saving is left to the caller: `commit` hands the
//! finished boundary back, and `commit_with` runs a caller-supplied save and
//! only closes the session if that save succeeds.

use crate::error::{CommitError, EditorError};
use crate::geometry::{is_valid_polygon, offset_copy};
use crate::history::{HistoryEntry, HistoryStack};
use crate::hover::{plot_at, plot_at_screen};
use crate::input::{EditorEvent, PointerEvent, Shortcut};
use crate::plot::{Plot, PlotId, PlotSet};
use crate::point::{NormalizedPoint, Polygon, MIN_POLYGON_VERTICES};
use crate::session::DrawingSession;
use crate::settings::EditorSettings;
use crate::tool::Tool;
use crate::tool_machine::{Outcome, ToolEvent, ToolStateMachine, Transition};
use crate::transform::{Projection, ViewTransform};
use crate::viewport::ViewportController;
use kurbo::{Point, Rect};

/// A validated boundary ready to hand to the persistence layer
#[derive(Clone, Debug, PartialEq)]
pub struct CommitRequest {
    /// Plot being edited, or `None` for a new plot
    pub plot_id: Option<PlotId>,
    pub boundary: Polygon,
}

/// What handling an event did, for the caller to react to
#[derive(Clone, Debug, PartialEq)]
pub enum EditorResponse {
    Nothing,
    /// Uncommitted change (preview, selection, tool)
    Changed,
    /// A step was recorded in the history
    Committed(String),
    /// The polygon was closed; the edit tool is now active
    Completed,
    ViewChanged,
    HoverChanged(Option<PlotId>),
    /// An existing plot was clicked with the select tool
    PlotPicked(PlotId),
    Undone(String),
    Redone(String),
    Rejected(EditorError),
}

pub struct BoundaryEditor {
    settings: EditorSettings,
    machine: ToolStateMachine,
    viewport: ViewportController,
    history: HistoryStack,
    session: Option<DrawingSession>,
    /// Plot whose boundary the session edits; `None` when drawing a new plot
    editing: Option<PlotId>,
    plots: PlotSet,
    /// Screen rectangle of the plan element
    element: Rect,
    hovered: Option<PlotId>,
}

impl BoundaryEditor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            machine: ToolStateMachine::new(settings.vertex_hit_radius),
            viewport: Self::viewport_for(&settings),
            history: HistoryStack::with_max_depth(settings.max_history),
            settings,
            session: None,
            editing: None,
            plots: PlotSet::default(),
            element: Rect::ZERO,
            hovered: None,
        }
    }

    fn viewport_for(settings: &EditorSettings) -> ViewportController {
        ViewportController::new(settings.editor_zoom)
            .with_wheel_sensitivity(settings.wheel_sensitivity)
            .with_zoom_step(settings.zoom_step)
    }

    pub fn with_plots(mut self, plots: PlotSet) -> Self {
        self.plots = plots;
        self
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Apply new settings
    ///
    /// The view is reset; the history of an open session is trimmed to the new
    /// depth.
    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.machine = ToolStateMachine::new(settings.vertex_hit_radius);
        self.viewport = Self::viewport_for(&settings);
        self.history.set_max_depth(settings.max_history);
        self.settings = settings;
    }

    // --- Plot snapshot ---

    pub fn plots(&self) -> &PlotSet {
        &self.plots
    }

    /// Replace the shared snapshot of plots
    ///
    /// A session in progress keeps its own copy of the boundary it edits.
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

    pub fn element(&self) -> Rect {
        self.element
    }

    // --- Session lifecycle ---

    /// Start drawing a new plot from scratch with the polygon tool
    pub fn start_new(&mut self) {
        self.begin(None, DrawingSession::new(Tool::Polygon), None);
        log::info!("Started new boundary");
    }

    /// Start editing a detached boundary
    pub fn start_edit(&mut self, boundary: Polygon) {
        self.begin_edit(None, boundary);
    }

    /// Start editing the boundary of a plot in the snapshot
    ///
    /// A plot that has not been drawn yet opens with the polygon tool.
    pub fn start_edit_plot(&mut self, id: PlotId) -> Result<(), EditorError> {
        let boundary = self
            .plots
            .get(id)
            .map(|plot| plot.boundary.clone())
            .ok_or(EditorError::UnknownPlot(id))?;
        self.begin_edit(Some(id), boundary);
        Ok(())
    }

    fn begin_edit(&mut self, plot_id: Option<PlotId>, boundary: Polygon) {
        if boundary.is_empty() {
            self.begin(plot_id, DrawingSession::new(Tool::Polygon), None);
        } else {
            let mode = if is_valid_polygon(&boundary) {
                Tool::Edit
            } else {
                Tool::Polygon
            };
            let entry = HistoryEntry::new(boundary.clone(), "Load boundary");
            self.begin(plot_id, DrawingSession::with_points(mode, boundary), Some(entry));
        }
        match plot_id {
            Some(id) => log::info!("Editing boundary of plot {id}"),
            None => log::info!("Editing detached boundary"),
        }
    }

    /// Start a new-plot session seeded with an offset copy of the current
    /// boundary
    pub fn duplicate(&mut self) -> Result<(), EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoActiveSession)?;
        if !session.is_valid() {
            return Err(EditorError::TooFewVertices {
                required: MIN_POLYGON_VERTICES,
                actual: session.points().len(),
            });
        }

        let mut source = session.clone();
        source.cancel_interaction();
        let copy = offset_copy(source.points(), self.settings.duplicate_offset);
        let entry = HistoryEntry::new(copy.clone(), "Duplicate boundary");
        self.begin(None, DrawingSession::with_points(Tool::Edit, copy), Some(entry));
        log::info!("Duplicated boundary into a new plot");
        Ok(())
    }

    fn begin(&mut self, plot_id: Option<PlotId>, session: DrawingSession, seed: Option<HistoryEntry>) {
        self.history = HistoryStack::with_max_depth(self.settings.max_history);
        if let Some(entry) = seed {
            self.history.push(entry);
        }
        self.session = Some(session);
        self.editing = plot_id;
        self.viewport.reset();
    }

    /// Drop the session and its history without saving anything
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            log::info!("Cancelled boundary session");
        }
        self.end_session();
        self.viewport.reset();
    }

    fn end_session(&mut self) {
        self.session = None;
        self.editing = None;
        self.history.clear();
    }

    /// Validate the current boundary without closing the session
    ///
    /// For callers that save asynchronously: send the request, then call
    /// `cancel` once the save has gone through.
    pub fn prepare_commit(&self) -> Result<CommitRequest, EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoActiveSession)?;
        let mut settled = session.clone();
        settled.cancel_interaction();

        if !settled.is_valid() {
            return Err(EditorError::TooFewVertices {
                required: MIN_POLYGON_VERTICES,
                actual: settled.points().len(),
            });
        }

        Ok(CommitRequest {
            plot_id: self.editing,
            boundary: settled.points().to_vec(),
        })
    }

    /// Validate and close the session, returning the finished boundary
    ///
    /// On failure the session stays open and untouched.
    pub fn commit(&mut self) -> Result<Polygon, EditorError> {
        let request = self.prepare_commit().inspect_err(|e| log::warn!("Commit rejected: {e}"))?;
        self.end_session();
        log::info!("Committed boundary with {} points", request.boundary.len());
        Ok(request.boundary)
    }

    /// Validate, hand the boundary to `save`, and close the session only if
    /// the save succeeds
    pub fn commit_with<T, E, F>(&mut self, save: F) -> Result<T, CommitError<E>>
    where
        F: FnOnce(CommitRequest) -> Result<T, E>,
        E: std::fmt::Display,
    {
        let request = self.prepare_commit().inspect_err(|e| log::warn!("Commit rejected: {e}"))?;
        let points = request.boundary.len();

        match save(request) {
            Ok(saved) => {
                self.end_session();
                log::info!("Saved boundary with {points} points");
                Ok(saved)
            }
            Err(e) => {
                log::warn!("Saving boundary failed, session kept open: {e}");
                Err(CommitError::Save(e))
            }
        }
    }

    // --- Events ---

    pub fn handle(&mut self, event: EditorEvent) -> EditorResponse {
        match event {
            EditorEvent::Wheel { position, delta } => {
                if self.viewport.wheel(position, self.element, delta) {
                    EditorResponse::ViewChanged
                } else {
                    EditorResponse::Nothing
                }
            }
            EditorEvent::Shortcut(shortcut) => match shortcut {
                Shortcut::Undo => self.undo(),
                Shortcut::Redo => self.redo(),
                Shortcut::DeleteVertex => self.delete_selected_vertex(),
                Shortcut::Escape => self.escape(),
                Shortcut::Finish => self.finish(),
            },
            EditorEvent::Pointer(pointer) => {
                if self.session.is_some() {
                    self.hovered = self.plot_under(pointer.position()).map(|plot| plot.id);
                    self.step(ToolEvent::Pointer(pointer))
                } else {
                    self.idle_pointer(pointer)
                }
            }
        }
    }

    /// Pointer handling while no session is open: hover and pick plots
    fn idle_pointer(&mut self, event: PointerEvent) -> EditorResponse {
        match event {
            PointerEvent::Move(position) => {
                let hovered = self.plot_under(position).map(|plot| plot.id);
                if hovered == self.hovered {
                    return EditorResponse::Nothing;
                }
                self.hovered = hovered;
                EditorResponse::HoverChanged(hovered)
            }
            PointerEvent::Down(position) => match self.plot_under(position) {
                Some(plot) => EditorResponse::PlotPicked(plot.id),
                None => EditorResponse::Nothing,
            },
            PointerEvent::Up(_) | PointerEvent::DoubleClick(_) => EditorResponse::Nothing,
        }
    }

    fn plot_under(&self, position: Point) -> Option<&Plot> {
        plot_at_screen(self.plots.as_slice(), position, &self.projection())
    }

    pub fn select_tool(&mut self, tool: Tool) -> EditorResponse {
        self.step(ToolEvent::SelectTool(tool))
    }

    /// Close the polygon being drawn
    pub fn finish(&mut self) -> EditorResponse {
        self.step(ToolEvent::Finish)
    }

    pub fn delete_selected_vertex(&mut self) -> EditorResponse {
        self.step(ToolEvent::DeleteVertex)
    }

    /// Drop the interaction in progress and return to the select tool
    pub fn escape(&mut self) -> EditorResponse {
        self.step(ToolEvent::Escape)
    }

    fn step(&mut self, event: ToolEvent) -> EditorResponse {
        let Some(session) = self.session.take() else {
            return EditorResponse::Nothing;
        };
        let projection = self.projection();
        let transition = self.machine.step(session, event, &projection);
        self.apply(transition)
    }

    fn apply(&mut self, transition: Transition) -> EditorResponse {
        let Transition { session, outcome } = transition;

        let response = match outcome {
            Outcome::Ignored => EditorResponse::Nothing,
            Outcome::Preview => EditorResponse::Changed,
            Outcome::Committed(description) => {
                self.history
                    .push(HistoryEntry::new(session.points().to_vec(), description));
                log::debug!("{description}: {} points", session.points().len());
                EditorResponse::Committed(description.to_string())
            }
            Outcome::Completed => {
                log::debug!("Closed polygon with {} points", session.points().len());
                EditorResponse::Completed
            }
            Outcome::Panned(delta) => {
                self.viewport.pan_by(delta);
                EditorResponse::ViewChanged
            }
            Outcome::Picked(point) => match plot_at(self.plots.as_slice(), point) {
                Some(plot) if Some(plot.id) != self.editing => EditorResponse::PlotPicked(plot.id),
                _ => EditorResponse::Nothing,
            },
            Outcome::Rejected(error) => {
                log::warn!("Rejected: {error}");
                EditorResponse::Rejected(error)
            }
        };

        self.session = Some(session);
        response
    }

    // --- History ---

    pub fn undo(&mut self) -> EditorResponse {
        let Some(session) = self.session.as_mut() else {
            return EditorResponse::Nothing;
        };
        let Some(description) = self.history.undo_description().map(str::to_string) else {
            return EditorResponse::Nothing;
        };
        let Some(entry) = self.history.undo() else {
            return EditorResponse::Nothing;
        };

        session.restore(entry.points());
        log::debug!("Undo {description}");
        EditorResponse::Undone(description)
    }

    pub fn redo(&mut self) -> EditorResponse {
        let Some(session) = self.session.as_mut() else {
            return EditorResponse::Nothing;
        };
        let Some(entry) = self.history.redo() else {
            return EditorResponse::Nothing;
        };

        session.restore(entry.points());
        let description = entry.description().to_string();
        log::debug!("Redo {description}");
        EditorResponse::Redone(description)
    }

    pub fn can_undo(&self) -> bool {
        self.session.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.is_some() && self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    // --- View ---

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in(self.element)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out(self.element)
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn view(&self) -> ViewTransform {
        self.viewport.view()
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.viewport.view(), self.element)
    }

    // --- State ---

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DrawingSession> {
        self.session.as_ref()
    }

    /// Boundary of the session, empty when none is open
    pub fn points(&self) -> &[NormalizedPoint] {
        self.session.as_ref().map(DrawingSession::points).unwrap_or(&[])
    }

    pub fn mode(&self) -> Option<Tool> {
        self.session.as_ref().map(DrawingSession::mode)
    }

    pub fn editing(&self) -> Option<PlotId> {
        self.editing
    }

    pub fn hovered(&self) -> Option<PlotId> {
        self.hovered
    }
}

impl Default for BoundaryEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn editor() -> BoundaryEditor {
        let mut editor = BoundaryEditor::default();
        editor.set_element(Rect::new(0.0, 0.0, 400.0, 400.0));
        editor
    }

    fn click(editor: &mut BoundaryEditor, x: f64, y: f64) -> EditorResponse {
        editor.handle(PointerEvent::Down(Point::new(x, y)).into())
    }

    #[test]
    fn test_start_new_resets_view() {
        let mut editor = editor();
        editor.zoom_in();
        editor.start_new();
        assert_eq!(editor.view(), ViewTransform::IDENTITY);
        assert_eq!(editor.mode(), Some(Tool::Polygon));
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_commit_without_session() {
        let mut editor = editor();
        assert_eq!(editor.commit(), Err(EditorError::NoActiveSession));
    }

    #[test]
    fn test_undo_restores_points() {
        let mut editor = editor();
        editor.start_new();
        click(&mut editor, 40.0, 40.0);
        click(&mut editor, 200.0, 40.0);
        assert_eq!(editor.undo(), EditorResponse::Undone("Add point".to_string()));
        assert_eq!(editor.points().len(), 1);
        assert_eq!(editor.undo(), EditorResponse::Nothing);
        assert_eq!(editor.redo(), EditorResponse::Redone("Add point".to_string()));
        assert_eq!(editor.points().len(), 2);
    }

    #[test]
    fn test_edit_session_can_undo_back_to_loaded_boundary() {
        let boundary = vec![
            NormalizedPoint::new(0.25, 0.25),
            NormalizedPoint::new(0.75, 0.25),
            NormalizedPoint::new(0.5, 0.75),
        ];
        let mut editor = editor();
        editor.start_edit(boundary.clone());
        assert_eq!(editor.mode(), Some(Tool::Edit));

        editor.handle(PointerEvent::Down(Point::new(100.0, 100.0)).into());
        editor.handle(PointerEvent::Up(Point::new(20.0, 20.0)).into());
        assert_ne!(editor.points(), boundary.as_slice());

        assert_eq!(editor.undo(), EditorResponse::Undone("Move point".to_string()));
        assert_eq!(editor.points(), boundary.as_slice());
    }

    #[test]
    fn test_duplicate_needs_valid_boundary() {
        let mut editor = editor();
        assert_eq!(editor.duplicate(), Err(EditorError::NoActiveSession));
        editor.start_new();
        click(&mut editor, 40.0, 40.0);
        assert_eq!(
            editor.duplicate(),
            Err(EditorError::TooFewVertices { required: 3, actual: 1 })
        );
    }

    #[test]
    fn test_unknown_plot() {
        let mut editor = editor();
        let id = uuid::Uuid::new_v4();
        assert_eq!(editor.start_edit_plot(id), Err(EditorError::UnknownPlot(id)));
        assert!(!editor.is_active());
    }
}

//! Tool state machine
//!
//! Interprets pointer and keyboard events according to the active tool. Each
//! step takes the current session by value and hands back the next session
//! together with an [`Outcome`] describing what happened. The machine never
//! touches the undo history or the view itself; the editor applies the
//! outcome (recording commits, applying pan deltas).
//!
//! One event produces at most one mutation: either an uncommitted preview
//! change or a single committed step.

use crate::error::EditorError;
use crate::geometry::{is_valid_polygon, nearest_vertex, rectangle_to_quad};
use crate::input::PointerEvent;
use crate::point::{NormalizedPoint, MIN_POLYGON_VERTICES};
use crate::session::DrawingSession;
use crate::tool::{Tool, ToolState};
use crate::transform::Projection;
use kurbo::Vec2;

/// Default vertex grab radius, in screen pixels
pub const DEFAULT_VERTEX_HIT_RADIUS: f64 = 10.0;

/// What a single step did
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Nothing happened
    Ignored,
    /// Uncommitted change: live preview, selection or tool switch
    Preview,
    /// The boundary changed and should be recorded as one history step
    Committed(&'static str),
    /// The polygon was closed and the session switched to the edit tool
    Completed,
    /// The view should pan by this many screen pixels
    Panned(Vec2),
    /// The select tool was clicked at this position
    Picked(NormalizedPoint),
    /// The action was refused; the session is unchanged
    Rejected(EditorError),
}

/// Events the state machine understands
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToolEvent {
    Pointer(PointerEvent),
    SelectTool(Tool),
    Finish,
    DeleteVertex,
    Escape,
}

/// Result of one step
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub session: DrawingSession,
    pub outcome: Outcome,
}

impl Transition {
    fn new(session: DrawingSession, outcome: Outcome) -> Self {
        Self { session, outcome }
    }
}

/// Per-tool event interpretation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolStateMachine {
    /// Vertex grab radius in screen pixels (independent of zoom)
    vertex_hit_radius: f64,
}

impl ToolStateMachine {
    pub fn new(vertex_hit_radius: f64) -> Self {
        Self { vertex_hit_radius }
    }

    pub fn vertex_hit_radius(&self) -> f64 {
        self.vertex_hit_radius
    }

    /// Apply one event to a session
    pub fn step(&self, session: DrawingSession, event: ToolEvent, projection: &Projection) -> Transition {
        match event {
            ToolEvent::Pointer(pointer) => match session.mode {
                Tool::Polygon => self.polygon_pointer(session, pointer, projection),
                Tool::Rectangle => self.rectangle_pointer(session, pointer, projection),
                Tool::Edit => self.edit_pointer(session, pointer, projection),
                Tool::Pan => self.pan_pointer(session, pointer),
                Tool::Select => self.select_pointer(session, pointer, projection),
            },
            ToolEvent::SelectTool(tool) => self.select_tool(session, tool),
            ToolEvent::Finish => self.finish(session),
            ToolEvent::DeleteVertex => self.delete_vertex(session),
            ToolEvent::Escape => self.escape(session),
        }
    }

    /// Switch tools, discarding whatever was in flight
    pub fn select_tool(&self, mut session: DrawingSession, tool: Tool) -> Transition {
        if session.mode == tool {
            return Transition::new(session, Outcome::Ignored);
        }

        session.cancel_interaction();
        if tool != Tool::Edit {
            session.selected_vertex = None;
        }
        session.mode = tool;
        Transition::new(session, Outcome::Preview)
    }

    /// Close the polygon being drawn
    ///
    /// Needs at least three points; on success the session moves to the edit
    /// tool so the new shape can be refined.
    pub fn finish(&self, mut session: DrawingSession) -> Transition {
        if session.mode != Tool::Polygon {
            return Transition::new(session, Outcome::Ignored);
        }

        if !is_valid_polygon(&session.points) {
            let error = EditorError::TooFewVertices {
                required: MIN_POLYGON_VERTICES,
                actual: session.points.len(),
            };
            return Transition::new(session, Outcome::Rejected(error));
        }

        session.cancel_interaction();
        session.mode = Tool::Edit;
        Transition::new(session, Outcome::Completed)
    }

    /// Remove the selected vertex, keeping at least three
    pub fn delete_vertex(&self, mut session: DrawingSession) -> Transition {
        let Some(index) = session.selected_vertex else {
            return Transition::new(session, Outcome::Ignored);
        };

        if index >= session.points.len() {
            session.selected_vertex = None;
            return Transition::new(session, Outcome::Ignored);
        }

        if session.points.len() <= MIN_POLYGON_VERTICES {
            let error = EditorError::VertexMinimum {
                minimum: MIN_POLYGON_VERTICES,
            };
            return Transition::new(session, Outcome::Rejected(error));
        }

        session.cancel_interaction();
        session.points.remove(index);
        session.selected_vertex = None;
        Transition::new(session, Outcome::Committed("Delete point"))
    }

    /// Abandon the current interaction and go back to the select tool
    ///
    /// Committed points stay; only transient state is dropped.
    pub fn escape(&self, mut session: DrawingSession) -> Transition {
        session.cancel_interaction();
        session.selected_vertex = None;
        session.mode = Tool::Select;
        Transition::new(session, Outcome::Preview)
    }

    fn polygon_pointer(
        &self,
        mut session: DrawingSession,
        event: PointerEvent,
        projection: &Projection,
    ) -> Transition {
        match event {
            PointerEvent::Down(position) => {
                let screen = projection.polygon_to_screen(&session.points);

                // Second press of a double-click lands on the point just placed
                if screen.last().is_some_and(|last| last.distance(position) <= self.vertex_hit_radius) {
                    return Transition::new(session, Outcome::Ignored);
                }

                // Clicking the first vertex closes the shape
                if session.points.len() >= MIN_POLYGON_VERTICES
                    && screen[0].distance(position) <= self.vertex_hit_radius
                {
                    return self.finish(session);
                }

                let point = projection.to_normalized(position);
                session.points.push(point);
                session.cursor = Some(point);
                Transition::new(session, Outcome::Committed("Add point"))
            }
            PointerEvent::Move(position) => {
                session.cursor = Some(projection.to_normalized(position));
                Transition::new(session, Outcome::Preview)
            }
            PointerEvent::DoubleClick(_) => self.finish(session),
            PointerEvent::Up(_) => Transition::new(session, Outcome::Ignored),
        }
    }

    fn rectangle_pointer(
        &self,
        mut session: DrawingSession,
        event: PointerEvent,
        projection: &Projection,
    ) -> Transition {
        match (event, session.state.clone()) {
            (PointerEvent::Down(position), _) => {
                let anchor = projection.to_normalized(position);
                session.state = ToolState::CreatingRectangle {
                    anchor,
                    current: anchor,
                };
                Transition::new(session, Outcome::Preview)
            }
            (PointerEvent::Move(position), ToolState::CreatingRectangle { anchor, .. }) => {
                session.state = ToolState::CreatingRectangle {
                    anchor,
                    current: projection.to_normalized(position),
                };
                Transition::new(session, Outcome::Preview)
            }
            (PointerEvent::Up(position), ToolState::CreatingRectangle { anchor, .. }) => {
                session.state = ToolState::Idle;
                let corner = projection.to_normalized(position);
                if anchor.x == corner.x || anchor.y == corner.y {
                    return Transition::new(session, Outcome::Rejected(EditorError::DegenerateRectangle));
                }

                session.points = rectangle_to_quad(anchor, corner);
                session.selected_vertex = None;
                Transition::new(session, Outcome::Committed("Draw rectangle"))
            }
            _ => Transition::new(session, Outcome::Ignored),
        }
    }

    fn edit_pointer(
        &self,
        mut session: DrawingSession,
        event: PointerEvent,
        projection: &Projection,
    ) -> Transition {
        match (event, session.state.clone()) {
            (PointerEvent::Down(position), _) => {
                let screen = projection.polygon_to_screen(&session.points);
                match nearest_vertex(position, &screen, self.vertex_hit_radius) {
                    Some(index) => {
                        session.selected_vertex = Some(index);
                        session.state = ToolState::DraggingVertex {
                            index,
                            origin: session.points[index],
                            moved: false,
                        };
                        Transition::new(session, Outcome::Preview)
                    }
                    None if session.selected_vertex.take().is_some() => {
                        Transition::new(session, Outcome::Preview)
                    }
                    None => Transition::new(session, Outcome::Ignored),
                }
            }
            (PointerEvent::Move(position), ToolState::DraggingVertex { index, origin, .. }) => {
                if let Some(vertex) = session.points.get_mut(index) {
                    *vertex = projection.to_normalized(position);
                }
                session.state = ToolState::DraggingVertex {
                    index,
                    origin,
                    moved: true,
                };
                Transition::new(session, Outcome::Preview)
            }
            (PointerEvent::Up(_), ToolState::DraggingVertex { moved: false, .. }) => {
                session.state = ToolState::Idle;
                Transition::new(session, Outcome::Preview)
            }
            (PointerEvent::Up(position), ToolState::DraggingVertex { index, origin, .. }) => {
                session.state = ToolState::Idle;
                let point = projection.to_normalized(position);
                match session.points.get_mut(index) {
                    Some(vertex) => *vertex = point,
                    None => return Transition::new(session, Outcome::Ignored),
                }

                if point == origin {
                    Transition::new(session, Outcome::Preview)
                } else {
                    Transition::new(session, Outcome::Committed("Move point"))
                }
            }
            _ => Transition::new(session, Outcome::Ignored),
        }
    }

    fn pan_pointer(&self, mut session: DrawingSession, event: PointerEvent) -> Transition {
        match (event, session.state.clone()) {
            (PointerEvent::Down(position), _) => {
                session.state = ToolState::Panning { last: position };
                Transition::new(session, Outcome::Preview)
            }
            (PointerEvent::Move(position), ToolState::Panning { last }) => {
                session.state = ToolState::Panning { last: position };
                Transition::new(session, Outcome::Panned(position - last))
            }
            (PointerEvent::Up(_), ToolState::Panning { .. }) => {
                session.state = ToolState::Idle;
                Transition::new(session, Outcome::Preview)
            }
            _ => Transition::new(session, Outcome::Ignored),
        }
    }

    fn select_pointer(
        &self,
        session: DrawingSession,
        event: PointerEvent,
        projection: &Projection,
    ) -> Transition {
        match event {
            PointerEvent::Down(position) => {
                let point = projection.to_normalized(position);
                Transition::new(session, Outcome::Picked(point))
            }
            _ => Transition::new(session, Outcome::Ignored),
        }
    }
}

impl Default for ToolStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_VERTEX_HIT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::ViewTransform;
    use kurbo::{Point, Rect};

    fn projection() -> Projection {
        Projection::new(ViewTransform::default(), Rect::new(0.0, 0.0, 400.0, 400.0))
    }

    fn down(x: f64, y: f64) -> ToolEvent {
        ToolEvent::Pointer(PointerEvent::Down(Point::new(x, y)))
    }

    fn moved(x: f64, y: f64) -> ToolEvent {
        ToolEvent::Pointer(PointerEvent::Move(Point::new(x, y)))
    }

    fn up(x: f64, y: f64) -> ToolEvent {
        ToolEvent::Pointer(PointerEvent::Up(Point::new(x, y)))
    }

    fn triangle_session(mode: Tool) -> DrawingSession {
        DrawingSession::with_points(
            mode,
            vec![
                NormalizedPoint::new(0.25, 0.25),
                NormalizedPoint::new(0.75, 0.25),
                NormalizedPoint::new(0.5, 0.75),
            ],
        )
    }

    fn run(session: DrawingSession, events: &[ToolEvent]) -> (DrawingSession, Vec<Outcome>) {
        let machine = ToolStateMachine::default();
        let projection = projection();
        let mut outcomes = Vec::new();
        let mut session = session;
        for event in events {
            let transition = machine.step(session, *event, &projection);
            session = transition.session;
            outcomes.push(transition.outcome);
        }
        (session, outcomes)
    }

    #[test]
    fn test_polygon_click_adds_point() {
        let (session, outcomes) = run(DrawingSession::new(Tool::Polygon), &[down(100.0, 200.0)]);
        assert_eq!(outcomes, vec![Outcome::Committed("Add point")]);
        assert_eq!(session.points(), &[NormalizedPoint::new(0.25, 0.5)]);
    }

    #[test]
    fn test_polygon_move_is_preview_only() {
        let (session, outcomes) = run(
            DrawingSession::new(Tool::Polygon),
            &[down(100.0, 100.0), moved(200.0, 120.0)],
        );
        assert_eq!(outcomes[1], Outcome::Preview);
        assert_eq!(session.points().len(), 1);
        assert_eq!(session.cursor(), Some(NormalizedPoint::new(0.5, 0.3)));
    }

    #[test]
    fn test_polygon_repeat_click_is_ignored() {
        let (session, outcomes) = run(
            DrawingSession::new(Tool::Polygon),
            &[down(100.0, 100.0), down(102.0, 101.0)],
        );
        assert_eq!(outcomes[1], Outcome::Ignored);
        assert_eq!(session.points().len(), 1);
    }

    #[test]
    fn test_polygon_finish_requires_three_points() {
        let (session, outcomes) = run(
            DrawingSession::new(Tool::Polygon),
            &[down(10.0, 10.0), down(200.0, 10.0), ToolEvent::Finish],
        );
        assert_eq!(
            outcomes[2],
            Outcome::Rejected(EditorError::TooFewVertices { required: 3, actual: 2 })
        );
        assert_eq!(session.mode(), Tool::Polygon);
        assert_eq!(session.points().len(), 2);
    }

    #[test]
    fn test_polygon_double_click_finishes_into_edit() {
        let (session, outcomes) = run(
            DrawingSession::new(Tool::Polygon),
            &[
                down(10.0, 10.0),
                down(200.0, 10.0),
                down(200.0, 200.0),
                ToolEvent::Pointer(PointerEvent::DoubleClick(Point::new(200.0, 200.0))),
            ],
        );
        assert_eq!(outcomes[3], Outcome::Completed);
        assert_eq!(session.mode(), Tool::Edit);
        assert_eq!(session.points().len(), 3);
    }

    #[test]
    fn test_polygon_click_on_first_vertex_closes() {
        let (session, outcomes) = run(
            DrawingSession::new(Tool::Polygon),
            &[
                down(10.0, 10.0),
                down(200.0, 10.0),
                down(200.0, 200.0),
                down(14.0, 12.0),
            ],
        );
        assert_eq!(outcomes[3], Outcome::Completed);
        assert_eq!(session.points().len(), 3);
    }

    #[test]
    fn test_rectangle_drag() {
        let (session, outcomes) = run(
            DrawingSession::new(Tool::Rectangle),
            &[down(300.0, 200.0), moved(200.0, 150.0), up(100.0, 100.0)],
        );
        assert_eq!(
            outcomes,
            vec![Outcome::Preview, Outcome::Preview, Outcome::Committed("Draw rectangle")]
        );
        assert_eq!(
            session.points(),
            &[
                NormalizedPoint::new(0.25, 0.25),
                NormalizedPoint::new(0.75, 0.25),
                NormalizedPoint::new(0.75, 0.5),
                NormalizedPoint::new(0.25, 0.5),
            ]
        );
        assert_eq!(session.rectangle_anchor(), None);
    }

    #[test]
    fn test_rectangle_move_without_anchor_is_ignored() {
        let (session, outcomes) = run(DrawingSession::new(Tool::Rectangle), &[moved(50.0, 50.0)]);
        assert_eq!(outcomes, vec![Outcome::Ignored]);
        assert_eq!(session.rectangle_anchor(), None);
    }

    #[test]
    fn test_rectangle_click_without_drag_is_rejected() {
        let (session, outcomes) = run(
            DrawingSession::new(Tool::Rectangle),
            &[down(100.0, 100.0), up(100.0, 100.0)],
        );
        assert_eq!(outcomes[1], Outcome::Rejected(EditorError::DegenerateRectangle));
        assert!(session.points().is_empty());
        assert_eq!(session.rectangle_anchor(), None);
    }

    #[test]
    fn test_edit_drag_vertex() {
        let (session, outcomes) = run(
            triangle_session(Tool::Edit),
            &[down(298.0, 103.0), moved(320.0, 120.0), up(340.0, 140.0)],
        );
        assert_eq!(
            outcomes,
            vec![Outcome::Preview, Outcome::Preview, Outcome::Committed("Move point")]
        );
        assert_eq!(session.points()[1], NormalizedPoint::new(0.85, 0.35));
        assert_eq!(session.selected_vertex(), Some(1));
        assert!(!session.is_dragging_vertex());
    }

    #[test]
    fn test_edit_live_drag_updates_vertex() {
        let (session, _) = run(
            triangle_session(Tool::Edit),
            &[down(100.0, 100.0), moved(40.0, 80.0)],
        );
        assert_eq!(session.points()[0], NormalizedPoint::new(0.1, 0.2));
        assert!(session.is_dragging_vertex());
    }

    #[test]
    fn test_edit_click_without_move_does_not_commit() {
        let (session, outcomes) = run(
            triangle_session(Tool::Edit),
            &[down(100.0, 100.0), up(100.0, 100.0)],
        );
        assert_eq!(outcomes, vec![Outcome::Preview, Outcome::Preview]);
        assert_eq!(session.selected_vertex(), Some(0));
    }

    #[test]
    fn test_edit_off_centre_click_leaves_vertex_in_place() {
        let (session, outcomes) = run(
            triangle_session(Tool::Edit),
            &[down(294.0, 106.0), up(294.0, 106.0)],
        );
        assert_eq!(outcomes, vec![Outcome::Preview, Outcome::Preview]);
        assert_eq!(session.points()[1], NormalizedPoint::new(0.75, 0.25));
        assert_eq!(session.selected_vertex(), Some(1));
        assert!(!session.is_dragging_vertex());
    }

    #[test]
    fn test_edit_click_away_clears_selection() {
        let (session, outcomes) = run(
            triangle_session(Tool::Edit),
            &[down(100.0, 100.0), up(100.0, 100.0), down(10.0, 390.0), down(10.0, 390.0)],
        );
        assert_eq!(outcomes[2], Outcome::Preview);
        assert_eq!(outcomes[3], Outcome::Ignored);
        assert_eq!(session.selected_vertex(), None);
    }

    #[test]
    fn test_edit_hit_radius_is_in_screen_pixels() {
        let machine = ToolStateMachine::default();
        // At 4x zoom a 12px miss is still a miss even though it is only 3
        // canvas pixels away.
        let zoomed = Projection::new(
            ViewTransform::new(4.0, Vec2::ZERO),
            Rect::new(0.0, 0.0, 400.0, 400.0),
        );
        let session = triangle_session(Tool::Edit);
        let transition = machine.step(session, down(412.0, 400.0), &zoomed);
        assert_eq!(transition.outcome, Outcome::Ignored);

        let transition = machine.step(transition.session, down(406.0, 400.0), &zoomed);
        assert_eq!(transition.session.selected_vertex(), Some(0));
    }

    #[test]
    fn test_delete_vertex() {
        let mut session = triangle_session(Tool::Edit);
        session.points.push(NormalizedPoint::new(0.1, 0.6));
        let (session, outcomes) = run(
            session,
            &[down(300.0, 100.0), up(300.0, 100.0), ToolEvent::DeleteVertex],
        );
        assert_eq!(outcomes[2], Outcome::Committed("Delete point"));
        assert_eq!(session.points().len(), 3);
        assert!(!session.points().contains(&NormalizedPoint::new(0.75, 0.25)));
        assert_eq!(session.selected_vertex(), None);
    }

    #[test]
    fn test_delete_vertex_from_triangle_is_rejected() {
        let original = triangle_session(Tool::Edit);
        let (session, outcomes) = run(
            original.clone(),
            &[down(300.0, 100.0), up(300.0, 100.0), ToolEvent::DeleteVertex],
        );
        assert_eq!(
            outcomes[2],
            Outcome::Rejected(EditorError::VertexMinimum { minimum: 3 })
        );
        assert_eq!(session.points(), original.points());
    }

    #[test]
    fn test_delete_without_selection_is_ignored() {
        let (_, outcomes) = run(triangle_session(Tool::Edit), &[ToolEvent::DeleteVertex]);
        assert_eq!(outcomes, vec![Outcome::Ignored]);
    }

    #[test]
    fn test_pan_tool_reports_deltas() {
        let (session, outcomes) = run(
            triangle_session(Tool::Pan),
            &[down(10.0, 10.0), moved(25.0, 5.0), moved(30.0, 0.0), up(30.0, 0.0)],
        );
        assert_eq!(outcomes[1], Outcome::Panned(Vec2::new(15.0, -5.0)));
        assert_eq!(outcomes[2], Outcome::Panned(Vec2::new(5.0, -5.0)));
        assert_eq!(session.points(), triangle_session(Tool::Pan).points());
        assert_eq!(session.state(), &ToolState::Idle);
    }

    #[test]
    fn test_select_reports_pick() {
        let (_, outcomes) = run(triangle_session(Tool::Select), &[down(200.0, 200.0)]);
        assert_eq!(outcomes, vec![Outcome::Picked(NormalizedPoint::new(0.5, 0.5))]);
    }

    #[test]
    fn test_switching_tool_abandons_drag() {
        let (session, outcomes) = run(
            triangle_session(Tool::Edit),
            &[down(100.0, 100.0), moved(50.0, 50.0), ToolEvent::SelectTool(Tool::Rectangle)],
        );
        assert_eq!(outcomes[2], Outcome::Preview);
        assert_eq!(session.points()[0], NormalizedPoint::new(0.25, 0.25));
        assert_eq!(session.selected_vertex(), None);
        assert_eq!(session.mode(), Tool::Rectangle);
    }

    #[test]
    fn test_escape_drops_anchor_and_returns_to_select() {
        let (session, _) = run(
            DrawingSession::new(Tool::Rectangle),
            &[down(10.0, 10.0), moved(80.0, 80.0), ToolEvent::Escape],
        );
        assert_eq!(session.mode(), Tool::Select);
        assert_eq!(session.rectangle_anchor(), None);
        assert!(session.points().is_empty());
    }
}

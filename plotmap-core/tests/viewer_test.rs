//! Integration tests for the public plan viewer

use kurbo::{Point, Rect};
use plotmap_core::{
    EditorEvent, EditorSettings, NormalizedPoint, Plot, PlotSet, PlotViewer, PointerEvent,
    ViewerResponse,
};

fn setup_viewer() -> (PlotViewer, Plot, Plot) {
    let lower = Plot::new(
        "Block A",
        vec![
            NormalizedPoint::new(0.0, 0.0),
            NormalizedPoint::new(0.6, 0.0),
            NormalizedPoint::new(0.6, 0.6),
            NormalizedPoint::new(0.0, 0.6),
        ],
    );
    let upper = Plot::new(
        "A-3",
        vec![
            NormalizedPoint::new(0.2, 0.2),
            NormalizedPoint::new(0.4, 0.2),
            NormalizedPoint::new(0.4, 0.4),
            NormalizedPoint::new(0.2, 0.4),
        ],
    );
    let mut viewer = PlotViewer::new(
        PlotSet::new(vec![lower.clone(), upper.clone()]),
        &EditorSettings::default(),
    );
    viewer.set_element(Rect::new(0.0, 0.0, 500.0, 500.0));
    (viewer, lower, upper)
}

fn pointer(event: PointerEvent) -> EditorEvent {
    EditorEvent::Pointer(event)
}

#[test]
fn test_hover_prefers_topmost_plot() {
    let (mut viewer, lower, upper) = setup_viewer();

    let response = viewer.handle(pointer(PointerEvent::Move(Point::new(150.0, 150.0))));
    assert_eq!(response, ViewerResponse::HoverChanged(Some(upper.id)));

    let response = viewer.handle(pointer(PointerEvent::Move(Point::new(155.0, 150.0))));
    assert_eq!(response, ViewerResponse::Nothing);

    let response = viewer.handle(pointer(PointerEvent::Move(Point::new(50.0, 50.0))));
    assert_eq!(response, ViewerResponse::HoverChanged(Some(lower.id)));

    let response = viewer.handle(pointer(PointerEvent::Move(Point::new(450.0, 450.0))));
    assert_eq!(response, ViewerResponse::HoverChanged(None));
}

#[test]
fn test_click_inquires() {
    let (mut viewer, _, upper) = setup_viewer();
    viewer.handle(pointer(PointerEvent::Down(Point::new(150.0, 150.0))));
    let response = viewer.handle(pointer(PointerEvent::Up(Point::new(151.0, 150.0))));
    assert_eq!(response, ViewerResponse::Inquire(upper.id));
}

#[test]
fn test_click_on_empty_ground() {
    let (mut viewer, _, _) = setup_viewer();
    viewer.handle(pointer(PointerEvent::Down(Point::new(450.0, 450.0))));
    let response = viewer.handle(pointer(PointerEvent::Up(Point::new(450.0, 450.0))));
    assert_eq!(response, ViewerResponse::Nothing);
}

#[test]
fn test_no_drag_pan_at_base_zoom() {
    let (mut viewer, _, _) = setup_viewer();
    viewer.handle(pointer(PointerEvent::Down(Point::new(100.0, 100.0))));
    viewer.handle(pointer(PointerEvent::Move(Point::new(160.0, 130.0))));
    let response = viewer.handle(pointer(PointerEvent::Up(Point::new(160.0, 130.0))));

    assert_eq!(viewer.view().pan, kurbo::Vec2::ZERO);
    // A press that travelled is not a click
    assert_eq!(response, ViewerResponse::Nothing);
}

#[test]
fn test_drag_pans_when_zoomed() {
    let (mut viewer, _, _) = setup_viewer();
    assert!(viewer.zoom_in());
    let pan_before = viewer.view().pan;

    viewer.handle(pointer(PointerEvent::Down(Point::new(100.0, 100.0))));
    let response = viewer.handle(pointer(PointerEvent::Move(Point::new(130.0, 90.0))));
    assert_eq!(response, ViewerResponse::ViewChanged);
    let response = viewer.handle(pointer(PointerEvent::Up(Point::new(130.0, 90.0))));
    assert_eq!(response, ViewerResponse::Nothing);

    let pan = viewer.view().pan;
    assert_eq!(pan - pan_before, kurbo::Vec2::new(30.0, -10.0));
}

#[test]
fn test_viewer_zoom_range() {
    let (mut viewer, _, _) = setup_viewer();
    assert!(!viewer.zoom_out());

    let response = viewer.handle(EditorEvent::Wheel {
        position: Point::new(250.0, 250.0),
        delta: 100_000.0,
    });
    assert_eq!(response, ViewerResponse::ViewChanged);
    assert_eq!(viewer.view().zoom, 3.0);

    viewer.reset_view();
    assert_eq!(viewer.view().zoom, 1.0);
}

#[test]
fn test_hover_cleared_when_plot_removed() {
    let (mut viewer, lower, upper) = setup_viewer();
    viewer.handle(pointer(PointerEvent::Move(Point::new(150.0, 150.0))));
    assert_eq!(viewer.hovered(), Some(upper.id));

    viewer.set_plots(PlotSet::new(vec![lower]));
    assert_eq!(viewer.hovered(), None);
}

#[test]
fn test_zooming_back_out_recentres_plan() {
    let (mut viewer, _, _) = setup_viewer();
    assert!(viewer.zoom_in());

    viewer.handle(pointer(PointerEvent::Down(Point::new(100.0, 100.0))));
    viewer.handle(pointer(PointerEvent::Move(Point::new(140.0, 100.0))));
    viewer.handle(pointer(PointerEvent::Up(Point::new(140.0, 100.0))));
    assert_eq!(viewer.view().pan, kurbo::Vec2::new(-10.0, -50.0));

    while viewer.zoom_out() {}
    assert_eq!(viewer.view().zoom, 1.0);
    assert_eq!(viewer.view().pan, kurbo::Vec2::ZERO);

    // Nothing left to drag at 1x, and nothing off-centre to recover
    viewer.handle(pointer(PointerEvent::Down(Point::new(100.0, 100.0))));
    let response = viewer.handle(pointer(PointerEvent::Move(Point::new(160.0, 100.0))));
    assert_ne!(response, ViewerResponse::ViewChanged);
    assert_eq!(viewer.view().pan, kurbo::Vec2::ZERO);
}

#[test]
fn test_drag_cannot_pull_plan_off_its_element() {
    let (mut viewer, _, _) = setup_viewer();
    assert!(viewer.zoom_in());

    viewer.handle(pointer(PointerEvent::Down(Point::new(100.0, 100.0))));
    viewer.handle(pointer(PointerEvent::Move(Point::new(400.0, 400.0))));
    // 500px element at 1.2x: the plan's top-left corner can reach the
    // element's top-left corner but not past it
    assert_eq!(viewer.view().pan, kurbo::Vec2::ZERO);
}

//! Hover resolution: which plot is under a point
//!
//! Plots later in the list draw on top, so iteration runs in reverse and the
//! first containing plot wins.

use crate::geometry::point_in_polygon;
use crate::plot::Plot;
use crate::point::NormalizedPoint;
use crate::transform::Projection;
use kurbo::Point;

/// Topmost plot containing a normalized point
pub fn plot_at(plots: &[Plot], point: NormalizedPoint) -> Option<&Plot> {
    plots
        .iter()
        .rev()
        .find(|plot| point_in_polygon(point, &plot.boundary))
}

/// Topmost plot under a screen position, tested in screen space
pub fn plot_at_screen<'a>(plots: &'a [Plot], position: Point, projection: &Projection) -> Option<&'a Plot> {
    plots.iter().rev().find(|plot| {
        let screen = projection.polygon_to_screen(&plot.boundary);
        point_in_polygon(position, &screen)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rectangle_to_quad;
    use crate::transform::ViewTransform;
    use kurbo::{Rect, Vec2};

    fn plots() -> Vec<Plot> {
        vec![
            Plot::new(
                "big",
                rectangle_to_quad(NormalizedPoint::new(0.1, 0.1), NormalizedPoint::new(0.9, 0.9)),
            ),
            Plot::new(
                "small",
                rectangle_to_quad(NormalizedPoint::new(0.4, 0.4), NormalizedPoint::new(0.6, 0.6)),
            ),
            Plot::new("undrawn", Vec::new()),
        ]
    }

    #[test]
    fn test_topmost_plot_wins() {
        let plots = plots();
        let hit = plot_at(&plots, NormalizedPoint::new(0.5, 0.5)).unwrap();
        assert_eq!(hit.display_label, "small");

        let hit = plot_at(&plots, NormalizedPoint::new(0.2, 0.2)).unwrap();
        assert_eq!(hit.display_label, "big");

        assert!(plot_at(&plots, NormalizedPoint::new(0.95, 0.95)).is_none());
    }

    #[test]
    fn test_screen_lookup_follows_view() {
        let plots = plots();
        let projection = Projection::new(
            ViewTransform::new(2.0, Vec2::new(-200.0, -200.0)),
            Rect::new(0.0, 0.0, 400.0, 400.0),
        );
        // Normalized (0.5, 0.5) sits at canvas (200, 200), screen (200, 200)
        let hit = plot_at_screen(&plots, Point::new(200.0, 200.0), &projection).unwrap();
        assert_eq!(hit.display_label, "small");
    }
}

//! Geometry kernel for plot boundaries
//!
//! Point-in-polygon, vertex hit testing, rectangle construction and the
//! (deliberately minimal) validity check. Functions are generic over
//! [`PlanarPoint`] so they work in normalized space and in screen space.

use crate::point::{NormalizedPoint, PlanarPoint, Polygon, MIN_POLYGON_VERTICES};
use kurbo::{Rect, Vec2};

/// Even-odd ray casting test
///
/// The polygon is treated as closed (last vertex connects to the first).
/// Points exactly on an edge may land on either side.
pub fn point_in_polygon<P: PlanarPoint>(point: P, polygon: &[P]) -> bool {
    if polygon.len() < MIN_POLYGON_VERTICES {
        return false;
    }

    let (x, y) = (point.x(), point.y());
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x(), polygon[i].y());
        let (xj, yj) = (polygon[j].x(), polygon[j].y());
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Find the vertex closest to `point` within `threshold`
///
/// Both the point and the polygon must be in the same space as the threshold.
/// The editor always calls this in screen space with a pixel threshold, so
/// handles keep the same grab size at every zoom level. Ties go to the lower
/// index.
pub fn nearest_vertex<P: PlanarPoint>(point: P, polygon: &[P], threshold: f64) -> Option<usize> {
    polygon
        .iter()
        .enumerate()
        .map(|(index, vertex)| (index, point.distance_to(vertex)))
        .filter(|(_, distance)| *distance <= threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// Build the quad spanned by two opposite corners
///
/// Returns `[top-left, top-right, bottom-right, bottom-left]` whichever
/// direction the user dragged in.
pub fn rectangle_to_quad(corner1: NormalizedPoint, corner2: NormalizedPoint) -> Polygon {
    let (left, right) = (corner1.x.min(corner2.x), corner1.x.max(corner2.x));
    let (top, bottom) = (corner1.y.min(corner2.y), corner1.y.max(corner2.y));

    vec![
        NormalizedPoint::new(left, top),
        NormalizedPoint::new(right, top),
        NormalizedPoint::new(right, bottom),
        NormalizedPoint::new(left, bottom),
    ]
}

/// A boundary is savable once it has at least three vertices
///
/// No self-intersection, convexity or overlap checks are made.
pub fn is_valid_polygon(polygon: &[NormalizedPoint]) -> bool {
    polygon.len() >= MIN_POLYGON_VERTICES
}

/// Label anchor of a boundary: the average of its vertices
pub fn centroid(polygon: &[NormalizedPoint]) -> Option<NormalizedPoint> {
    if polygon.is_empty() {
        return None;
    }

    let count = polygon.len() as f64;
    let (sum_x, sum_y) = polygon
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(NormalizedPoint::new(sum_x / count, sum_y / count))
}

/// Axis-aligned bounds of a boundary, in normalized units
pub fn bounds(polygon: &[NormalizedPoint]) -> Option<Rect> {
    let first = polygon.first()?;
    let mut rect = Rect::new(first.x, first.y, first.x, first.y);
    for p in &polygon[1..] {
        rect.x0 = rect.x0.min(p.x);
        rect.y0 = rect.y0.min(p.y);
        rect.x1 = rect.x1.max(p.x);
        rect.y1 = rect.y1.max(p.y);
    }
    Some(rect)
}

/// Shift every vertex by the same normalized offset
pub fn translate(polygon: &[NormalizedPoint], delta: Vec2) -> Polygon {
    polygon.iter().map(|p| p.offset(delta)).collect()
}

/// Offset a copy of a boundary by `amount` on both axes, staying on the plan
///
/// The copy moves down-right by default; along an axis where that would push
/// it past the edge of the plan it moves the other way instead.
pub fn offset_copy(polygon: &[NormalizedPoint], amount: f64) -> Polygon {
    let Some(rect) = bounds(polygon) else {
        return Vec::new();
    };

    let dx = if rect.x1 + amount > 1.0 { -amount } else { amount };
    let dy = if rect.y1 + amount > 1.0 { -amount } else { amount };
    translate(polygon, Vec2::new(dx, dy))
}

//! Normalized plot-space points
//!
//! Boundaries are stored as fractions of the background plan's width and
//! height, so a boundary drawn against one rendering of the plan stays valid
//! at any other resolution or zoom level.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum number of vertices for a boundary to be savable
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A vertex in normalized plot space
///
/// Both coordinates are nominally in `[0, 1]`. Values are not clamped: a drag
/// can briefly carry a vertex past the edge of the plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered vertex list of a plot boundary (implicitly closed)
pub type Polygon = Vec<NormalizedPoint>;

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in normalized units
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Move the point by a normalized offset
    pub fn offset(self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    /// Check whether the point lies on the plan (inclusive)
    pub fn is_in_unit_square(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Clamp both coordinates into `[0, 1]`
    pub fn clamped(self) -> Self {
        Self::new(self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0))
    }

    /// Compare with a tolerance on each axis
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

/// Anything with planar x/y coordinates
///
/// Lets the geometry kernel run the same algorithms in normalized space and in
/// screen space without mixing the two point types.
pub trait PlanarPoint: Copy {
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    fn distance_to(&self, other: &Self) -> f64 {
        (self.x() - other.x()).hypot(self.y() - other.y())
    }
}

impl PlanarPoint for NormalizedPoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl PlanarPoint for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

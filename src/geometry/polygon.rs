use crate::error::Result;
use crate::math::{Point2, TOLERANCE};
use crate::tessellation::triangulate;

use super::{Aabb2, Segment, SimplePolygon};

/// An outer ring with zero or more holes.
///
/// The outer ring is stored counter-clockwise and holes clockwise,
/// whatever orientation they were given in. Holes are expected to lie
/// inside the outer ring without overlapping each other.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonWithHoles {
    outer: SimplePolygon,
    holes: Vec<SimplePolygon>,
}

impl PolygonWithHoles {
    /// Creates a polygon, normalising ring orientations.
    #[must_use]
    pub fn new(outer: SimplePolygon, holes: Vec<SimplePolygon>) -> Self {
        Self {
            outer: outer.to_ccw(),
            holes: holes.iter().map(SimplePolygon::to_cw).collect(),
        }
    }

    /// Creates a polygon without holes.
    #[must_use]
    pub fn from_outer(outer: SimplePolygon) -> Self {
        Self::new(outer, Vec::new())
    }

    /// Creates a polygon from coordinate lists.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if any ring is degenerate.
    pub fn from_coords(outer: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Result<Self> {
        let outer = SimplePolygon::from_coords(outer)?;
        let holes = holes
            .iter()
            .map(|h| SimplePolygon::from_coords(h))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(outer, holes))
    }

    #[must_use]
    pub fn outer(&self) -> &SimplePolygon {
        &self.outer
    }

    #[must_use]
    pub fn holes(&self) -> &[SimplePolygon] {
        &self.holes
    }

    /// Outer ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &SimplePolygon> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Boundary segments of all rings.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.rings().flat_map(SimplePolygon::segments)
    }

    /// Area of the outer ring minus the areas of the holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.outer.area() - self.holes.iter().map(SimplePolygon::area).sum::<f64>()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb2 {
        self.outer.bounding_box()
    }

    /// `true` if `point` is strictly inside the outer ring and not inside
    /// or on any hole.
    #[must_use]
    pub fn contains_point(&self, point: &Point2) -> bool {
        self.outer.contains_point(point)
            && !self.holes.iter().any(|h| h.covers_point(point, TOLERANCE))
    }

    /// A point guaranteed to lie in the polygon's interior, away from
    /// every ring.
    ///
    /// Triangulates the polygon and returns the centroid of the largest
    /// interior triangle. Returns `None` if no interior triangle exists.
    #[must_use]
    pub fn interior_point(&self) -> Option<Point2> {
        let triangles = triangulate(self).ok()?;
        triangles
            .iter()
            .map(|t| (triangle_area(t), t))
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .filter(|(area, _)| *area > 0.0)
            .map(|(_, t)| Point2::from((t[0].coords + t[1].coords + t[2].coords) / 3.0))
    }
}

fn triangle_area(t: &[Point2; 3]) -> f64 {
    let a = t[1] - t[0];
    let b = t[2] - t[0];
    (a.x * b.y - a.y * b.x).abs() * 0.5
}

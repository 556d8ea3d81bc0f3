use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{
    point_on_ring, ring_centroid, rotate_to_canonical_start, signed_area_2d, winding_number_2d,
};
use crate::math::{Point2, TOLERANCE};

use super::{Aabb2, Segment};

/// Orientation of a closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
}

/// A closed ring without holes.
///
/// Stored without a repeated closing point. Construction guarantees at
/// least three distinct vertices, finite coordinates and non-zero area;
/// it does not check for self-intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePolygon {
    points: Vec<Point2>,
    signed_area: f64,
}

impl SimplePolygon {
    /// Creates a ring from its vertices.
    ///
    /// A trailing copy of the first vertex and consecutive duplicates are
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if a coordinate is not finite, fewer than
    /// three distinct vertices remain, or the ring has no area.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::NonFinite { x: bad.x, y: bad.y }.into());
        }

        let mut cleaned: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            if cleaned.last() != Some(&p) {
                cleaned.push(p);
            }
        }
        while cleaned.len() > 1 && cleaned.first() == cleaned.last() {
            cleaned.pop();
        }

        if cleaned.len() < 3 {
            return Err(GeometryError::TooFewPoints(cleaned.len()).into());
        }

        let signed_area = signed_area_2d(&cleaned);
        if signed_area.abs() <= TOLERANCE * TOLERANCE {
            return Err(GeometryError::Degenerate("ring has zero area".into()).into());
        }

        Ok(Self {
            points: cleaned,
            signed_area,
        })
    }

    /// Creates a ring from coordinate pairs.
    ///
    /// # Errors
    ///
    /// See [`SimplePolygon::new`].
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// The ring's vertices, without closing point.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a valid ring has at least three vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positive for counter-clockwise rings, negative for clockwise ones.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area.abs()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.signed_area < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        }
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.orientation() == Orientation::Clockwise
    }

    /// The same ring traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            signed_area: -self.signed_area,
        }
    }

    /// This ring in counter-clockwise orientation.
    #[must_use]
    pub fn to_ccw(&self) -> Self {
        if self.is_clockwise() {
            self.reversed()
        } else {
            self.clone()
        }
    }

    /// This ring in clockwise orientation.
    #[must_use]
    pub fn to_cw(&self) -> Self {
        if self.is_clockwise() {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// The ring's edges in traversal order, the last one closing the ring.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb2 {
        let first = self.points[0];
        self.points[1..]
            .iter()
            .fold(Aabb2::from_corners(first, first), |acc, p| {
                acc.union(&Aabb2::from_corners(*p, *p))
            })
    }

    /// Area centroid of the ring. Not guaranteed to be interior for
    /// concave rings; see [`super::PolygonWithHoles::interior_point`].
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        ring_centroid(&self.points)
    }

    /// `true` if `point` is strictly inside the ring; boundary points are
    /// outside.
    #[must_use]
    pub fn contains_point(&self, point: &Point2) -> bool {
        if !self.bounding_box().contains_point(point) {
            return false;
        }
        winding_number_2d(point, &self.points) != 0 && !self.on_boundary(point, TOLERANCE)
    }

    /// `true` if `point` lies within `tolerance` of the ring's boundary.
    #[must_use]
    pub fn on_boundary(&self, point: &Point2, tolerance: f64) -> bool {
        point_on_ring(point, &self.points, tolerance)
    }

    /// `true` if `point` is inside or on the boundary (within `tolerance`).
    #[must_use]
    pub fn covers_point(&self, point: &Point2, tolerance: f64) -> bool {
        winding_number_2d(point, &self.points) != 0 || self.on_boundary(point, tolerance)
    }

    /// `true` if `other` lies inside this ring, touching its boundary at
    /// most. Assumes the two rings do not cross, which holds for rings
    /// traced from a noded graph.
    #[must_use]
    pub fn contains_ring(&self, other: &SimplePolygon, tolerance: f64) -> bool {
        let bb = self.bounding_box().expand(tolerance);
        let obb = other.bounding_box();
        if !bb.contains_point(&obb.min) || !bb.contains_point(&obb.max) {
            return false;
        }
        if !other.points.iter().all(|p| self.covers_point(p, tolerance)) {
            return false;
        }
        // All vertices may sit on the boundary; probe the interior too.
        match super::PolygonWithHoles::from_outer(other.clone()).interior_point() {
            Some(probe) => self.covers_point(&probe, tolerance),
            None => self.covers_point(&other.centroid(), tolerance),
        }
    }

    /// `true` if both rings have the same vertex cycle, allowing any start
    /// vertex and either direction.
    #[must_use]
    pub fn is_cyclically_equal(&self, other: &SimplePolygon, tolerance: f64) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let a = rotate_to_canonical_start(&self.to_ccw().points);
        let b = rotate_to_canonical_start(&other.to_ccw().points);
        a.iter().zip(&b).all(|(p, q)| (p - q).norm() <= tolerance)
    }
}

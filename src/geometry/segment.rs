use std::cmp::Ordering;

use crate::math::{lex_cmp, Point2, Vector2};

use super::Aabb2;

/// Exact, hashable identity of a point.
///
/// Two points share a key only if their coordinates are bitwise equal
/// (with `-0.0` folded into `0.0`). Used to deduplicate vertices; snapping
/// with a tolerance happens before keys are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(u64, u64);

impl From<&Point2> for PointKey {
    fn from(p: &Point2) -> Self {
        Self((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
    }
}

/// Direction-independent identity of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentKey(PointKey, PointKey);

/// An undirected line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Creates a segment from coordinate pairs.
    #[must_use]
    pub fn from_coords(start: (f64, f64), end: (f64, f64)) -> Self {
        Self::new(Point2::new(start.0, start.1), Point2::new(end.0, end.1))
    }

    /// Returns the same segment with the lexicographically smaller point
    /// (x first, then y) as `start`.
    #[must_use]
    pub fn canonical(&self) -> Self {
        if lex_cmp(&self.start, &self.end) == Ordering::Greater {
            self.reversed()
        } else {
            *self
        }
    }

    /// Returns the segment with swapped endpoints.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Direction-independent identity of this segment's geometry.
    #[must_use]
    pub fn key(&self) -> SegmentKey {
        let c = self.canonical();
        SegmentKey(PointKey::from(&c.start), PointKey::from(&c.end))
    }

    /// `end - start`.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// `true` if both endpoints coincide exactly.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        PointKey::from(&self.start) == PointKey::from(&self.end)
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb2 {
        Aabb2::from_corners(self.start, self.end)
    }
}

use crate::arrangement::{faces_from_segments, ArrangementParams};
use crate::error::Result;
use crate::geometry::{PolygonWithHoles, Segment};

use super::validate_segments;

/// Computes all bounded faces of the arrangement of a segment set.
///
/// Segments are noded first, so they may cross and overlap freely. Each
/// bounded face comes back with the holes that sit directly inside it.
pub struct FacesFromGraph {
    segments: Vec<Segment>,
    params: ArrangementParams,
}

impl FacesFromGraph {
    /// Creates a new `FacesFromGraph` operation with default parameters.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            params: ArrangementParams::default(),
        }
    }

    /// Sets custom arrangement tolerances.
    #[must_use]
    pub fn with_params(mut self, params: ArrangementParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if a segment has a NaN or infinite
    /// coordinate.
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        validate_segments(&self.segments)?;
        Ok(faces_from_segments(&self.segments, &self.params))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{CagError, GeometryError};
    use crate::geometry::SimplePolygon;
    use crate::math::intersect_2d::true_segment_intersection;
    use crate::operations::total_area;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::from_coords(a, b)
    }

    fn ring_segments(coords: &[(f64, f64)]) -> Vec<Segment> {
        SimplePolygon::from_coords(coords).unwrap().segments().collect()
    }

    /// No two edges of the polygon's rings cross.
    fn assert_simple(polygon: &PolygonWithHoles) {
        let edges: Vec<Segment> = polygon.segments().collect();
        for (i, a) in edges.iter().enumerate() {
            for b in &edges[i + 1..] {
                assert!(
                    true_segment_intersection(&a.start, &a.end, &b.start, &b.end).is_none(),
                    "{a:?} crosses {b:?}"
                );
            }
        }
    }

    #[test]
    fn polygon_boundary_round_trips() {
        let l_shape = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)];
        let faces = FacesFromGraph::new(ring_segments(&l_shape)).execute().unwrap();
        assert_eq!(faces.len(), 1);
        let input = SimplePolygon::from_coords(&l_shape).unwrap();
        assert!(faces[0].outer().is_cyclically_equal(&input, 1e-12));
        assert!(faces[0].holes().is_empty());
    }

    #[test]
    fn clockwise_input_round_trips() {
        let cw = [(0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0)];
        let faces = FacesFromGraph::new(ring_segments(&cw)).execute().unwrap();
        assert_eq!(faces.len(), 1);
        let input = SimplePolygon::from_coords(&cw).unwrap();
        assert!(faces[0].outer().is_cyclically_equal(&input, 1e-12));
    }

    #[test]
    fn hole_boundary_also_bounds_the_hole_interior() {
        let outer = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        let hole = [(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)];
        let input = PolygonWithHoles::from_coords(&outer, &[&hole[..]]).unwrap();
        let mut segments = ring_segments(&outer);
        segments.extend(ring_segments(&hole));
        let faces = FacesFromGraph::new(segments).execute().unwrap();
        assert_eq!(faces.len(), 2);

        // Only the donut itself lies inside the input.
        let inside: Vec<_> = faces
            .iter()
            .filter(|f| input.contains_point(&f.interior_point().unwrap()))
            .collect();
        assert_eq!(inside.len(), 1);
        let donut = inside[0];
        assert_eq!(donut.holes().len(), 1);
        assert!((donut.area() - 12.0).abs() < 1e-12);
        assert!(donut
            .outer()
            .is_cyclically_equal(&SimplePolygon::from_coords(&outer).unwrap(), 1e-12));
        let inner = SimplePolygon::from_coords(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)])
            .unwrap();
        assert!(donut.holes()[0].is_cyclically_equal(&inner, 1e-12));
    }

    #[test]
    fn overlapping_squares_split_into_three_simple_faces() {
        let mut segments = ring_segments(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        segments.extend(ring_segments(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]));
        let faces = FacesFromGraph::new(segments).execute().unwrap();
        assert_eq!(faces.len(), 3);
        assert!((total_area(&faces) - 7.0).abs() < 1e-9);
        for face in &faces {
            assert_simple(face);
            assert!(face.holes().is_empty());
        }
    }

    #[test]
    fn crossing_lines_alone_bound_nothing() {
        let faces = FacesFromGraph::new(vec![
            seg((0.0, 0.0), (2.0, 2.0)),
            seg((0.0, 2.0), (2.0, 0.0)),
        ])
        .execute()
        .unwrap();
        assert!(faces.is_empty());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let err = FacesFromGraph::new(vec![seg((0.0, 0.0), (f64::NAN, 1.0))])
            .execute()
            .unwrap_err();
        assert!(matches!(err, CagError::Geometry(GeometryError::NonFinite { .. })));
    }
}

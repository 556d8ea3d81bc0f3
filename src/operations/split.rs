use crate::arrangement::{faces_from_segments, ArrangementParams};
use crate::error::Result;
use crate::geometry::{PolygonWithHoles, Segment, SimplePolygon};

use super::validate_segments;

/// Cuts a polygon with holes along a set of lines.
///
/// Returns the faces of the arrangement of the polygon's rings and the cut
/// lines that lie inside the polygon. Cut lines may extend past the polygon
/// and across its holes; parts outside are ignored.
pub struct SplitPolygonIntoFaces {
    polygon: PolygonWithHoles,
    cut_lines: Vec<Segment>,
    params: ArrangementParams,
}

impl SplitPolygonIntoFaces {
    /// Creates a new `SplitPolygonIntoFaces` operation from an outer ring
    /// and its holes.
    #[must_use]
    pub fn new(outer: SimplePolygon, holes: Vec<SimplePolygon>, cut_lines: Vec<Segment>) -> Self {
        Self::from_polygon(PolygonWithHoles::new(outer, holes), cut_lines)
    }

    #[must_use]
    pub fn from_polygon(polygon: PolygonWithHoles, cut_lines: Vec<Segment>) -> Self {
        Self {
            polygon,
            cut_lines,
            params: ArrangementParams::default(),
        }
    }

    /// Sets custom arrangement tolerances.
    #[must_use]
    pub fn with_params(mut self, params: ArrangementParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the split.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if a cut line has a NaN or
    /// infinite coordinate.
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        validate_segments(&self.cut_lines)?;

        let mut segments: Vec<Segment> = self.polygon.segments().collect();
        segments.extend_from_slice(&self.cut_lines);

        let faces: Vec<PolygonWithHoles> = faces_from_segments(&segments, &self.params)
            .into_iter()
            .filter(|face| {
                face.interior_point()
                    .is_some_and(|p| self.polygon.contains_point(&p))
            })
            .collect();

        tracing::debug!(
            cut_lines = self.cut_lines.len(),
            faces = faces.len(),
            "polygon split"
        );
        Ok(faces)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::total_area;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::from_coords(a, b)
    }

    fn square(half: f64) -> SimplePolygon {
        SimplePolygon::from_coords(&[(-half, -half), (half, -half), (half, half), (-half, half)])
            .unwrap()
    }

    #[test]
    fn quartered_donut_has_four_l_shaped_faces() {
        let faces = SplitPolygonIntoFaces::new(
            square(2.0),
            vec![square(1.0)],
            vec![seg((0.0, -3.0), (0.0, 3.0)), seg((-3.0, 0.0), (3.0, 0.0))],
        )
        .execute()
        .unwrap();

        assert_eq!(faces.len(), 4);
        for face in &faces {
            assert!(face.holes().is_empty());
            assert_eq!(face.outer().len(), 6);
            assert!((face.area() - 3.0).abs() < 1e-9);
        }

        // One face per quadrant.
        let mut quadrants: Vec<(bool, bool)> = faces
            .iter()
            .map(|f| {
                let c = f.interior_point().unwrap();
                (c.x > 0.0, c.y > 0.0)
            })
            .collect();
        quadrants.sort_unstable();
        quadrants.dedup();
        assert_eq!(quadrants.len(), 4);

        let first_quadrant = faces
            .iter()
            .find(|f| f.interior_point().is_some_and(|c| c.x > 0.0 && c.y > 0.0))
            .unwrap();
        let expected = SimplePolygon::from_coords(&[
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 2.0),
            (0.0, 1.0),
            (1.0, 1.0),
        ])
        .unwrap();
        assert!(first_quadrant.outer().is_cyclically_equal(&expected, 1e-9));
    }

    #[test]
    fn no_cut_lines_returns_the_polygon() {
        let polygon = PolygonWithHoles::new(square(2.0), vec![square(1.0)]);
        let faces = SplitPolygonIntoFaces::from_polygon(polygon, vec![])
            .execute()
            .unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].holes().len(), 1);
        assert!((faces[0].area() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn cut_outside_the_polygon_changes_nothing() {
        let faces = SplitPolygonIntoFaces::new(square(1.0), vec![], vec![seg((5.0, -5.0), (5.0, 5.0))])
            .execute()
            .unwrap();
        assert_eq!(faces.len(), 1);
        assert!((faces[0].area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_cut_halves_a_square() {
        let faces = SplitPolygonIntoFaces::new(square(1.0), vec![], vec![seg((-2.0, -2.0), (2.0, 2.0))])
            .execute()
            .unwrap();
        assert_eq!(faces.len(), 2);
        assert!((total_area(&faces) - 4.0).abs() < 1e-9);
        for f in &faces {
            assert!((f.area() - 2.0).abs() < 1e-9);
            assert_eq!(f.outer().len(), 3);
        }
    }
}

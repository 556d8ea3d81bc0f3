use crate::arrangement::{faces_from_segments, ArrangementParams};
use crate::error::Result;
use crate::geometry::{GridIndex, PolygonWithHoles, Segment};
use crate::math::Point2;

/// Subtracts a set of polygons from a base polygon.
///
/// Builds the arrangement of every ring involved and keeps the faces whose
/// interior point lies inside `base` and outside every subtracted polygon.
/// The kept faces tile `base` minus the union of the subtracted polygons;
/// adjoining subtracted polygons leave no seam.
pub struct SubtractPolygons {
    base: PolygonWithHoles,
    subtract: Vec<PolygonWithHoles>,
    params: ArrangementParams,
}

impl SubtractPolygons {
    /// Creates a new `SubtractPolygons` operation (`base` minus each of
    /// `subtract`).
    #[must_use]
    pub fn new(base: PolygonWithHoles, subtract: Vec<PolygonWithHoles>) -> Self {
        Self {
            base,
            subtract,
            params: ArrangementParams::default(),
        }
    }

    /// Sets custom arrangement tolerances.
    #[must_use]
    pub fn with_params(mut self, params: ArrangementParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the subtraction.
    ///
    /// # Errors
    ///
    /// Currently infallible; inputs are validated on construction.
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        let base_box = self.base.bounding_box();
        let relevant: Vec<&PolygonWithHoles> = self
            .subtract
            .iter()
            .filter(|s| s.bounding_box().overlaps(&base_box))
            .collect();

        let mut segments: Vec<Segment> = self.base.segments().collect();
        for s in &relevant {
            segments.extend(s.segments());
        }

        let cover = Cover::new(&relevant, self.params.spatial_index_threshold);
        let faces: Vec<PolygonWithHoles> = faces_from_segments(&segments, &self.params)
            .into_iter()
            .filter(|face| {
                face.interior_point()
                    .is_some_and(|p| self.base.contains_point(&p) && !cover.contains(&p))
            })
            .collect();

        tracing::debug!(
            subtracted = self.subtract.len(),
            overlapping = relevant.len(),
            indexed = cover.is_indexed(),
            faces = faces.len(),
            "polygons subtracted"
        );
        Ok(faces)
    }
}

/// Point membership in the union of the subtracted polygons.
struct Cover<'a> {
    polygons: &'a [&'a PolygonWithHoles],
    index: Option<GridIndex<usize>>,
}

impl<'a> Cover<'a> {
    fn new(polygons: &'a [&'a PolygonWithHoles], threshold: usize) -> Self {
        let index = (polygons.len() > threshold).then(|| {
            GridIndex::from_items(
                polygons
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (p.bounding_box(), i))
                    .collect(),
            )
        });
        Self { polygons, index }
    }

    fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    fn contains(&self, p: &Point2) -> bool {
        match &self.index {
            Some(index) => index
                .query_point(p)
                .into_iter()
                .any(|&i| self.polygons[i].contains_point(p)),
            None => self.polygons.iter().any(|s| s.contains_point(p)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::SimplePolygon;
    use crate::operations::total_area;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> PolygonWithHoles {
        PolygonWithHoles::from_coords(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)], &[]).unwrap()
    }

    #[test]
    fn rectangle_bites_into_square() {
        let base =
            PolygonWithHoles::from_coords(&[(1.0, -2.0), (1.0, 2.0), (-1.0, 2.0), (-1.0, -2.0)], &[])
                .unwrap();
        let bite =
            PolygonWithHoles::from_coords(&[(2.0, -1.0), (0.0, -1.0), (0.0, 1.0), (2.0, 1.0)], &[])
                .unwrap();
        let result = SubtractPolygons::new(base, vec![bite]).execute().unwrap();

        assert_eq!(result.len(), 1);
        assert!(result[0].holes().is_empty());
        let expected = SimplePolygon::from_coords(&[
            (1.0, -2.0),
            (1.0, -1.0),
            (0.0, -1.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (-1.0, 2.0),
            (-1.0, -2.0),
        ])
        .unwrap();
        assert!(result[0].outer().is_cyclically_equal(&expected, 1e-9));
        assert_abs_diff_eq!(result[0].area(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn adjoining_subtrahends_leave_one_seamless_hole() {
        let base = rect(0.0, 0.0, 10.0, 10.0);
        let left = rect(2.0, 2.0, 5.0, 8.0);
        let right = rect(5.0, 2.0, 8.0, 8.0);
        let result = SubtractPolygons::new(base, vec![left, right]).execute().unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes().len(), 1);
        assert_abs_diff_eq!(result[0].holes()[0].area(), 36.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result[0].area(), 64.0, epsilon = 1e-9);
    }

    #[test]
    fn adjoining_subtrahends_across_the_base() {
        // The cut spans the base, leaving two separate pieces.
        let base = rect(0.0, 0.0, 10.0, 4.0);
        let lower = rect(4.0, -1.0, 6.0, 2.0);
        let upper = rect(4.0, 2.0, 6.0, 5.0);
        let result = SubtractPolygons::new(base, vec![lower, upper]).execute().unwrap();

        assert_eq!(result.len(), 2);
        for piece in &result {
            assert_abs_diff_eq!(piece.area(), 16.0, epsilon = 1e-9);
            assert!(piece.holes().is_empty());
        }
    }

    #[test]
    fn containing_subtrahend_leaves_nothing() {
        let base = rect(0.0, 0.0, 1.0, 1.0);
        let result = SubtractPolygons::new(base, vec![rect(-1.0, -1.0, 2.0, 2.0)])
            .execute()
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn identical_subtrahend_leaves_nothing() {
        let base = rect(0.0, 0.0, 1.0, 1.0);
        let result = SubtractPolygons::new(base.clone(), vec![base]).execute().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn subtracting_nothing_returns_base() {
        let base = PolygonWithHoles::from_coords(
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            &[&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]],
        )
        .unwrap();
        let result = SubtractPolygons::new(base.clone(), vec![]).execute().unwrap();

        assert_eq!(result.len(), 1);
        assert!((result[0].area() - base.area()).abs() < 1e-9);
        assert!(result[0].outer().is_cyclically_equal(base.outer(), 1e-12));
        assert_eq!(result[0].holes().len(), 1);
        assert!(result[0].holes()[0].is_cyclically_equal(&base.holes()[0], 1e-12));
    }

    #[test]
    fn disjoint_subtrahend_is_ignored() {
        let base = rect(0.0, 0.0, 1.0, 1.0);
        let result = SubtractPolygons::new(base, vec![rect(5.0, 5.0, 6.0, 6.0)])
            .execute()
            .unwrap();
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn many_subtrahends_use_the_spatial_index() {
        let base = rect(0.0, 0.0, 100.0, 10.0);
        let holes: Vec<PolygonWithHoles> = (0..45)
            .map(|i| {
                let x = 2.0 * f64::from(i) + 0.5;
                rect(x, 4.0, x + 1.0, 5.0)
            })
            .collect();

        let indexed = SubtractPolygons::new(base.clone(), holes.clone()).execute().unwrap();
        let linear = SubtractPolygons::new(base, holes)
            .with_params(ArrangementParams {
                spatial_index_threshold: usize::MAX,
                ..ArrangementParams::default()
            })
            .execute()
            .unwrap();

        assert_eq!(indexed.len(), 1);
        assert_eq!(indexed[0].holes().len(), 45);
        assert_abs_diff_eq!(total_area(&indexed), 955.0, epsilon = 1e-6);
        assert_eq!(linear.len(), indexed.len());
        assert!((total_area(&linear) - total_area(&indexed)).abs() < 1e-9);
    }
}

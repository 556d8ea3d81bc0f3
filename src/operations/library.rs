use geo::BooleanOps;

use crate::error::Result;
use crate::geometry::PolygonWithHoles;

use super::convert::{from_geo_multi_polygon, to_geo_multi_polygon, to_geo_polygon};

/// Subtraction computed entirely by `geo`.
///
/// Applies `difference` once per subtracted polygon and splits the final
/// multi-polygon into parts. Produces the same area as
/// [`SubtractPolygons`](super::SubtractPolygons) and is the reference when
/// the arrangement engine is in doubt, e.g. with three or more segments
/// crossing in one point.
pub struct LibrarySubtract {
    base: PolygonWithHoles,
    subtract: Vec<PolygonWithHoles>,
}

impl LibrarySubtract {
    /// Creates a new `LibrarySubtract` operation (`base` minus each of
    /// `subtract`).
    #[must_use]
    pub fn new(base: PolygonWithHoles, subtract: Vec<PolygonWithHoles>) -> Self {
        Self { base, subtract }
    }

    /// Executes the subtraction.
    ///
    /// # Errors
    ///
    /// Currently infallible; inputs are validated on construction.
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        let base_box = self.base.bounding_box();
        let mut remainder = to_geo_multi_polygon(std::slice::from_ref(&self.base));
        for s in self
            .subtract
            .iter()
            .filter(|s| s.bounding_box().overlaps(&base_box))
        {
            remainder = remainder.difference(&to_geo_polygon(s));
            if remainder.0.is_empty() {
                break;
            }
        }
        Ok(from_geo_multi_polygon(&remainder))
    }
}

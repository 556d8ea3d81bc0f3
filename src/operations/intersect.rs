use geo::{BooleanOps, MultiPolygon};

use crate::error::{OperationError, Result};
use crate::geometry::PolygonWithHoles;

use super::convert::{from_geo_multi_polygon, to_geo_polygon};

/// Intersection of a list of polygons, computed by `geo`.
///
/// Folds pairwise intersection over the list; a multi-part result is split
/// into separate polygons.
pub struct IntersectPolygons {
    polygons: Vec<PolygonWithHoles>,
}

impl IntersectPolygons {
    /// Creates a new `IntersectPolygons` operation.
    #[must_use]
    pub fn new(polygons: Vec<PolygonWithHoles>) -> Self {
        Self { polygons }
    }

    /// Executes the intersection.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the polygon list is empty.
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        let Some((first, rest)) = self.polygons.split_first() else {
            return Err(
                OperationError::InvalidInput("cannot intersect an empty polygon list".into())
                    .into(),
            );
        };

        let mut acc = MultiPolygon::new(vec![to_geo_polygon(first)]);
        for p in rest {
            if acc.0.is_empty() {
                break;
            }
            acc = acc.intersection(&to_geo_polygon(p));
        }

        let parts = from_geo_multi_polygon(&acc);
        tracing::debug!(inputs = self.polygons.len(), parts = parts.len(), "polygons intersected");
        Ok(parts)
    }
}

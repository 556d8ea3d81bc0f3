use geo::Buffer;

use crate::error::{OperationError, Result};
use crate::geometry::PolygonWithHoles;

use super::convert::{from_geo_multi_polygon, to_geo_polygon};

/// Grows (positive distance) or shrinks (negative distance) a polygon,
/// computed by `geo`.
///
/// Shrinking may split the polygon into several parts or remove it
/// entirely.
pub struct BufferPolygon {
    polygon: PolygonWithHoles,
    distance: f64,
}

impl BufferPolygon {
    /// Creates a new `BufferPolygon` operation.
    #[must_use]
    pub fn new(polygon: PolygonWithHoles, distance: f64) -> Self {
        Self { polygon, distance }
    }

    /// Executes the buffer.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the distance is NaN or
    /// infinite.
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        if !self.distance.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "buffer distance must be finite, got {}",
                self.distance
            ))
            .into());
        }
        if self.distance == 0.0 {
            return Ok(vec![self.polygon.clone()]);
        }
        let buffered = to_geo_polygon(&self.polygon).buffer(self.distance);
        Ok(from_geo_multi_polygon(&buffered))
    }
}

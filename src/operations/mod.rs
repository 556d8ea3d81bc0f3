//! Boolean operations on polygons with holes.
//!
//! [`SubtractPolygons`], [`SplitPolygonIntoFaces`] and [`FacesFromGraph`]
//! run on the planar arrangement engine. [`IntersectPolygons`],
//! [`BufferPolygon`] and [`LibrarySubtract`] delegate to `geo`;
//! [`LibrarySubtract`] computes the same result as [`SubtractPolygons`]
//! and serves as a cross-check.

pub mod convert;

mod buffer;
mod faces_from_graph;
mod intersect;
mod library;
mod split;
mod subtract;

pub use buffer::BufferPolygon;
pub use faces_from_graph::FacesFromGraph;
pub use intersect::IntersectPolygons;
pub use library::LibrarySubtract;
pub use split::SplitPolygonIntoFaces;
pub use subtract::SubtractPolygons;

use crate::error::{GeometryError, Result};
use crate::geometry::{PolygonWithHoles, Segment};

/// Rejects segments with NaN or infinite coordinates.
fn validate_segments(segments: &[Segment]) -> Result<()> {
    for p in segments.iter().flat_map(|s| [s.start, s.end]) {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(GeometryError::NonFinite { x: p.x, y: p.y }.into());
        }
    }
    Ok(())
}

/// Sum of the areas of all polygons.
#[must_use]
pub fn total_area(polygons: &[PolygonWithHoles]) -> f64 {
    polygons.iter().map(PolygonWithHoles::area).sum()
}

#[cfg(test)]
mod properties;

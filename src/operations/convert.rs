//! Conversions between kernel polygons and `geo` types.
//!
//! `geo` rings repeat their first coordinate at the end; kernel rings do
//! not. Parts that fail ring validation are dropped.

use geo::{Coord, LineString, MultiPolygon, Polygon};

use crate::error::Result;
use crate::geometry::{PolygonWithHoles, SimplePolygon};
use crate::math::Point2;

fn ring_to_line_string(ring: &SimplePolygon) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = ring.points().iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    LineString::new(coords)
}

fn line_string_to_ring(line: &LineString<f64>) -> Result<SimplePolygon> {
    SimplePolygon::new(line.coords().map(|c| Point2::new(c.x, c.y)).collect())
}

/// Converts a polygon to a `geo::Polygon`.
#[must_use]
pub fn to_geo_polygon(polygon: &PolygonWithHoles) -> Polygon<f64> {
    Polygon::new(
        ring_to_line_string(polygon.outer()),
        polygon.holes().iter().map(ring_to_line_string).collect(),
    )
}

#[must_use]
pub fn to_geo_multi_polygon(polygons: &[PolygonWithHoles]) -> MultiPolygon<f64> {
    MultiPolygon::new(polygons.iter().map(to_geo_polygon).collect())
}

/// Converts a `geo::Polygon`, normalising ring orientation.
///
/// Returns `None` if the exterior is degenerate. Degenerate holes are
/// skipped.
#[must_use]
pub fn from_geo_polygon(polygon: &Polygon<f64>) -> Option<PolygonWithHoles> {
    let outer = match line_string_to_ring(polygon.exterior()) {
        Ok(ring) => ring,
        Err(e) => {
            tracing::trace!(reason = %e, "dropping degenerate library polygon");
            return None;
        }
    };
    let holes = polygon
        .interiors()
        .iter()
        .filter_map(|h| line_string_to_ring(h).ok())
        .collect();
    Some(PolygonWithHoles::new(outer, holes))
}

/// Splits a `geo::MultiPolygon` into its valid parts.
#[must_use]
pub fn from_geo_multi_polygon(multi: &MultiPolygon<f64>) -> Vec<PolygonWithHoles> {
    multi.0.iter().filter_map(from_geo_polygon).collect()
}

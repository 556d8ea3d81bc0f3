//! Assigning hole rings to the outer rings that immediately enclose them.

use crate::geometry::{PolygonWithHoles, SimplePolygon};

use super::ArrangementParams;

/// Builds polygons from traced outer (counter-clockwise) and inner
/// (clockwise) rings.
///
/// Each outer ring, in order, takes every remaining inner ring that is
/// smaller by more than `params.nesting_area_margin`, lies inside it, and
/// does not lie inside a smaller outer ring that is itself inside the
/// current one. Taken inner rings are not offered again. Inner rings no
/// outer ring takes, such as the unbounded face, are dropped.
///
/// Only one level of nesting is resolved per outer ring; islands inside
/// holes come out as separate polygons.
#[must_use]
pub fn nest_rings(
    outers: Vec<SimplePolygon>,
    inners: Vec<SimplePolygon>,
    params: &ArrangementParams,
) -> Vec<PolygonWithHoles> {
    let margin = params.nesting_area_margin;
    let tol = params.snap_distance;
    let mut available: Vec<Option<SimplePolygon>> = inners.into_iter().map(Some).collect();
    let mut polygons = Vec::with_capacity(outers.len());

    for (i, outer) in outers.iter().enumerate() {
        let outer_area = outer.area();
        let mut holes = Vec::new();

        for slot in &mut available {
            let Some(hole) = slot.as_ref() else {
                continue;
            };
            let hole_area = hole.area();
            if hole_area >= outer_area - margin || !outer.contains_ring(hole, tol) {
                continue;
            }
            let nearer_parent = outers.iter().enumerate().any(|(j, other)| {
                j != i
                    && other.area() < outer_area
                    && other.area() > hole_area + margin
                    && outer.contains_ring(other, tol)
                    && other.contains_ring(hole, tol)
            });
            if nearer_parent {
                continue;
            }
            if let Some(hole) = slot.take() {
                holes.push(hole);
            }
        }

        polygons.push(PolygonWithHoles::new(outer.clone(), holes));
    }

    let unassigned = available.iter().flatten().count();
    tracing::trace!(polygons = polygons.len(), unassigned, "rings nested");
    polygons
}

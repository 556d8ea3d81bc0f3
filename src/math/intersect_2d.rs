use super::{cross_2d, Point2, TOLERANCE};

/// Parametric intersection of two bounded segments in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are the
/// parameters on `a0 → a1` and `b0 → b1`, both within `[0, 1]`.
/// Parallel and collinear segments yield `None`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = cross_2d(&da, &db);
    // Relative test so the parallel check does not depend on segment length.
    if cross.abs() <= TOLERANCE * da.norm() * db.norm() {
        return None;
    }

    let d0 = b0 - a0;
    let t = cross_2d(&d0, &db) / cross;
    let u = cross_2d(&d0, &da) / cross;

    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of two segments that counts as a real crossing.
///
/// Segments sharing an endpoint never intersect here, and neither do
/// parallel or collinear ones. An endpoint of one segment lying on the
/// interior of the other (a T-junction) is reported.
#[must_use]
pub fn true_segment_intersection(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<Point2> {
    if a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1 {
        return None;
    }
    segment_segment_intersect_2d(a0, a1, b0, b1).map(|(pt, t, u)| {
        // Snap T-junctions exactly onto the touching endpoint.
        if t == 0.0 {
            *a0
        } else if t == 1.0 {
            *a1
        } else if u == 0.0 {
            *b0
        } else if u == 1.0 {
            *b1
        } else {
            pt
        }
    })
}

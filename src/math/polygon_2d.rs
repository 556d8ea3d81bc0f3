use super::{cross_2d, distance_2d::point_to_segment_dist, Point2, TOLERANCE};

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Winding number of `point` with respect to the closed ring `verts`.
///
/// Non-zero => inside, zero => outside. Points exactly on the boundary
/// may go either way; use [`point_on_ring`] first when that matters.
#[must_use]
pub fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let p0 = verts[i];
        let p1 = verts[(i + 1) % n];
        let side = cross_2d(&(p1 - p0), &(point - p0));

        if p0.y <= point.y {
            if p1.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if p1.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Returns `true` if `point` lies within `tolerance` of the ring's boundary.
#[must_use]
pub fn point_on_ring(point: &Point2, verts: &[Point2], tolerance: f64) -> bool {
    let n = verts.len();
    (0..n).any(|i| point_to_segment_dist(point, &verts[i], &verts[(i + 1) % n]) <= tolerance)
}

/// Area-weighted centroid of a closed ring. Falls back to the vertex
/// average for rings with (near) zero area.
#[must_use]
pub fn ring_centroid(points: &[Point2]) -> Point2 {
    let n = points.len();
    if n == 0 {
        return Point2::origin();
    }
    let area = signed_area_2d(points);
    if area.abs() < TOLERANCE {
        #[allow(clippy::cast_precision_loss)]
        let inv_n = 1.0 / n as f64;
        let sum = points.iter().fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        return Point2::from(sum * inv_n);
    }
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let f = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * f;
        cy += (a.y + b.y) * f;
    }
    let k = 1.0 / (6.0 * area);
    Point2::new(cx * k, cy * k)
}

/// Rotates a closed ring so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Gives rings a deterministic starting point.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

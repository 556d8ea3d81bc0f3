use super::Point2;

/// Returns the parameter of the projection of `p` onto the segment
/// `a → b`, clamped to `[0, 1]`.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return 0.0;
    }
    ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0)
}

/// Returns the minimum distance from `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let t = project_onto_segment(p, a, b);
    let closest = a + (b - a) * t;
    (p - closest).norm()
}

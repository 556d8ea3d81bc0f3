pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance for floating-point comparisons that are not tied to a
/// user-configurable model tolerance.
pub const TOLERANCE: f64 = 1e-10;

/// 2D cross product of two vectors.
#[inline]
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Lexicographic comparison of two points, x first then y.
#[must_use]
pub fn lex_cmp(a: &Point2, b: &Point2) -> std::cmp::Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

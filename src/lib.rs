//! Planar arrangement and constructive area geometry (CAG) for
//! polygons with holes.
//!
//! The custom engine runs a Bentley-Ottmann sweep to find crossings, nodes
//! the segment set, traces faces through per-vertex rotation systems and
//! nests the traced rings into polygons with holes. Boolean operations in
//! [`operations`] are composed on top of it, next to a `geo`-backed path
//! that serves as ground truth.

pub mod arrangement;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use arrangement::ArrangementParams;
pub use error::{CagError, Result};
pub use geometry::{PolygonWithHoles, Segment, SimplePolygon};

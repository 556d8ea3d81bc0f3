//! The planar arrangement engine.
//!
//! Raw segments go through [`sweep`] (crossing detection), [`noding`]
//! (splitting and snapping), [`graph`] and [`faces`] (rotation-system face
//! tracing) and finally [`nesting`], which assembles traced rings into
//! polygons with holes.

pub mod faces;
pub mod graph;
pub mod nesting;
pub mod noding;
pub mod sweep;

pub use faces::{classify_faces, trace_faces, ClassifiedRings, FaceTrace};
pub use graph::{EdgeId, PlanarGraph, VertexId};
pub use nesting::nest_rings;
pub use noding::node_segments;
pub use sweep::{find_all_intersections, Intersection};

use crate::geometry::{PolygonWithHoles, Segment};

/// Tolerances and limits of the arrangement engine.
///
/// The defaults are empirical values that work for projected map
/// coordinates in metres; none of them is derived from a global precision
/// model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrangementParams {
    /// Intersection points closer than this to an input endpoint are moved
    /// onto it, and endpoints closer than this to another segment split it.
    pub snap_distance: f64,
    /// Traced faces with a smaller area are dropped.
    pub min_face_area: f64,
    /// A hole must be smaller than its outer ring by more than this.
    pub nesting_area_margin: f64,
    /// Offset past the sweep line at which the status order is evaluated.
    pub sweep_epsilon: f64,
    /// A single face trace walking more edges than this is aborted.
    pub max_trace_edges: usize,
    /// Above this many subtracted polygons, membership tests go through a
    /// spatial index instead of a linear scan.
    pub spatial_index_threshold: usize,
}

impl Default for ArrangementParams {
    fn default() -> Self {
        Self {
            snap_distance: 1e-5,
            min_face_area: 1e-7,
            nesting_area_margin: 1e-5,
            sweep_epsilon: 1e-9,
            max_trace_edges: 10_000,
            spatial_index_threshold: 40,
        }
    }
}

/// Computes every face of the arrangement formed by `segments`.
///
/// Nodes the segments, traces all faces and nests them. Bounded faces come
/// back as polygons with their immediate holes; the unbounded face is
/// dropped.
#[must_use]
pub fn faces_from_segments(segments: &[Segment], params: &ArrangementParams) -> Vec<PolygonWithHoles> {
    let noded = node_segments(segments, params);
    let graph = PlanarGraph::from_segments(&noded);
    let traces = trace_faces(&graph, params);
    let rings = classify_faces(traces, params);
    tracing::debug!(
        input = segments.len(),
        noded = noded.len(),
        outer = rings.outer.len(),
        inner = rings.inner.len(),
        "arrangement traced"
    );
    nest_rings(rings.outer, rings.inner, params)
}

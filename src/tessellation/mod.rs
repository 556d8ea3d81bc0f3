//! Constrained Delaunay triangulation of polygons with holes.
//!
//! The kernel does not produce meshes; triangles are used to find points
//! that are guaranteed to be interior to a face.

mod triangulate;

pub use triangulate::triangulate;

//! Planar graph with a rotation system.
//!
//! Every undirected edge is stored as two directed edges that know each
//! other. Each vertex keeps its outgoing edges sorted clockwise by angle;
//! that order alone determines the faces of the embedding.

use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;

use crate::error::GraphError;
use crate::geometry::{PointKey, Segment};
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex of a [`PlanarGraph`].
    pub struct VertexId;
}

slotmap::new_key_type! {
    /// Unique identifier for a directed edge of a [`PlanarGraph`].
    pub struct EdgeId;
}

/// A graph vertex and its rotation.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub point: Point2,
    /// Outgoing edges in clockwise order.
    outgoing: Vec<EdgeId>,
}

impl Vertex {
    /// Outgoing edges in clockwise order.
    #[must_use]
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.outgoing.len()
    }
}

/// One direction of an undirected edge.
#[derive(Debug, Clone, Copy)]
pub struct DirectedEdge {
    pub origin: VertexId,
    pub target: VertexId,
    pub twin: EdgeId,
}

/// Vertices and directed edges built from noded segments.
#[derive(Debug, Default)]
pub struct PlanarGraph {
    vertices: SlotMap<VertexId, Vertex>,
    edges: SlotMap<EdgeId, DirectedEdge>,
}

impl PlanarGraph {
    /// Builds the graph of a set of noded segments.
    ///
    /// Endpoints are merged by exact coordinates. Zero-length and repeated
    /// segments are skipped.
    #[must_use]
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut graph = Self::default();
        let mut by_point: HashMap<PointKey, VertexId> = HashMap::new();
        let mut seen = HashSet::new();

        for s in segments {
            if s.is_degenerate() || !seen.insert(s.key()) {
                continue;
            }
            let a = graph.vertex_at(&mut by_point, s.start);
            let b = graph.vertex_at(&mut by_point, s.end);
            graph.add_edge_pair(a, b);
        }
        graph.sort_rotations();
        graph
    }

    fn vertex_at(&mut self, by_point: &mut HashMap<PointKey, VertexId>, p: Point2) -> VertexId {
        *by_point.entry(PointKey::from(&p)).or_insert_with(|| {
            self.vertices.insert(Vertex {
                point: p,
                outgoing: Vec::new(),
            })
        })
    }

    fn add_edge_pair(&mut self, a: VertexId, b: VertexId) {
        let forward = self.edges.insert(DirectedEdge {
            origin: a,
            target: b,
            twin: EdgeId::default(),
        });
        let backward = self.edges.insert(DirectedEdge {
            origin: b,
            target: a,
            twin: forward,
        });
        if let Some(e) = self.edges.get_mut(forward) {
            e.twin = backward;
        }
        if let Some(v) = self.vertices.get_mut(a) {
            v.outgoing.push(forward);
        }
        if let Some(v) = self.vertices.get_mut(b) {
            v.outgoing.push(backward);
        }
    }

    /// Sorts every vertex's outgoing edges clockwise, i.e. by decreasing
    /// angle.
    fn sort_rotations(&mut self) {
        let mut sorted = Vec::with_capacity(self.vertices.len());
        for (id, vertex) in &self.vertices {
            let mut keyed: Vec<(f64, EdgeId)> = vertex
                .outgoing
                .iter()
                .filter_map(|&e| {
                    let target = self.vertices.get(self.edges.get(e)?.target)?.point;
                    let d = target - vertex.point;
                    Some((d.y.atan2(d.x), e))
                })
                .collect();
            keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
            sorted.push((id, keyed.into_iter().map(|(_, e)| e).collect::<Vec<_>>()));
        }
        for (id, outgoing) in sorted {
            if let Some(v) = self.vertices.get_mut(id) {
                v.outgoing = outgoing;
            }
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges (twice the number of undirected ones).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Directed edge ids in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys()
    }

    /// # Errors
    ///
    /// Returns `GraphError::EntityNotFound` if `id` is not in the graph.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, GraphError> {
        self.vertices
            .get(id)
            .ok_or(GraphError::EntityNotFound("vertex"))
    }

    /// # Errors
    ///
    /// Returns `GraphError::EntityNotFound` if `id` is not in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&DirectedEdge, GraphError> {
        self.edges.get(id).ok_or(GraphError::EntityNotFound("edge"))
    }

    /// Coordinates of the edge's origin.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::EntityNotFound` if the edge or its origin is
    /// missing.
    pub fn origin_point(&self, id: EdgeId) -> Result<Point2, GraphError> {
        let edge = self.edge(id)?;
        Ok(self.vertex(edge.origin)?.point)
    }

    /// The edge that follows `id` on the boundary of the face to its left.
    ///
    /// At the target vertex this is the outgoing edge right after the twin
    /// of `id` in clockwise order. Bounded faces are walked
    /// counter-clockwise, the unbounded face of each component clockwise.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] if `id` is unknown or its twin is missing
    /// from the target's rotation.
    pub fn next_edge(&self, id: EdgeId) -> Result<EdgeId, GraphError> {
        let edge = self.edge(id)?;
        let rotation = &self.vertex(edge.target)?.outgoing;
        let pos = rotation
            .iter()
            .position(|&e| e == edge.twin)
            .ok_or_else(|| GraphError::BrokenRotation(format!("{id:?}")))?;
        Ok(rotation[(pos + 1) % rotation.len()])
    }
}

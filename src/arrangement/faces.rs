//! Face tracing over a [`PlanarGraph`].
//!
//! Every directed edge borders exactly one face (the one on its left), so
//! walking `next_edge` from each unvisited edge enumerates all faces, each
//! once.

use std::collections::HashSet;

use crate::geometry::{Orientation, SimplePolygon};
use crate::math::Point2;

use super::graph::{EdgeId, PlanarGraph};
use super::ArrangementParams;

/// Outcome of walking one face boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceTrace {
    /// The walk returned to its first edge. Holds the origin of every edge
    /// walked, in order.
    Closed(Vec<Point2>),
    /// The walk exceeded the edge limit and was abandoned.
    Aborted { start: Point2, edges_walked: usize },
}

/// Traces every face of the graph.
///
/// Bounded faces come out counter-clockwise; the unbounded face of each
/// connected component comes out clockwise. Walks longer than
/// `params.max_trace_edges` are aborted, logged and reported as
/// [`FaceTrace::Aborted`]; tracing continues with the next unvisited edge.
#[must_use]
pub fn trace_faces(graph: &PlanarGraph, params: &ArrangementParams) -> Vec<FaceTrace> {
    let mut visited: HashSet<EdgeId> = HashSet::with_capacity(graph.edge_count());
    let mut traces = Vec::new();

    for start in graph.edge_ids() {
        if visited.contains(&start) {
            continue;
        }
        traces.push(trace_one(graph, start, &mut visited, params.max_trace_edges));
    }

    let aborted = traces
        .iter()
        .filter(|t| matches!(t, FaceTrace::Aborted { .. }))
        .count();
    tracing::debug!(
        edges = graph.edge_count(),
        faces = traces.len(),
        aborted,
        "faces traced"
    );
    traces
}

fn trace_one(
    graph: &PlanarGraph,
    start: EdgeId,
    visited: &mut HashSet<EdgeId>,
    max_edges: usize,
) -> FaceTrace {
    let mut ring = Vec::new();
    let mut edge = start;
    loop {
        visited.insert(edge);
        let next = match (graph.origin_point(edge), graph.next_edge(edge)) {
            (Ok(p), Ok(next)) => {
                ring.push(p);
                next
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "face trace hit an inconsistent graph");
                return aborted(graph, start, ring.len());
            }
        };
        if next == start {
            return FaceTrace::Closed(ring);
        }
        if ring.len() >= max_edges {
            let trace = aborted(graph, start, ring.len());
            if let FaceTrace::Aborted { start, edges_walked } = &trace {
                tracing::warn!(
                    x = start.x,
                    y = start.y,
                    edges_walked,
                    limit = max_edges,
                    "face trace aborted"
                );
            }
            return trace;
        }
        edge = next;
    }
}

fn aborted(graph: &PlanarGraph, start: EdgeId, edges_walked: usize) -> FaceTrace {
    FaceTrace::Aborted {
        start: graph
            .origin_point(start)
            .unwrap_or_else(|_| Point2::new(f64::NAN, f64::NAN)),
        edges_walked,
    }
}

/// Closed traces split by orientation.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedRings {
    /// Counter-clockwise rings: bounded faces.
    pub outer: Vec<SimplePolygon>,
    /// Clockwise rings: hole boundaries and unbounded faces.
    pub inner: Vec<SimplePolygon>,
}

/// Cleans closed traces into rings and sorts them by orientation.
///
/// Spikes left by dangling edges are cut off. Rings that end up degenerate
/// or smaller than `params.min_face_area` are dropped. Aborted traces are
/// skipped.
#[must_use]
pub fn classify_faces(traces: Vec<FaceTrace>, params: &ArrangementParams) -> ClassifiedRings {
    let mut rings = ClassifiedRings::default();
    for trace in traces {
        let FaceTrace::Closed(points) = trace else {
            continue;
        };
        let cleaned = remove_spikes(points);
        let ring = match SimplePolygon::new(cleaned) {
            Ok(ring) => ring,
            Err(e) => {
                tracing::trace!(reason = %e, "dropping degenerate face");
                continue;
            }
        };
        if ring.area() < params.min_face_area {
            tracing::trace!(area = ring.area(), "dropping sliver face");
            continue;
        }
        match ring.orientation() {
            Orientation::CounterClockwise => rings.outer.push(ring),
            Orientation::Clockwise => rings.inner.push(ring),
        }
    }
    rings
}

/// Removes consecutive duplicates and back-and-forth excursions
/// (`a, b, a` becomes `a`), treating the sequence as cyclic.
fn remove_spikes(points: Vec<Point2>) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last() == Some(&p) {
            continue;
        }
        if out.len() >= 2 && out[out.len() - 2] == p {
            out.pop();
            continue;
        }
        out.push(p);
    }

    // The same reductions across the wrap-around.
    loop {
        let n = out.len();
        if n >= 2 && out[0] == out[n - 1] {
            out.pop();
        } else if n >= 3 && out[n - 2] == out[0] {
            out.pop();
        } else if n >= 3 && out[n - 1] == out[1] {
            out.remove(0);
        } else {
            break;
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::geometry::Segment;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::from_coords(a, b)
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square_segments() -> Vec<Segment> {
        vec![
            seg((0.0, 0.0), (1.0, 0.0)),
            seg((1.0, 0.0), (1.0, 1.0)),
            seg((1.0, 1.0), (0.0, 1.0)),
            seg((0.0, 1.0), (0.0, 0.0)),
        ]
    }

    #[test]
    fn square_has_one_bounded_and_one_unbounded_face() {
        let graph = PlanarGraph::from_segments(&square_segments());
        let params = ArrangementParams::default();
        let traces = trace_faces(&graph, &params);
        assert_eq!(traces.len(), 2);
        let rings = classify_faces(traces, &params);
        assert_eq!(rings.outer.len(), 1);
        assert_eq!(rings.inner.len(), 1);
        assert!((rings.outer[0].area() - 1.0).abs() < 1e-12);
        assert!((rings.inner[0].signed_area() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn every_directed_edge_is_walked_once() {
        let mut segments = square_segments();
        segments.push(seg((0.0, 0.0), (1.0, 1.0)));
        let graph = PlanarGraph::from_segments(&segments);
        let traces = trace_faces(&graph, &ArrangementParams::default());
        let walked: usize = traces
            .iter()
            .map(|t| match t {
                FaceTrace::Closed(points) => points.len(),
                FaceTrace::Aborted { edges_walked, .. } => *edges_walked,
            })
            .sum();
        assert_eq!(walked, graph.edge_count());
        // Two triangles plus the outside.
        assert_eq!(traces.len(), 3);
    }

    #[test]
    fn dangling_edge_is_cut_off() {
        let mut segments = square_segments();
        segments.push(seg((0.5, 0.5), (1.0, 0.0)));
        let graph = PlanarGraph::from_segments(&segments);
        let params = ArrangementParams::default();
        let rings = classify_faces(trace_faces(&graph, &params), &params);
        assert_eq!(rings.outer.len(), 1);
        assert_eq!(rings.outer[0].len(), 4);
    }

    #[test]
    fn spikes_are_removed_across_the_wrap() {
        let cleaned = remove_spikes(vec![
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
        ]);
        assert_eq!(cleaned, vec![p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)]);

        let tree = remove_spikes(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(1.0, 0.0)]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn sliver_faces_are_dropped() {
        let segments = vec![
            seg((0.0, 0.0), (1.0, 0.0)),
            seg((1.0, 0.0), (0.5, 1e-9)),
            seg((0.5, 1e-9), (0.0, 0.0)),
        ];
        let graph = PlanarGraph::from_segments(&segments);
        let params = ArrangementParams::default();
        let rings = classify_faces(trace_faces(&graph, &params), &params);
        assert!(rings.outer.is_empty());
        assert!(rings.inner.is_empty());
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn long_trace_is_aborted_and_reported() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("planar_cag=warn"))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let graph = PlanarGraph::from_segments(&square_segments());
        let params = ArrangementParams {
            max_trace_edges: 2,
            ..ArrangementParams::default()
        };
        let traces = tracing::subscriber::with_default(subscriber, || trace_faces(&graph, &params));

        assert!(!traces.is_empty());
        for t in &traces {
            assert!(matches!(t, FaceTrace::Aborted { edges_walked: 2, .. }), "{t:?}");
        }
        let rings = classify_faces(traces, &params);
        assert!(rings.outer.is_empty());

        let log = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("face trace aborted"), "log was: {log}");
    }
}

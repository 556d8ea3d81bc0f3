//! Splitting segments at their mutual intersections.
//!
//! After noding, two output segments meet only at shared endpoints. Near
//! coincidences are resolved by snapping: crossing points close to an input
//! endpoint are moved onto it, and endpoints close to another segment's
//! interior split that segment.

use std::collections::HashSet;

use crate::geometry::{Aabb2, GridIndex, PointKey, Segment, SegmentKey};
use crate::math::distance_2d::{point_to_segment_dist, project_onto_segment};
use crate::math::Point2;

use super::{find_all_intersections, ArrangementParams};

/// Splits every segment at all points where it meets another one.
///
/// Returns the noded segments without duplicates, in input order.
/// Zero-length input segments are dropped.
#[must_use]
pub fn node_segments(segments: &[Segment], params: &ArrangementParams) -> Vec<Segment> {
    let snap = params.snap_distance;
    let canonical: Vec<Segment> = segments.iter().map(Segment::canonical).collect();
    let endpoints = endpoint_index(&canonical, snap);

    let mut splits: Vec<Vec<Point2>> = canonical.iter().map(|s| vec![s.start, s.end]).collect();

    let intersections = find_all_intersections(segments, params);
    for ix in &intersections {
        let p = snap_to_endpoint(&endpoints, &ix.point, snap);
        for &i in &ix.segments {
            splits[i].push(p);
        }
    }
    add_endpoint_touches(&canonical, &mut splits, snap);

    let mut out = SegmentSet::default();
    for (segment, points) in canonical.iter().zip(splits) {
        if segment.is_degenerate() {
            continue;
        }
        let points = sorted_unique(points, &segment.start);
        for pair in points.windows(2) {
            out.insert(Segment::new(pair[0], pair[1]));
        }
    }

    tracing::debug!(
        input = segments.len(),
        intersections = intersections.len(),
        output = out.len(),
        "segments noded"
    );
    out.into_vec()
}

/// Index of all segment endpoints for snapping lookups.
fn endpoint_index(segments: &[Segment], snap: f64) -> GridIndex<Point2> {
    let mut index = GridIndex::new(snap * 4.0);
    for s in segments.iter().filter(|s| !s.is_degenerate()) {
        for p in [s.start, s.end] {
            index.insert(Aabb2::from_corners(p, p), p);
        }
    }
    index
}

/// The input endpoint nearest to `p` within `snap`, or `p` itself.
fn snap_to_endpoint(endpoints: &GridIndex<Point2>, p: &Point2, snap: f64) -> Point2 {
    let query = Aabb2::from_corners(*p, *p).expand(snap);
    endpoints
        .query(&query)
        .into_iter()
        .map(|e| (e, (e - p).norm()))
        .filter(|(_, d)| *d <= snap)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(*p, |(e, _)| *e)
}

/// Adds endpoints lying on (or within `snap` of) another segment's
/// interior as split points of that segment.
///
/// The crossing predicate reports neither collinear overlaps nor touches
/// that fall just short of a segment; this pass covers both.
fn add_endpoint_touches(segments: &[Segment], splits: &mut [Vec<Point2>], snap: f64) {
    let items: Vec<(Aabb2, usize)> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_degenerate())
        .map(|(i, s)| (s.bounding_box().expand(snap), i))
        .collect();
    let index = GridIndex::from_items(items);

    for (owner, s) in segments.iter().enumerate() {
        if s.is_degenerate() {
            continue;
        }
        for p in [s.start, s.end] {
            for &target in index.query_point(&p) {
                if target == owner {
                    continue;
                }
                let t = &segments[target];
                if touches_interior(&p, t, snap) {
                    splits[target].push(p);
                }
            }
        }
    }
}

fn touches_interior(p: &Point2, s: &Segment, snap: f64) -> bool {
    if (p - s.start).norm() <= snap || (p - s.end).norm() <= snap {
        return false;
    }
    let t = project_onto_segment(p, &s.start, &s.end);
    t > 0.0 && t < 1.0 && point_to_segment_dist(p, &s.start, &s.end) <= snap
}

/// Removes exact duplicates and orders points by distance from `origin`.
fn sorted_unique(points: Vec<Point2>, origin: &Point2) -> Vec<Point2> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Point2> = points
        .into_iter()
        .filter(|p| seen.insert(PointKey::from(p)))
        .collect();
    unique.sort_by(|a, b| (a - origin).norm_squared().total_cmp(&(b - origin).norm_squared()));
    unique
}

/// Insertion-ordered set of undirected segments.
#[derive(Debug, Default)]
struct SegmentSet {
    keys: HashSet<SegmentKey>,
    segments: Vec<Segment>,
}

impl SegmentSet {
    fn insert(&mut self, segment: Segment) {
        if !segment.is_degenerate() && self.keys.insert(segment.key()) {
            self.segments.push(segment);
        }
    }

    fn len(&self) -> usize {
        self.segments.len()
    }

    fn into_vec(self) -> Vec<Segment> {
        self.segments
    }
}

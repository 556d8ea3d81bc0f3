//! Bentley-Ottmann sweep for segment crossings.
//!
//! The sweep line moves left to right (ties bottom to top). Only segments
//! adjacent in the status are tested against each other, so the work is
//! proportional to the number of segments plus the number of crossings.
//!
//! Known limitation: when three or more segments cross at one point, the
//! swap performed for each reported pair can leave the status momentarily
//! out of order, and some pairs through that point may go unreported.
//! Inputs built from polygon rings plus a few cut lines rarely hit this;
//! the endpoint pass in [`noding`](super::noding) recovers the common case
//! where the shared point is a segment endpoint.

mod events;
mod status;

use std::collections::{HashMap, HashSet};

use crate::geometry::{Segment, SegmentKey};
use crate::math::intersect_2d::true_segment_intersection;
use crate::math::Point2;

use self::events::{Event, EventQueue, FoundCrossing, SweepPosition};
use self::status::SweepStatus;

use super::ArrangementParams;

/// A crossing between two input segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Point2,
    /// Indices into the input slice, smaller first.
    pub segments: [usize; 2],
}

/// Finds every point where two input segments cross or touch in a
/// T-junction.
///
/// Segments sharing an endpoint are not reported, nor are collinear
/// overlaps. Zero-length segments are ignored. Segments with identical
/// geometry are swept once and each original index pair is reported.
#[must_use]
pub fn find_all_intersections(segments: &[Segment], params: &ArrangementParams) -> Vec<Intersection> {
    let (unique, members) = group_identical(segments);

    let mut queue = EventQueue::default();
    for (id, s) in unique.iter().enumerate() {
        queue.push(SweepPosition::of(&s.start), Event::Begin(id));
        queue.push(SweepPosition::of(&s.end), Event::End(id));
    }

    let mut sweep = Sweep {
        segments: &unique,
        status: SweepStatus::new(&unique, params.sweep_epsilon),
        queue,
        recorded: HashSet::new(),
        found: Vec::new(),
    };
    sweep.run();

    let mut out = Vec::new();
    for crossing in &sweep.found {
        for &i in &members[crossing.first] {
            for &j in &members[crossing.second] {
                out.push(Intersection {
                    point: crossing.point,
                    segments: [i.min(j), i.max(j)],
                });
            }
        }
    }
    tracing::trace!(
        segments = segments.len(),
        swept = unique.len(),
        intersections = out.len(),
        "sweep finished"
    );
    out
}

/// Canonicalises segments and merges identical geometry. Returns the
/// distinct segments and, for each, the input indices it stands for.
fn group_identical(segments: &[Segment]) -> (Vec<Segment>, Vec<Vec<usize>>) {
    let mut by_key: HashMap<SegmentKey, usize> = HashMap::new();
    let mut unique = Vec::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    for (i, s) in segments.iter().enumerate() {
        if s.is_degenerate() {
            continue;
        }
        let id = *by_key.entry(s.key()).or_insert_with(|| {
            unique.push(s.canonical());
            members.push(Vec::new());
            unique.len() - 1
        });
        members[id].push(i);
    }
    (unique, members)
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

struct Sweep<'a> {
    segments: &'a [Segment],
    status: SweepStatus<'a>,
    queue: EventQueue,
    recorded: HashSet<(usize, usize)>,
    found: Vec<FoundCrossing>,
}

impl Sweep<'_> {
    fn run(&mut self) {
        while let Some(queued) = self.queue.pop() {
            let position = queued.position;
            match queued.event {
                Event::Begin(id) => self.handle_begin(id, position),
                Event::End(id) => self.handle_end(id, position),
                Event::Intersection(crossing) => self.handle_crossing(crossing, position),
            }
        }
    }

    fn handle_begin(&mut self, id: usize, position: SweepPosition) {
        let idx = self.status.insert(id, position);
        if let Some(below) = self.status.below(idx) {
            self.check_pair(below, id, position);
        }
        if let Some(above) = self.status.above(idx) {
            self.check_pair(id, above, position);
        }
    }

    fn handle_end(&mut self, id: usize, position: SweepPosition) {
        let Some(idx) = self.status.remove(id, position) else {
            return;
        };
        if let (Some(below), Some(above)) = (self.status.below(idx), self.status.get(idx)) {
            self.check_pair(below, above, position);
        }
    }

    fn handle_crossing(&mut self, crossing: FoundCrossing, position: SweepPosition) {
        if !self.recorded.insert(pair_key(crossing.first, crossing.second)) {
            return;
        }
        self.found.push(crossing);

        // Reinsert both at the crossing so they take their order past it.
        self.status.remove(crossing.first, position);
        self.status.remove(crossing.second, position);
        self.status.insert(crossing.first, position);
        self.status.insert(crossing.second, position);

        for (id, partner) in [
            (crossing.first, crossing.second),
            (crossing.second, crossing.first),
        ] {
            let Some(idx) = self.status.locate(id, position) else {
                continue;
            };
            for neighbour in [self.status.below(idx), self.status.above(idx)]
                .into_iter()
                .flatten()
            {
                if neighbour != partner {
                    self.check_pair(id, neighbour, position);
                }
            }
        }
    }

    /// Queues the crossing of `a` and `b`, if any and not yet recorded.
    ///
    /// A crossing found behind the sweep line is queued at the current
    /// position so it is still processed.
    fn check_pair(&mut self, a: usize, b: usize, position: SweepPosition) {
        if a == b || self.recorded.contains(&pair_key(a, b)) {
            return;
        }
        let (sa, sb) = (&self.segments[a], &self.segments[b]);
        if let Some(point) = true_segment_intersection(&sa.start, &sa.end, &sb.start, &sb.end) {
            let at = SweepPosition::of(&point).max(position);
            self.queue.push(
                at,
                Event::Intersection(FoundCrossing {
                    point,
                    first: a,
                    second: b,
                }),
            );
        }
    }
}

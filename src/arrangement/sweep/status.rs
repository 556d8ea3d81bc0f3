use std::cmp::Ordering;

use crate::geometry::Segment;

use super::events::SweepPosition;

/// Segments currently crossing the sweep line, ordered bottom to top.
///
/// The order depends on where the sweep line is, so every operation takes
/// the current [`SweepPosition`] explicitly. Non-vertical segments are
/// compared by their y at `position.x + epsilon`, which puts segments that
/// cross exactly at the sweep line in their post-crossing order. A vertical
/// segment stands for its point at the sweep position's y and sorts above
/// every non-vertical segment passing through that point.
#[derive(Debug)]
pub(crate) struct SweepStatus<'a> {
    segments: &'a [Segment],
    epsilon: f64,
    order: Vec<usize>,
}

impl<'a> SweepStatus<'a> {
    /// `segments` must be canonical (start before end in sweep order).
    pub fn new(segments: &'a [Segment], epsilon: f64) -> Self {
        Self {
            segments,
            epsilon,
            order: Vec::new(),
        }
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.order.get(index).copied()
    }

    /// Compares two segments at the given sweep position.
    pub fn compare(&self, a: usize, b: usize, position: SweepPosition) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let sa = &self.segments[a];
        let sb = &self.segments[b];
        let ord = match (sa.is_vertical(), sb.is_vertical()) {
            (false, false) => {
                let x = position.x + self.epsilon;
                y_at(sa, x)
                    .total_cmp(&y_at(sb, x))
                    .then_with(|| slope(sa).total_cmp(&slope(sb)))
            }
            (true, true) => vertical_y(sa, position).total_cmp(&vertical_y(sb, position)),
            (true, false) => self.vertical_against(sa, sb, position),
            (false, true) => self.vertical_against(sb, sa, position).reverse(),
        };
        ord.then(a.cmp(&b))
    }

    /// Order of vertical segment `v` relative to non-vertical `s`.
    fn vertical_against(&self, v: &Segment, s: &Segment, position: SweepPosition) -> Ordering {
        if y_at(s, position.x) > vertical_y(v, position) + self.epsilon {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Inserts segment `id` and returns its index.
    pub fn insert(&mut self, id: usize, position: SweepPosition) -> usize {
        let idx = self
            .order
            .partition_point(|&probe| self.compare(probe, id, position) == Ordering::Less);
        self.order.insert(idx, id);
        idx
    }

    /// Index of segment `id`, if present.
    ///
    /// Binary search first; falls back to a scan when the stored order no
    /// longer agrees with the comparator, which happens for the two
    /// segments of a crossing right at the crossing point.
    pub fn locate(&self, id: usize, position: SweepPosition) -> Option<usize> {
        match self
            .order
            .binary_search_by(|&probe| self.compare(probe, id, position))
        {
            Ok(idx) => Some(idx),
            Err(_) => self.order.iter().position(|&s| s == id),
        }
    }

    /// Removes segment `id`, returning the index it occupied.
    pub fn remove(&mut self, id: usize, position: SweepPosition) -> Option<usize> {
        let idx = self.locate(id, position)?;
        self.order.remove(idx);
        Some(idx)
    }

    /// Neighbour directly below the entry at `index`.
    pub fn below(&self, index: usize) -> Option<usize> {
        index.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Neighbour directly above the entry at `index`.
    pub fn above(&self, index: usize) -> Option<usize> {
        self.get(index + 1)
    }
}

fn slope(s: &Segment) -> f64 {
    (s.end.y - s.start.y) / (s.end.x - s.start.x)
}

/// y of a non-vertical segment's supporting line at `x`.
fn y_at(s: &Segment, x: f64) -> f64 {
    if x == s.start.x {
        return s.start.y;
    }
    if x == s.end.x {
        return s.end.y;
    }
    s.start.y + (x - s.start.x) * slope(s)
}

/// The point of a vertical segment at the sweep position.
fn vertical_y(v: &Segment, position: SweepPosition) -> f64 {
    position.y.clamp(v.start.y, v.end.y)
}

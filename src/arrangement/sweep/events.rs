use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::math::Point2;

/// Position of the sweep line: the point of the event being processed.
///
/// Events are processed in increasing x, ties broken by increasing y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPosition {
    pub x: f64,
    pub y: f64,
}

impl SweepPosition {
    #[must_use]
    pub fn of(p: &Point2) -> Self {
        Self { x: p.x, y: p.y }
    }

    /// Total sweep order: x first, then y.
    #[must_use]
    pub fn sweep_cmp(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x).then_with(|| self.y.total_cmp(&other.y))
    }

    /// The later of two positions in sweep order.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self.sweep_cmp(&other) == Ordering::Less {
            other
        } else {
            self
        }
    }
}

/// A crossing discovered between two segments of the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FoundCrossing {
    pub point: Point2,
    pub first: usize,
    pub second: usize,
}

/// Sweep events. Segment payloads are indices into the deduplicated
/// segment list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Event {
    Begin(usize),
    End(usize),
    Intersection(FoundCrossing),
}

impl Event {
    /// Processing order of different event kinds at the same position.
    fn rank(&self) -> u8 {
        match self {
            Event::Begin(_) => 0,
            Event::Intersection(_) => 1,
            Event::End(_) => 2,
        }
    }
}

#[derive(Debug)]
pub(crate) struct QueuedEvent {
    pub position: SweepPosition,
    pub event: Event,
    seq: u64,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    // Reversed: `BinaryHeap` is a max-heap and the sweep wants the
    // earliest event first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .position
            .sweep_cmp(&self.position)
            .then_with(|| other.event.rank().cmp(&self.event.rank()))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of sweep events. Events at equal positions and of equal
/// kind come out in insertion order.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<QueuedEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn push(&mut self, position: SweepPosition, event: Event) {
        self.heap.push(QueuedEvent {
            position,
            event,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    pub fn pop(&mut self) -> Option<QueuedEvent> {
        self.heap.pop()
    }
}

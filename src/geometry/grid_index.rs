//! Uniform grid over bounding boxes.
//!
//! Every item is registered in each cell its bounding box touches. A query
//! visits the cells of the query box and returns each candidate once, in
//! insertion order. Candidates only overlap by bounding box; callers run
//! the exact test themselves.

use std::collections::HashMap;

use crate::math::Point2;

use super::Aabb2;

/// Upper bound on cells a single box may occupy before it is kept in the
/// overflow list instead.
const MAX_CELLS_PER_ITEM: i64 = 4096;

/// Grid-bucketed spatial index for items with bounding boxes.
#[derive(Debug, Clone)]
pub struct GridIndex<T> {
    cells: HashMap<(i64, i64), Vec<usize>>,
    oversized: Vec<usize>,
    items: Vec<(Aabb2, T)>,
    cell_size: f64,
}

impl<T> GridIndex<T> {
    /// Creates an empty index with square cells of `cell_size`.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cells: HashMap::new(),
            oversized: Vec::new(),
            items: Vec::new(),
            cell_size,
        }
    }

    /// Builds an index with a cell size derived from the mean box extent.
    #[must_use]
    pub fn from_items(items: Vec<(Aabb2, T)>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let mean_extent = if items.is_empty() {
            1.0
        } else {
            items
                .iter()
                .map(|(b, _)| b.width().max(b.height()))
                .sum::<f64>()
                / items.len() as f64
        };
        let mut index = Self::new(mean_extent);
        for (bbox, item) in items {
            index.insert(bbox, item);
        }
        index
    }

    /// Number of indexed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map a coordinate to its grid cell index.
    #[inline]
    fn cell_coord(&self, v: f64) -> i64 {
        #[allow(clippy::cast_possible_truncation)]
        let c = (v / self.cell_size).floor() as i64;
        c
    }

    fn cell_range(&self, bbox: &Aabb2) -> ((i64, i64), (i64, i64)) {
        (
            (self.cell_coord(bbox.min.x), self.cell_coord(bbox.min.y)),
            (self.cell_coord(bbox.max.x), self.cell_coord(bbox.max.y)),
        )
    }

    /// Inserts an item covering `bbox`.
    pub fn insert(&mut self, bbox: Aabb2, item: T) {
        let idx = self.items.len();
        let ((x0, y0), (x1, y1)) = self.cell_range(&bbox);
        self.items.push((bbox, item));

        if cell_span((x0, y0), (x1, y1)) > MAX_CELLS_PER_ITEM {
            self.oversized.push(idx);
            return;
        }
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                self.cells.entry((cx, cy)).or_default().push(idx);
            }
        }
    }

    /// Returns all items whose bounding box overlaps `bbox`.
    #[must_use]
    pub fn query(&self, bbox: &Aabb2) -> Vec<&T> {
        let ((x0, y0), (x1, y1)) = self.cell_range(bbox);
        let mut hits: Vec<usize> = self.oversized.clone();

        let occupied = i64::try_from(self.cells.len()).unwrap_or(i64::MAX);
        if cell_span((x0, y0), (x1, y1)) > occupied {
            // Cheaper to walk occupied cells than the query range.
            for (&(cx, cy), ids) in &self.cells {
                if (x0..=x1).contains(&cx) && (y0..=y1).contains(&cy) {
                    hits.extend_from_slice(ids);
                }
            }
        } else {
            for cx in x0..=x1 {
                for cy in y0..=y1 {
                    if let Some(ids) = self.cells.get(&(cx, cy)) {
                        hits.extend_from_slice(ids);
                    }
                }
            }
        }

        hits.sort_unstable();
        hits.dedup();
        hits.into_iter()
            .filter(|&i| self.items[i].0.overlaps(bbox))
            .map(|i| &self.items[i].1)
            .collect()
    }

    /// Returns all items whose bounding box contains `point`.
    #[must_use]
    pub fn query_point(&self, point: &Point2) -> Vec<&T> {
        self.query(&Aabb2::from_corners(*point, *point))
    }
}

/// Number of cells in the inclusive range, saturating on overflow.
fn cell_span(lo: (i64, i64), hi: (i64, i64)) -> i64 {
    let w = hi.0.saturating_sub(lo.0).saturating_add(1);
    let h = hi.1.saturating_sub(lo.1).saturating_add(1);
    w.saturating_mul(h)
}

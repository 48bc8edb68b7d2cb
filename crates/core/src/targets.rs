//! TargetGrid - per-column queues of grid rows still waiting to be revealed.
//!
//! Queues are strictly ascending and never contain duplicates. Rows are popped
//! from the front only, so the total number of remaining targets can only go
//! down over a run. The whole grid may be shifted once, before the first pop,
//! to centre the image in the viewport.

use std::collections::{BTreeMap, VecDeque};

/// Column index -> ascending queue of target rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetGrid {
    columns: BTreeMap<i32, VecDeque<i32>>,
    translated: bool,
    consumed: bool,
}

impl TargetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `row` to `column`'s queue.
    ///
    /// Returns false (and stores nothing) unless `row` is strictly greater than
    /// the column's current last row, or once consumption has started.
    pub fn push(&mut self, column: i32, row: i32) -> bool {
        if self.consumed {
            return false;
        }
        let queue = self.columns.entry(column).or_default();
        match queue.back() {
            Some(&last) if row <= last => false,
            _ => {
                queue.push_back(row);
                true
            }
        }
    }

    /// Shift every target by `dx` columns and `dy` rows.
    ///
    /// Allowed once, and only before anything was consumed.
    pub fn translate(&mut self, dx: i32, dy: i32) -> bool {
        if self.translated || self.consumed {
            return false;
        }
        self.translated = true;
        if dx == 0 && dy == 0 {
            return true;
        }
        let old = std::mem::take(&mut self.columns);
        self.columns = old
            .into_iter()
            .map(|(col, rows)| (col + dx, rows.into_iter().map(|r| r + dy).collect()))
            .collect();
        true
    }

    /// Drop every target outside `[0, cols) x [0, rows)` and any column left empty.
    pub fn retain_within(&mut self, cols: i32, rows: i32) {
        self.columns.retain(|&col, queue| {
            if col < 0 || col >= cols {
                return false;
            }
            queue.retain(|&r| r >= 0 && r < rows);
            !queue.is_empty()
        });
    }

    /// Smallest unconsumed row for `column`.
    pub fn next_target(&self, column: i32) -> Option<i32> {
        self.columns.get(&column).and_then(|q| q.front().copied())
    }

    /// Pop the row `next_target` would return.
    pub fn consume(&mut self, column: i32) -> Option<i32> {
        let queue = self.columns.get_mut(&column)?;
        let row = queue.pop_front()?;
        self.consumed = true;
        if queue.is_empty() {
            self.columns.remove(&column);
        }
        Some(row)
    }

    pub fn has_remaining_targets(&self) -> bool {
        self.columns.values().any(|q| !q.is_empty())
    }

    /// Total number of unconsumed targets.
    pub fn remaining(&self) -> usize {
        self.columns.values().map(VecDeque::len).sum()
    }

    /// Number of columns that still hold targets.
    pub fn column_count(&self) -> usize {
        self.columns.values().filter(|q| !q.is_empty()).count()
    }

    /// Remaining rows for `column`, front first.
    pub fn column(&self, column: i32) -> impl Iterator<Item = i32> + '_ {
        self.columns.get(&column).into_iter().flatten().copied()
    }

    /// Columns holding targets, ascending.
    pub fn columns(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns
            .iter()
            .filter(|(_, q)| !q.is_empty())
            .map(|(&c, _)| c)
    }

    /// Every remaining `(column, row)` pair, column-major.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.columns
            .iter()
            .flat_map(|(&c, q)| q.iter().map(move |&r| (c, r)))
    }
}

/// Whole-cell offset that moves an image's centre onto the viewport's centre.
///
/// Both sizes are in pixels. Each axis is `round((viewport / 2 - image / 2) / cell_size)`;
/// anything finer than one cell is dropped.
pub fn centering_offset(
    viewport_px: (u32, u32),
    image_px: (u32, u32),
    cell_size: u32,
) -> (i32, i32) {
    let cell = cell_size.max(1) as f64;
    let axis = |view: u32, img: u32| {
        let delta = (view / 2) as f64 - (img / 2) as f64;
        (delta / cell).round() as i32
    };
    (axis(viewport_px.0, image_px.0), axis(viewport_px.1, image_px.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cols: &[(i32, &[i32])]) -> TargetGrid {
        let mut g = TargetGrid::new();
        for &(c, rows) in cols {
            for &r in rows {
                g.push(c, r);
            }
        }
        g
    }

    #[test]
    fn push_rejects_duplicates_and_descending_rows() {
        let mut g = TargetGrid::new();
        assert!(g.push(0, 1));
        assert!(!g.push(0, 1));
        assert!(!g.push(0, 0));
        assert!(g.push(0, 4));
        assert_eq!(g.column(0).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn consume_is_fifo_and_strictly_increasing() {
        let mut g = grid(&[(2, &[0, 3, 5, 9])]);
        let mut last = None;
        while let Some(peek) = g.next_target(2) {
            let popped = g.consume(2).unwrap();
            assert_eq!(peek, popped);
            if let Some(prev) = last {
                assert!(popped > prev);
            }
            last = Some(popped);
        }
        assert_eq!(last, Some(9));
        assert!(!g.has_remaining_targets());
        assert_eq!(g.consume(2), None);
    }

    #[test]
    fn translate_shifts_columns_and_rows() {
        let mut g = grid(&[(0, &[0, 2]), (3, &[1])]);
        assert!(g.translate(2, -1));
        assert_eq!(g.column(2).collect::<Vec<_>>(), vec![-1, 1]);
        assert_eq!(g.column(5).collect::<Vec<_>>(), vec![0]);
        assert_eq!(g.next_target(0), None);
    }

    #[test]
    fn translate_only_once_and_before_consumption() {
        let mut g = grid(&[(0, &[0, 1])]);
        assert!(g.translate(0, 0));
        assert!(!g.translate(1, 1));

        let mut g = grid(&[(0, &[0, 1])]);
        g.consume(0);
        assert!(!g.translate(1, 1));
        assert_eq!(g.next_target(0), Some(1));
    }

    #[test]
    fn push_after_consumption_is_rejected() {
        let mut g = grid(&[(0, &[0, 1])]);
        g.consume(0);
        assert!(!g.push(0, 7));
    }

    #[test]
    fn retain_within_clips_and_drops_empty_columns() {
        let mut g = grid(&[(-1, &[0]), (0, &[-2, 0, 4, 5]), (1, &[9]), (4, &[0])]);
        g.retain_within(4, 5);
        assert_eq!(g.columns().collect::<Vec<_>>(), vec![0]);
        assert_eq!(g.column(0).collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(g.remaining(), 2);
    }

    #[test]
    fn remaining_counts_across_columns() {
        let g = grid(&[(0, &[0, 1]), (5, &[2])]);
        assert_eq!(g.remaining(), 3);
        assert_eq!(g.column_count(), 2);
        assert_eq!(g.iter().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (5, 2)]);
    }

    #[test]
    fn centering_offset_rounds_to_whole_cells() {
        // Viewport 80 px, image 20 px, cell 8: (40 - 10) / 8 = 3.75 -> 4.
        assert_eq!(centering_offset((80, 80), (20, 20), 8), (4, 4));
        // Image larger than the viewport moves up/left.
        assert_eq!(centering_offset((16, 16), (48, 32), 8), (-2, -1));
        assert_eq!(centering_offset((10, 10), (10, 10), 4), (0, 0));
    }
}

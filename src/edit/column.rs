//! Sparse columns of the edit-distance matrix.

use smallvec::{smallvec, SmallVec};

/// One column of a Levenshtein dynamic-programming matrix, restricted to
/// the contiguous run of cells whose value is within the search bound.
///
/// Rows are −1-based: row −1 is the empty-prefix row, row `r ≥ 0`
/// corresponds to the pattern element at index `r`. Every row outside the
/// materialized run implicitly holds +∞.
///
/// Columns are immutable once built; [`EditColumn::create_next`] derives
/// the column for the following target element, returning `None` when no
/// cell survives the bound. That `None` is the caller's signal to stop,
/// or, in tree search, to prune the subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct EditColumn {
    start_row: isize,
    cells: SmallVec<[f64; 16]>,
}

impl EditColumn {
    /// The initial column (column index −1): values `0, 1, …` down the
    /// first rows, cut off at `max_distance` and the pattern length.
    pub fn initial(pattern_len: usize, max_distance: f64) -> Self {
        Self::initial_banded(pattern_len, max_distance, usize::MAX)
    }

    /// The initial column additionally truncated to `diagonal_margin`
    /// cells below the main diagonal.
    pub fn initial_banded(pattern_len: usize, max_distance: f64, diagonal_margin: usize) -> Self {
        if max_distance < 0.0 {
            return Self::empty();
        }
        let bound = if max_distance.is_finite() {
            max_distance.floor() as usize
        } else {
            usize::MAX
        };
        let last = bound.min(pattern_len).min(diagonal_margin);
        let mut cells = SmallVec::with_capacity(last + 1);
        for value in 0..=last {
            cells.push(value as f64);
        }
        Self {
            start_row: -1,
            cells,
        }
    }

    /// A column with no cells. Used by matrix construction to pad columns
    /// past the point where the band died out.
    pub fn empty() -> Self {
        Self {
            start_row: -1,
            cells: SmallVec::new(),
        }
    }

    /// First materialized row.
    #[inline]
    pub fn start_row(&self) -> isize {
        self.start_row
    }

    /// Number of materialized cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column holds no cell at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `row`, or +∞ outside the materialized run.
    #[inline]
    pub fn get(&self, row: isize) -> f64 {
        let index = row - self.start_row;
        if index < 0 || index >= self.cells.len() as isize {
            f64::INFINITY
        } else {
            self.cells[index as usize]
        }
    }

    /// Derive the column for the next target element without a diagonal
    /// band. Returns `None` when every cell would exceed `max_distance`.
    pub fn create_next<C, F>(
        &self,
        row_word: &[C],
        max_distance: f64,
        distance_fn: &F,
        next_char: &C,
    ) -> Option<EditColumn>
    where
        F: Fn(&C, &C) -> f64,
    {
        self.next_within(row_word, max_distance, None, distance_fn, next_char)
    }

    /// Derive the column for the next target element, keeping only cells
    /// within `diagonal_margin` of the main diagonal. `column_index` is the
    /// 0-based index of `next_char` in the target.
    pub fn create_next_banded<C, F>(
        &self,
        row_word: &[C],
        max_distance: f64,
        column_index: isize,
        diagonal_margin: usize,
        distance_fn: &F,
        next_char: &C,
    ) -> Option<EditColumn>
    where
        F: Fn(&C, &C) -> f64,
    {
        self.next_within(
            row_word,
            max_distance,
            Some((column_index, diagonal_margin)),
            distance_fn,
            next_char,
        )
    }

    fn next_within<C, F>(
        &self,
        row_word: &[C],
        max_distance: f64,
        band: Option<(isize, usize)>,
        distance_fn: &F,
        next_char: &C,
    ) -> Option<EditColumn>
    where
        F: Fn(&C, &C) -> f64,
    {
        let pattern_last = row_word.len() as isize - 1;
        // A new cell can appear at most one row below the current run.
        let mut low = self.start_row;
        let mut high = (self.start_row + self.cells.len() as isize).min(pattern_last);
        if let Some((column_index, margin)) = band {
            let margin = margin.min(isize::MAX as usize / 2) as isize;
            low = low.max(column_index - margin);
            high = high.min(column_index + margin);
        }

        let mut next: Option<EditColumn> = None;
        let mut row = low;
        while row <= high {
            let mut value = self.get(row) + 1.0;
            if row >= 0 {
                let replace = self.get(row - 1) + distance_fn(&row_word[row as usize], next_char);
                if replace < value {
                    value = replace;
                }
            }
            if let Some(column) = &next {
                let delete = column.get(row - 1) + 1.0;
                if delete < value {
                    value = delete;
                }
            }
            if value <= max_distance {
                match &mut next {
                    None => {
                        next = Some(EditColumn {
                            start_row: row,
                            cells: smallvec![value],
                        })
                    }
                    Some(column) => column.cells.push(value),
                }
            } else if next.is_some() {
                // The run is contiguous; once it ends, the column ends.
                break;
            }
            row += 1;
        }
        next
    }
}

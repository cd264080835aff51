//! Logical grid reconstruction
//!
//! Rebuilds the two-dimensional view of a table section from its
//! colspan-expanded rows, propagating rowspans downward.

use crate::cell::{CellHandle, CellPool};

/// Logical table grid over a shared cell pool
///
/// Rows need not be globally rectangular; only a header block is required
/// to be rectangular, and only to enable column association.
#[derive(Debug, Default)]
pub struct Matrix {
    rows: Vec<Vec<Option<CellHandle>>>,
}

impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Slots of row `r`
    pub fn row(&self, r: usize) -> &[Option<CellHandle>] {
        &self.rows[r]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<CellHandle>]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Column count of the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    fn ensure_rows(&mut self, count: usize) {
        while self.rows.len() < count {
            self.rows.push(Vec::new());
        }
    }

    /// First unoccupied column of row `r` at or after `from`
    fn first_free(&self, r: usize, from: usize) -> usize {
        let row = &self.rows[r];
        let mut col = from;
        while col < row.len() && row[col].is_some() {
            col += 1;
        }
        col
    }

    fn set(&mut self, r: usize, col: usize, handle: CellHandle) {
        let row = &mut self.rows[r];
        if row.len() <= col {
            row.resize(col + 1, None);
        }
        row[col] = Some(handle);
    }
}

/// Build the logical matrix for one table section.
///
/// Rows are placed top to bottom. Each incoming cell lands on the first
/// free column at or after its natural cursor position (first-fit,
/// left-to-right; slots claimed by an earlier rowspan are skipped, never
/// overwritten). A cell with effective `rowspan = r` is then written into
/// the same column of the next `r - 1` rows, allocating rows the section
/// does not yet have. Propagation targets are claimed before later rows
/// place their own cells, so they are always free.
pub fn build_matrix(expanded_rows: &[Vec<CellHandle>], pool: &CellPool) -> Matrix {
    let mut matrix = Matrix::new();
    matrix.ensure_rows(expanded_rows.len());

    for (r, row) in expanded_rows.iter().enumerate() {
        let mut cursor = 0usize;
        for &handle in row {
            let col = matrix.first_free(r, cursor);
            matrix.set(r, col, handle);
            cursor = col + 1;

            let rowspan = pool.get(handle).rowspan as usize;
            for extra in 1..rowspan {
                matrix.ensure_rows(r + extra + 1);
                matrix.set(r + extra, col, handle);
            }
        }
    }

    matrix
}

/// Check that a header matrix is non-empty and rectangular.
///
/// Invalid headers disable column association for the whole table; row
/// association is unaffected.
pub fn header_is_valid(header: &Matrix) -> bool {
    let mut rows = header.rows();
    let Some(first) = rows.next() else {
        return false;
    };
    let width = first.len();
    width > 0 && rows.all(|row| row.len() == width)
}

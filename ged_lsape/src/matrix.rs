//! The LSAPE master problem matrix.
//!
//! A [`CostMatrix`] for a pair `(g, h)` has one row per node of `g` plus a
//! dustbin row, and one column per node of `h` plus a dustbin column. The
//! substitution block holds approximate substitution costs, the dustbin
//! column deletion costs, the dustbin row insertion costs. A matrix is built
//! fresh per pair, consumed once by the solver and discarded.

use contracts::*;

/// Dense row-major matrix of non-negative reals with dustbin row/column.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    /// Total row count, including the dustbin row.
    num_rows: usize,
    /// Total column count, including the dustbin column.
    num_cols: usize,
    /// Row-major cell storage.
    data: Vec<f64>,
}

impl CostMatrix {
    /// Creates a zero-filled matrix for a pair with `num_source` and
    /// `num_target` nodes. The dustbin row/column are added internally.
    #[must_use]
    #[ensures(ret.num_rows() == num_source + 1)]
    #[ensures(ret.num_cols() == num_target + 1)]
    pub fn for_pair(num_source: usize, num_target: usize) -> Self {
        let num_rows = num_source + 1;
        let num_cols = num_target + 1;
        Self {
            num_rows,
            num_cols,
            data: vec![0.0; num_rows * num_cols],
        }
    }

    /// Total row count, including the dustbin row.
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Total column count, including the dustbin column.
    #[must_use]
    pub const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Index of the dustbin row.
    #[must_use]
    pub const fn dustbin_row(&self) -> usize {
        self.num_rows - 1
    }

    /// Index of the dustbin column.
    #[must_use]
    pub const fn dustbin_col(&self) -> usize {
        self.num_cols - 1
    }

    /// Reads a cell.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.num_rows && col < self.num_cols);
        self.data[row * self.num_cols + col]
    }

    /// Writes a cell.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.num_rows && col < self.num_cols);
        self.data[row * self.num_cols + col] = value;
    }

    /// Returns the transposed matrix. The dustbin row/column swap roles, so
    /// the transpose describes the reversed pair `(h, g)`.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self {
            num_rows: self.num_cols,
            num_cols: self.num_rows,
            data: vec![0.0; self.data.len()],
        };
        for row in 0..self.num_rows {
            for col in 0..self.num_cols {
                out.set(col, row, self.get(row, col));
            }
        }
        out
    }

    /// Sum of all cells, used for scaling the forbidden value in the solver.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

//! Exact solver for the linear sum assignment problem with error-correction.
//!
//! The LSAPE instance described by a [`CostMatrix`] is reduced to a square
//! `(n + m) x (n + m)` linear sum assignment problem through the standard
//! dustbin expansion: each source row gets a private deletion column, each
//! target column a private insertion row, and dustbin-to-dustbin cells are
//! free. The square problem is solved with the Jonker-Volgenant shortest
//! augmenting path algorithm, which is exact and deterministic for a given
//! matrix.

use tracing::debug;

use crate::matrix::CostMatrix;

/// Sentinel for "no row assigned" inside the augmenting path search.
const UNASSIGNED: usize = usize::MAX;

/// An optimal error-correcting assignment and its cost.
#[derive(Clone, Debug, PartialEq)]
pub struct LsapeSolution {
    /// Per source row: the assigned target column, `None` for the dustbin.
    pub row_to_col: Vec<Option<usize>>,
    /// Per target column: the assigned source row, `None` for the dustbin.
    pub col_to_row: Vec<Option<usize>>,
    /// Total cost of the assignment under the input matrix.
    pub cost: f64,
}

/// Minimum-cost error-correcting assignment solver.
pub struct LsapeSolver;

impl LsapeSolver {
    /// Solves the LSAPE instance to optimality.
    ///
    /// The matrix is consumed read-only; the returned assignment covers
    /// every real row and column, with `None` marking assignment to the
    /// dustbin (deletion/insertion).
    #[must_use]
    pub fn solve(matrix: &CostMatrix) -> LsapeSolution {
        let num_rows = matrix.dustbin_row();
        let num_cols = matrix.dustbin_col();
        let dim = num_rows + num_cols;

        if dim == 0 {
            return LsapeSolution {
                row_to_col: Vec::new(),
                col_to_row: Vec::new(),
                cost: 0.0,
            };
        }

        let expanded = Self::expand(matrix, num_rows, num_cols);
        let assigned_row = Self::solve_square(&expanded, dim);

        let mut row_to_col = vec![None; num_rows];
        let mut col_to_row = vec![None; num_cols];
        for (col, &row) in assigned_row.iter().take(dim).enumerate() {
            if row < num_rows && col < num_cols {
                row_to_col[row] = Some(col);
                col_to_row[col] = Some(row);
            }
        }

        // Recompute the cost from the original matrix so the forbidden
        // padding values never leak into the reported optimum.
        let mut cost = 0.0;
        for (row, assignment) in row_to_col.iter().enumerate() {
            cost += match assignment {
                Some(col) => matrix.get(row, *col),
                None => matrix.get(row, matrix.dustbin_col()),
            };
        }
        for (col, assignment) in col_to_row.iter().enumerate() {
            if assignment.is_none() {
                cost += matrix.get(matrix.dustbin_row(), col);
            }
        }

        debug!(
            "lsape solved: {}x{} instance, optimum {}",
            num_rows, num_cols, cost
        );

        LsapeSolution {
            row_to_col,
            col_to_row,
            cost,
        }
    }

    /// Builds the square expansion of the LSAPE instance.
    fn expand(matrix: &CostMatrix, num_rows: usize, num_cols: usize) -> Vec<f64> {
        let dim = num_rows + num_cols;
        // Strictly dearer than any assignment made of real cells, so the
        // optimum never selects a padding cell.
        let forbidden = matrix.total() + 1.0;

        let mut expanded = vec![0.0; dim * dim];
        for i in 0..dim {
            for j in 0..dim {
                expanded[i * dim + j] = match (i < num_rows, j < num_cols) {
                    (true, true) => matrix.get(i, j),
                    (true, false) => {
                        if j - num_cols == i {
                            matrix.get(i, matrix.dustbin_col())
                        } else {
                            forbidden
                        }
                    }
                    (false, true) => {
                        if i - num_rows == j {
                            matrix.get(matrix.dustbin_row(), j)
                        } else {
                            forbidden
                        }
                    }
                    (false, false) => 0.0,
                };
            }
        }
        expanded
    }

    /// Jonker-Volgenant shortest augmenting path on a dense square matrix.
    ///
    /// Returns, per column, the assigned row. Column `dim` is a virtual
    /// column used as the root of each augmenting path.
    fn solve_square(costs: &[f64], dim: usize) -> Vec<usize> {
        let mut potential_row = vec![0.0; dim];
        let mut potential_col = vec![0.0; dim + 1];
        let mut assigned_row = vec![UNASSIGNED; dim + 1];

        for row in 0..dim {
            assigned_row[dim] = row;
            let mut current_col = dim;
            let mut min_reduced = vec![f64::INFINITY; dim];
            let mut parent_col = vec![dim; dim];
            let mut visited = vec![false; dim + 1];

            // Dijkstra-style search for the cheapest augmenting path.
            loop {
                visited[current_col] = true;
                let pivot_row = assigned_row[current_col];
                let mut delta = f64::INFINITY;
                let mut next_col = dim;

                for col in 0..dim {
                    if visited[col] {
                        continue;
                    }
                    let reduced =
                        costs[pivot_row * dim + col] - potential_row[pivot_row] - potential_col[col];
                    if reduced < min_reduced[col] {
                        min_reduced[col] = reduced;
                        parent_col[col] = current_col;
                    }
                    if min_reduced[col] < delta {
                        delta = min_reduced[col];
                        next_col = col;
                    }
                }

                for col in 0..dim {
                    if visited[col] {
                        potential_row[assigned_row[col]] += delta;
                        potential_col[col] -= delta;
                    } else {
                        min_reduced[col] -= delta;
                    }
                }
                potential_row[assigned_row[dim]] += delta;
                potential_col[dim] -= delta;

                current_col = next_col;
                if assigned_row[current_col] == UNASSIGNED {
                    break;
                }
            }

            // Walk the path back to the virtual root, flipping assignments.
            loop {
                let previous_col = parent_col[current_col];
                assigned_row[current_col] = assigned_row[previous_col];
                current_col = previous_col;
                if current_col == dim {
                    break;
                }
            }
        }

        assigned_row
    }
}

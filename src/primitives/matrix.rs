//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{CosechaError, Result};
use serde::{Deserialize, Serialize};

/// Pivot tolerance for Gauss–Jordan elimination. Entries with absolute value
/// below this are treated as zero when selecting pivots. Fixed, not
/// configurable.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// A 2D matrix of floating-point values (row-major storage).
///
/// # Examples
///
/// ```
/// use cosecha::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a flat row-major vector.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(CosechaError::shape_mismatch(
                "data length rows*cols",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a Vector.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        let end = start + self.cols;
        Vector::from_slice(&self.data[start..end])
    }

    /// Returns a column as a Vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vector<T> {
        let data: Vec<T> = (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect();
        Vector::from_vec(data)
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn eye(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            data,
            rows: n,
            cols: n,
        }
    }

    /// Creates a matrix from a slice of rows.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the slice is empty or the rows are ragged.
    /// Row-major flat storage makes ragged shapes unrepresentable afterwards.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_rows = rows.len();
        if n_rows == 0 {
            return Err(CosechaError::ShapeMismatch {
                expected: "at least one row".to_string(),
                actual: "0 rows".to_string(),
            });
        }
        let n_cols = rows[0].len();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(CosechaError::shape_mismatch("row length", n_cols, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-matrix multiplication.
    ///
    /// Dense triple-nested accumulation; the data here is always small.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != other.rows`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(CosechaError::dimension_mismatch(
                &format!("{}x{} * {}xN", self.rows, self.cols, self.cols),
                &format!("{}x{} * {}x{}", self.rows, self.cols, other.rows, other.cols),
            ));
        }

        let mut result = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                result[i * other.cols + j] = sum;
            }
        }

        Ok(Self {
            data: result,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != vec.len()`.
    pub fn matvec(&self, vec: &Vector<f64>) -> Result<Vector<f64>> {
        if self.cols != vec.len() {
            return Err(CosechaError::dimension_mismatch(
                &format!("vector of length {}", self.cols),
                &format!("length {}", vec.len()),
            ));
        }

        let result: Vec<f64> = (0..self.rows)
            .map(|i| {
                let row = self.row(i);
                row.dot(vec)
            })
            .collect();

        Ok(Vector::from_vec(result))
    }

    /// Adds a constant to every diagonal entry.
    ///
    /// Used for ridge regularization of Gram matrices.
    pub fn add_to_diagonal(&mut self, value: f64) {
        debug_assert_eq!(self.rows, self.cols, "diagonal shift requires a square matrix");
        let n = self.rows.min(self.cols);
        for i in 0..n {
            self.data[i * self.cols + i] += value;
        }
    }

    /// Computes the inverse via Gauss–Jordan elimination with an augmented
    /// identity matrix.
    ///
    /// Partial pivoting swaps in the FIRST row below with a workable entry
    /// when the diagonal pivot falls under [`PIVOT_EPSILON`]. The swap exists
    /// to avoid dividing by a near-zero pivot; it does not select the
    /// largest-magnitude candidate.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for a non-square matrix and `SingularMatrix`
    /// when no adequate pivot exists for some column.
    pub fn inverse(&self) -> Result<Self> {
        if self.rows != self.cols {
            return Err(CosechaError::ShapeMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }

        let n = self.rows;
        let width = 2 * n;

        // Augmented [M | I], row-major with stride 2n.
        let mut aug = vec![0.0; n * width];
        for i in 0..n {
            for j in 0..n {
                aug[i * width + j] = self.get(i, j);
            }
            aug[i * width + n + i] = 1.0;
        }

        for i in 0..n {
            if aug[i * width + i].abs() < PIVOT_EPSILON {
                for j in (i + 1)..n {
                    if aug[j * width + i].abs() > PIVOT_EPSILON {
                        for col in 0..width {
                            aug.swap(i * width + col, j * width + col);
                        }
                        break;
                    }
                }
            }

            let pivot = aug[i * width + i];
            if pivot.abs() < PIVOT_EPSILON {
                return Err(CosechaError::SingularMatrix { column: i });
            }

            for col in 0..width {
                aug[i * width + col] /= pivot;
            }

            for k in 0..n {
                if k == i {
                    continue;
                }
                let factor = aug[k * width + i];
                for col in 0..width {
                    aug[k * width + col] -= factor * aug[i * width + col];
                }
            }
        }

        // Right half of the augmented matrix is the inverse.
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = aug[i * width + n + j];
            }
        }

        Ok(Self {
            data,
            rows: n,
            cols: n,
        })
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;

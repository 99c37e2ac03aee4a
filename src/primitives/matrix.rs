//! Row-major feature matrix.

use super::Vector;

/// A dense row-major matrix.
///
/// Each row is one sample; each column is one feature. The protected
/// attribute used for fairness scoring is addressed as a column index.
///
/// # Examples
///
/// ```
/// use sesgo::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m.get(1, 0), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f32> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, &'static str> {
        if data.len() != rows * cols {
            return Err("Data length must equal rows * cols");
        }
        Ok(Self { rows, cols, data })
    }

    /// Returns (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of rows (samples).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (features).
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns the element at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.rows && col < self.cols, "Index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Copies a single column into a vector.
    ///
    /// # Panics
    ///
    /// Panics if `col_idx` is out of bounds.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vector<T> {
        assert!(col_idx < self.cols, "Column index out of bounds");
        Vector::from_vec(
            (0..self.rows)
                .map(|r| self.data[r * self.cols + col_idx])
                .collect(),
        )
    }

    /// Borrows the row-major backing slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Copies the rows at `indices` into a new matrix, preserving order.
    ///
    /// Used to slice train/validation partitions out of the full feature
    /// table.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &idx in indices {
            assert!(idx < self.rows, "Row index out of bounds");
            data.extend_from_slice(&self.data[idx * self.cols..(idx + 1) * self.cols]);
        }
        Self {
            rows: indices.len(),
            cols: self.cols,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_shape() {
        let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("matrix");
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_cols(), 3);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let result = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_row_major() {
        let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0]).expect("matrix");
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 3.0);
    }

    #[test]
    fn test_column_extraction() {
        let m = Matrix::from_vec(3, 2, vec![1.0_f32, 10.0, 2.0, 20.0, 3.0, 30.0]).expect("matrix");
        assert_eq!(m.column(1).as_slice(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_take_rows_order_preserved() {
        let m = Matrix::from_vec(3, 2, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("matrix");
        let sub = m.take_rows(&[2, 0]);
        assert_eq!(sub.shape(), (2, 2));
        assert_eq!(sub.as_slice(), &[5.0, 6.0, 1.0, 2.0]);
    }

    #[test]
    fn test_take_rows_empty() {
        let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0]).expect("matrix");
        let sub = m.take_rows(&[]);
        assert_eq!(sub.shape(), (0, 2));
    }
}

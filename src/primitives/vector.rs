//! Dense one-dimensional container for labels and column values.

use std::ops::Index;

/// A dense vector of `f32` values.
///
/// Used for label sequences, per-fold predictions, and single columns
/// extracted from a [`Matrix`](crate::primitives::Matrix).
///
/// # Examples
///
/// ```
/// use sesgo::primitives::Vector;
///
/// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(v.len(), 3);
/// assert!((v.mean() - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T = f32> {
    data: Vec<T>,
}

impl<T: Copy> Vector<T> {
    /// Creates a vector from an owned `Vec`.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Creates a vector by copying a slice.
    #[must_use]
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrows the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Copies the elements at `indices` into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            data: indices.iter().map(|&i| self.data[i]).collect(),
        }
    }
}

impl Vector<f32> {
    /// Arithmetic mean of the elements; 0.0 for an empty vector.
    #[must_use]
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_and_len() {
        let v = Vector::from_slice(&[1.0_f32, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        assert!(!v.is_empty());
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mean() {
        let v = Vector::from_slice(&[2.0_f32, 4.0, 6.0]);
        assert!((v.mean() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        let v: Vector<f32> = Vector::from_vec(vec![]);
        assert_eq!(v.mean(), 0.0);
    }

    #[test]
    fn test_take_subset() {
        let v = Vector::from_slice(&[10.0_f32, 20.0, 30.0, 40.0]);
        let sub = v.take(&[3, 0]);
        assert_eq!(sub.as_slice(), &[40.0, 10.0]);
    }

    #[test]
    fn test_index() {
        let v = Vector::from_slice(&[5.0_f32, 7.0]);
        assert_eq!(v[1], 7.0);
    }
}

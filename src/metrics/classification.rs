//! Classification metrics for evaluating classifier performance.

use crate::primitives::Vector;

/// Compute classification accuracy.
///
/// accuracy = `exact_label_matches` / `total_predictions`
///
/// Labels are compared for exact equality; class labels are expected to be
/// integral codes stored as `f32`.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use sesgo::metrics::accuracy;
/// use sesgo::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[0.0, 1.0, 1.0, 0.0]);
/// let y_pred = Vector::from_slice(&[0.0, 1.0, 0.0, 0.0]);
/// assert!((accuracy(&y_pred, &y_true) - 0.75).abs() < 1e-6);
/// ```
#[must_use]
pub fn accuracy(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(
        y_pred.len(),
        y_true.len(),
        "Vectors must have same length"
    );
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f32 / y_true.len() as f32
}

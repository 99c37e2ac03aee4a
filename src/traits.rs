//! Core traits for tunable classification estimators.
//!
//! These traits define the capability set the search engine requires from
//! an externally supplied estimator.

use crate::automl::Configuration;
use crate::error::Result;
use crate::primitives::{Matrix, Vector};

/// Primary trait for supervised classification estimators.
///
/// Estimators implement fit/predict following sklearn conventions. `fit`
/// must fully re-derive fitted state from its inputs: the engine clones
/// one prototype estimator per fold, and a clone carrying stale fitted
/// state into another fold would cross-contaminate results.
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, degenerate
    /// input, etc.).
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()>;

    /// Predicts class labels for input data, aligned row-wise with `x`.
    fn predict(&self, x: &Matrix<f32>) -> Vector<f32>;
}

/// An estimator whose hyperparameters can be assigned from a grid
/// [`Configuration`].
///
/// `Clone` supplies the independent-copy capability: each evaluation unit
/// owns its own copy, and copies never share mutable state.
pub trait Tunable: Estimator + Clone {
    /// Applies one configuration's hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`SesgoError::InvalidHyperparameter`](crate::error::SesgoError)
    /// for unknown parameter names or out-of-range values.
    fn set_params(&mut self, config: &Configuration) -> Result<()>;
}

//! Sesgo: bias-aware hyperparameter search for classifiers in pure Rust.
//!
//! Sesgo scans a hyperparameter grid with stratified cross-validation,
//! scoring every configuration on accuracy and on a group-fairness metric
//! at the same time. Four selection policies then turn the scored grid
//! into a fitted model: chase accuracy, chase fairness, or trade one for
//! the other under an explicit accuracy margin.
//!
//! # Quick Start
//!
//! ```no_run
//! use sesgo::prelude::*;
//! # #[derive(Clone)] struct MyClassifier;
//! # impl Estimator for MyClassifier {
//! #     fn fit(&mut self, _: &Matrix<f32>, _: &Vector<f32>) -> sesgo::error::Result<()> { Ok(()) }
//! #     fn predict(&self, x: &Matrix<f32>) -> Vector<f32> { Vector::from_vec(vec![0.0; x.n_rows()]) }
//! # }
//! # impl Tunable for MyClassifier {
//! #     fn set_params(&mut self, _: &Configuration) -> sesgo::error::Result<()> { Ok(()) }
//! # }
//! # let (x, y) = (Matrix::from_vec(0, 3, vec![]).unwrap(), Vector::from_vec(vec![]));
//!
//! let grid = ParamGrid::new()
//!     .add("max_depth", [2, 4, 8])
//!     .add("min_samples", [1, 5]);
//!
//! // Protected attribute lives in feature column 2; group 0.0 is
//! // privileged, outcome 1.0 is favorable.
//! let groups = GroupSpec::new(2, 0.0, 1.0, 1.0);
//!
//! let mut search = BiasAwareGridSearch::new(MyClassifier, grid, groups)
//!     .with_n_splits(5)
//!     .with_random_state(42);
//! search.fit(&x, &y, statistical_parity_difference)?;
//!
//! // Most accurate model within 5 points of the best, least biased.
//! let model = search.select_within_margin(0.05)?;
//! # Ok::<(), sesgo::error::SesgoError>(())
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: DataFrame for named columns
//! - [`model_selection`]: Stratified K-fold splitting
//! - [`metrics`]: Accuracy and group-fairness metrics
//! - [`automl`]: Parameter grids and the bias-aware search engine

pub mod automl;
pub mod data;
pub mod error;
pub mod metrics;
pub mod model_selection;
pub mod prelude;
pub mod primitives;
pub mod traits;

pub use error::{Result, SesgoError};
pub use primitives::{Matrix, Vector};
pub use traits::{Estimator, Tunable};

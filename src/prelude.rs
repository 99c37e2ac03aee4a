//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sesgo::prelude::*;
//! ```

pub use crate::automl::{BiasAwareGridSearch, Configuration, GroupSpec, ParamGrid, ParamValue, SearchRecord};
pub use crate::data::DataFrame;
pub use crate::metrics::{accuracy, disparate_impact, statistical_parity_difference, BiasMetric};
pub use crate::model_selection::StratifiedKFold;
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::{Estimator, Tunable};

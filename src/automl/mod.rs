//! Hyperparameter search: parameter grids and the bias-aware tuner.

pub mod grid;
pub mod tuner;

pub use grid::{Configuration, ParamGrid, ParamValue};
pub use tuner::{BiasAwareGridSearch, GroupSpec, SearchRecord};

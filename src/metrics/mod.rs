//! Evaluation metrics: classification accuracy and fairness scores.

pub mod classification;
pub mod fairness;

pub use classification::accuracy;
pub use fairness::{disparate_impact, statistical_parity_difference, BiasMetric};

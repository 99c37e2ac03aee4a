//! Group fairness metrics over an evaluation table.
//!
//! A bias metric scores one evaluation table: the proportion of favorable
//! outcomes in the unprivileged subgroup compared against the privileged
//! subgroup. Both reference metrics tolerate a table in which a subgroup is
//! entirely absent by reporting a degenerate IEEE value (NaN or infinity)
//! instead of failing; callers filtering small validation folds must guard
//! against these.

use crate::data::DataFrame;
use crate::error::Result;

/// Pluggable bias-metric function contract.
///
/// Arguments, in order: the evaluation table, the predicted-outcome column
/// name, the protected-attribute column name, the privileged group value,
/// the unprivileged group value, and the favorable outcome value.
///
/// Implementations must not mutate the table. A degenerate subgroup (zero
/// members) is reported as a NaN/infinite score, not an error; `Err` is
/// reserved for genuine failures such as a missing column.
pub type BiasMetric = fn(&DataFrame, &str, &str, f32, f32, f32) -> Result<f32>;

/// Empirical favorable-outcome rate within one protected subgroup.
///
/// Returns NaN when the subgroup has no members (0/0 division).
fn favorable_rate(
    frame: &DataFrame,
    outcome_column: &str,
    protected_column: &str,
    group_value: f32,
    favorable: f32,
) -> Result<f32> {
    let outcome = frame.column(outcome_column)?;
    let protected = frame.column(protected_column)?;

    let mut members = 0usize;
    let mut favorable_count = 0usize;
    for (out, prot) in outcome.iter().zip(protected.iter()) {
        if *prot == group_value {
            members += 1;
            if *out == favorable {
                favorable_count += 1;
            }
        }
    }

    Ok(favorable_count as f32 / members as f32)
}

/// Disparate impact expressed as a fairness deficit.
///
/// `1 − (P(favorable | unprivileged) / P(favorable | privileged))`, where
/// each conditional probability is the empirical favorable-outcome
/// proportion within the subgroup. Returns 0 at perfect parity, positive
/// values when the unprivileged group receives the favorable outcome less
/// often, and a degenerate NaN/infinite value when a subgroup is empty or
/// the privileged rate is zero.
///
/// # Errors
///
/// Returns an error if a named column is missing from the table.
///
/// # Examples
///
/// ```
/// use sesgo::data::DataFrame;
/// use sesgo::metrics::disparate_impact;
/// use sesgo::primitives::Vector;
///
/// let frame = DataFrame::new(vec![
///     ("pred".to_string(), Vector::from_slice(&[1.0, 1.0, 1.0, 0.0])),
///     ("group".to_string(), Vector::from_slice(&[0.0, 0.0, 1.0, 1.0])),
/// ]).unwrap();
/// // privileged rate 1.0, unprivileged rate 0.5
/// let di = disparate_impact(&frame, "pred", "group", 0.0, 1.0, 1.0).unwrap();
/// assert!((di - 0.5).abs() < 1e-6);
/// ```
pub fn disparate_impact(
    frame: &DataFrame,
    outcome_column: &str,
    protected_column: &str,
    privileged: f32,
    unprivileged: f32,
    favorable: f32,
) -> Result<f32> {
    let rate_privileged =
        favorable_rate(frame, outcome_column, protected_column, privileged, favorable)?;
    let rate_unprivileged = favorable_rate(
        frame,
        outcome_column,
        protected_column,
        unprivileged,
        favorable,
    )?;

    Ok(1.0 - rate_unprivileged / rate_privileged)
}

/// Statistical parity difference.
///
/// `P(favorable | unprivileged) − P(favorable | privileged)`. Range
/// [−1, 1]; 0 at parity; antisymmetric under swapping the privileged and
/// unprivileged values. Degenerate subgroups yield NaN.
///
/// # Errors
///
/// Returns an error if a named column is missing from the table.
pub fn statistical_parity_difference(
    frame: &DataFrame,
    outcome_column: &str,
    protected_column: &str,
    privileged: f32,
    unprivileged: f32,
    favorable: f32,
) -> Result<f32> {
    let rate_privileged =
        favorable_rate(frame, outcome_column, protected_column, privileged, favorable)?;
    let rate_unprivileged = favorable_rate(
        frame,
        outcome_column,
        protected_column,
        unprivileged,
        favorable,
    )?;

    Ok(rate_unprivileged - rate_privileged)
}

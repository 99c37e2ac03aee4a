//! Bias-aware grid search with cross-validated accuracy/fairness scoring.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::automl::{Configuration, ParamGrid};
use crate::data::DataFrame;
use crate::error::{Result, SesgoError};
use crate::metrics::{accuracy, BiasMetric};
use crate::model_selection::StratifiedKFold;
use crate::primitives::{Matrix, Vector};
use crate::traits::Tunable;

/// Column names of the per-fold evaluation frame handed to bias metrics.
const OUTCOME_COLUMN: &str = "outcome";
const PREDICTED_COLUMN: &str = "outcome_pred";
const PROTECTED_COLUMN: &str = "protected";

/// The protected-attribute grouping a search scores fairness against.
///
/// All group semantics are explicit parameters; there is no ambient
/// favorable/privileged state anywhere in the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Column index of the protected attribute within the feature matrix.
    pub protected_column: usize,
    /// Protected-attribute value of the privileged group.
    pub privileged: f32,
    /// Protected-attribute value of the unprivileged group.
    pub unprivileged: f32,
    /// Outcome value considered favorable for the individual.
    pub favorable: f32,
}

impl GroupSpec {
    /// Bundle the protected column with its group and outcome values.
    #[must_use]
    pub fn new(protected_column: usize, privileged: f32, unprivileged: f32, favorable: f32) -> Self {
        Self {
            protected_column,
            privileged,
            unprivileged,
            favorable,
        }
    }
}

/// One evaluated configuration: the unit of the result store.
///
/// Created once during [`BiasAwareGridSearch::fit`], never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// The evaluated hyperparameter configuration.
    pub configuration: Configuration,
    /// Arithmetic mean of per-fold accuracies, in [0, 1].
    pub mean_accuracy: f32,
    /// Arithmetic mean of the finite per-fold bias values; NaN when every
    /// fold was degenerate.
    pub mean_bias: f32,
    /// Raw per-fold bias values (length = fold count), degenerate folds
    /// included verbatim. Retained for inspection, not for aggregation.
    pub raw_biases: Vec<f32>,
}

impl SearchRecord {
    /// True when every fold produced a degenerate (non-finite) bias value,
    /// leaving no meaningful `mean_bias`.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.mean_bias.is_nan()
    }

    /// Sort key for |bias| minimization: degenerate records order last and
    /// are never selected.
    fn abs_bias(&self) -> f32 {
        if self.mean_bias.is_nan() {
            f32::INFINITY
        } else {
            self.mean_bias.abs()
        }
    }
}

/// Cross-validated hyperparameter search tracking accuracy and fairness
/// per configuration.
///
/// `fit` scans the full Cartesian product of the grid, scoring every
/// configuration with K-fold cross-validation: one accuracy and one bias
/// value per fold, aggregated to per-configuration means. The four
/// selection policies then trade accuracy against bias over the populated
/// result store, each concluding with a retrain on the complete dataset.
///
/// # Examples
///
/// ```no_run
/// use sesgo::prelude::*;
/// # #[derive(Clone)] struct MyClassifier;
/// # impl Estimator for MyClassifier {
/// #     fn fit(&mut self, _: &Matrix<f32>, _: &Vector<f32>) -> sesgo::error::Result<()> { Ok(()) }
/// #     fn predict(&self, x: &Matrix<f32>) -> Vector<f32> { Vector::from_vec(vec![0.0; x.n_rows()]) }
/// # }
/// # impl Tunable for MyClassifier {
/// #     fn set_params(&mut self, _: &Configuration) -> sesgo::error::Result<()> { Ok(()) }
/// # }
/// # let (x, y) = (Matrix::from_vec(0, 2, vec![]).unwrap(), Vector::from_vec(vec![]));
///
/// let grid = ParamGrid::new().add("max_depth", [2, 4, 8]);
/// let groups = GroupSpec::new(1, 0.0, 1.0, 1.0);
///
/// let mut search = BiasAwareGridSearch::new(MyClassifier, grid, groups)
///     .with_n_splits(5)
///     .with_random_state(42);
/// search.fit(&x, &y, disparate_impact)?;
///
/// let model = search.select_within_margin(0.05)?;
/// # Ok::<(), sesgo::error::SesgoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BiasAwareGridSearch<E: Tunable> {
    estimator: E,
    grid: ParamGrid,
    groups: GroupSpec,
    n_splits: usize,
    random_state: Option<u64>,
    #[cfg(feature = "parallel")]
    n_jobs: usize,
    verbose: bool,
    results: Vec<SearchRecord>,
    train_x: Option<Matrix<f32>>,
    train_y: Option<Vector<f32>>,
}

impl<E: Tunable> BiasAwareGridSearch<E> {
    /// Create a search over `grid` for the given prototype estimator,
    /// scoring fairness against `groups`. Defaults: 5 folds, no shuffle,
    /// sequential execution, quiet.
    #[must_use]
    pub fn new(estimator: E, grid: ParamGrid, groups: GroupSpec) -> Self {
        Self {
            estimator,
            grid,
            groups,
            n_splits: 5,
            random_state: None,
            #[cfg(feature = "parallel")]
            n_jobs: 1,
            verbose: false,
            results: Vec::new(),
            train_x: None,
            train_y: None,
        }
    }

    /// Set the number of cross-validation folds (default 5, minimum 2).
    #[must_use]
    pub fn with_n_splits(mut self, n_splits: usize) -> Self {
        self.n_splits = n_splits;
        self
    }

    /// Seed the fold splitter's shuffle for reproducible splits.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Set the worker count for configuration evaluation: 1 = sequential,
    /// 0 = one worker per core.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = n_jobs;
        self
    }

    /// Emit per-configuration progress and per-selection audit lines to
    /// stderr. Informational only.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The evaluated results, one record per grid configuration, sorted by
    /// canonical configuration key. Empty before `fit`.
    #[must_use]
    pub fn results(&self) -> &[SearchRecord] {
        &self.results
    }

    /// Whether `fit` has populated the result store.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.train_x.is_some()
    }

    fn validate_inputs(&self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        if x.n_rows() != y.len() {
            return Err(SesgoError::dimension_mismatch(
                "rows",
                x.n_rows(),
                y.len(),
            ));
        }
        if self.groups.protected_column >= x.n_cols() {
            return Err(SesgoError::InvalidArgument {
                param: "protected_column".to_string(),
                value: self.groups.protected_column.to_string(),
                constraint: format!("0..{}", x.n_cols()),
            });
        }
        if self.n_splits < 2 {
            return Err(SesgoError::InvalidArgument {
                param: "n_splits".to_string(),
                value: self.n_splits.to_string(),
                constraint: ">=2".to_string(),
            });
        }
        let smallest = StratifiedKFold::smallest_class_count(y);
        if self.n_splits > smallest {
            return Err(SesgoError::InvalidArgument {
                param: "n_splits".to_string(),
                value: self.n_splits.to_string(),
                constraint: format!("<= smallest class count ({smallest})"),
            });
        }
        Ok(())
    }

    fn splitter(&self) -> StratifiedKFold {
        let mut cv = StratifiedKFold::new(self.n_splits);
        if let Some(seed) = self.random_state {
            cv = cv.with_random_state(seed);
        }
        cv
    }

    /// Evaluate one configuration across all folds.
    ///
    /// Each fold gets its own estimator copy; folds run sequentially
    /// within the configuration. Estimator and metric failures abort the
    /// whole search rather than leave a silently incomplete store.
    fn evaluate_configuration(
        &self,
        config: &Configuration,
        x: &Matrix<f32>,
        y: &Vector<f32>,
        splits: &[(Vec<usize>, Vec<usize>)],
        bias_metric: BiasMetric,
    ) -> Result<SearchRecord> {
        if self.verbose {
            eprintln!("sesgo: evaluating {config}");
        }

        let mut accuracies = Vec::with_capacity(splits.len());
        let mut biases = Vec::with_capacity(splits.len());

        for (train_idx, val_idx) in splits {
            let x_train = x.take_rows(train_idx);
            let y_train = y.take(train_idx);
            let x_val = x.take_rows(val_idx);
            let y_val = y.take(val_idx);

            let mut model = self.estimator.clone();
            model.set_params(config)?;
            model.fit(&x_train, &y_train)?;
            let preds = model.predict(&x_val);

            accuracies.push(accuracy(&preds, &y_val));

            let protected = x_val.column(self.groups.protected_column);
            let frame = DataFrame::new(vec![
                (OUTCOME_COLUMN.to_string(), y_val),
                (PREDICTED_COLUMN.to_string(), preds),
                (PROTECTED_COLUMN.to_string(), protected),
            ])?;
            biases.push(bias_metric(
                &frame,
                PREDICTED_COLUMN,
                PROTECTED_COLUMN,
                self.groups.privileged,
                self.groups.unprivileged,
                self.groups.favorable,
            )?);
        }

        let mean_accuracy = Vector::from_vec(accuracies).mean();

        // Degenerate folds are kept in raw_biases but excluded from the
        // mean; all-degenerate leaves NaN.
        let finite: Vec<f32> = biases.iter().copied().filter(|b| b.is_finite()).collect();
        let mean_bias = if finite.is_empty() {
            f32::NAN
        } else {
            Vector::from_vec(finite).mean()
        };

        Ok(SearchRecord {
            configuration: config.clone(),
            mean_accuracy,
            mean_bias,
            raw_biases: biases,
        })
    }

    fn finish_fit(
        &mut self,
        mut records: Vec<SearchRecord>,
        x: &Matrix<f32>,
        y: &Vector<f32>,
    ) -> Result<()> {
        records.sort_by(|a, b| a.configuration.cmp(&b.configuration));
        self.results = records;
        self.train_x = Some(x.clone());
        self.train_y = Some(y.clone());
        Ok(())
    }

    /// Run the cross-validated scan over the full parameter grid.
    ///
    /// Fully replaces any previous result store (never merges). On any
    /// configuration or estimator failure the whole search aborts and the
    /// store is left empty.
    ///
    /// # Errors
    ///
    /// Returns an error on misaligned inputs, an out-of-range protected
    /// column, a fold count below 2 or exceeding the smallest class's
    /// sample count, or any propagated estimator/metric failure.
    #[cfg(not(feature = "parallel"))]
    pub fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>, bias_metric: BiasMetric) -> Result<()> {
        self.validate_inputs(x, y)?;
        self.results.clear();
        self.train_x = None;
        self.train_y = None;

        let splits = self.splitter().split(y);
        let configs = self.grid.expand();

        let engine: &Self = self;
        let records: Result<Vec<SearchRecord>> = configs
            .iter()
            .map(|config| engine.evaluate_configuration(config, x, y, &splits, bias_metric))
            .collect();

        self.finish_fit(records?, x, y)
    }

    /// Run the cross-validated scan over the full parameter grid,
    /// dispatching configurations across the worker pool (`with_n_jobs`).
    ///
    /// Fully replaces any previous result store (never merges). On any
    /// configuration or estimator failure the whole search aborts and the
    /// store is left empty. The final store content is independent of the
    /// worker count.
    ///
    /// # Errors
    ///
    /// Returns an error on misaligned inputs, an out-of-range protected
    /// column, a fold count below 2 or exceeding the smallest class's
    /// sample count, or any propagated estimator/metric failure.
    #[cfg(feature = "parallel")]
    pub fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>, bias_metric: BiasMetric) -> Result<()>
    where
        E: Send + Sync,
    {
        self.validate_inputs(x, y)?;
        self.results.clear();
        self.train_x = None;
        self.train_y = None;

        let splits = self.splitter().split(y);
        let configs = self.grid.expand();

        let engine: &Self = self;
        let records: Result<Vec<SearchRecord>> = if engine.n_jobs == 1 {
            configs
                .iter()
                .map(|config| engine.evaluate_configuration(config, x, y, &splits, bias_metric))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(engine.n_jobs)
                .build()
                .map_err(|e| SesgoError::Other(format!("failed to build worker pool: {e}")))?;
            pool.install(|| {
                configs
                    .par_iter()
                    .map(|config| {
                        engine.evaluate_configuration(config, x, y, &splits, bias_metric)
                    })
                    .collect()
            })
        };

        self.finish_fit(records?, x, y)
    }

    fn require_fitted(&self) -> Result<&[SearchRecord]> {
        if self.is_fitted() && !self.results.is_empty() {
            Ok(&self.results)
        } else {
            Err(SesgoError::NotFitted)
        }
    }

    fn announce(&self, policy: &str, record: &SearchRecord) {
        if self.verbose {
            eprintln!(
                "sesgo: {policy} selected {} (accuracy={:.4}, bias={:.4})",
                record.configuration, record.mean_accuracy, record.mean_bias
            );
        }
    }

    /// Minimal |mean bias| over `candidates`; degenerate records are never
    /// selected, ties go to the first candidate in store order.
    fn least_biased_of<'a>(
        candidates: impl Iterator<Item = &'a SearchRecord>,
    ) -> Option<&'a SearchRecord> {
        candidates
            .filter(|r| !r.is_degenerate())
            .min_by(|a, b| a.abs_bias().total_cmp(&b.abs_bias()))
    }

    /// Select and retrain the configuration with the highest mean
    /// accuracy.
    ///
    /// Accuracy ties are broken by minimal finite |mean bias|, remaining
    /// ties by canonical configuration order.
    ///
    /// # Errors
    ///
    /// Returns [`SesgoError::NotFitted`] before a successful `fit`;
    /// propagates retraining failures.
    pub fn select_highest_accuracy(&self) -> Result<E> {
        let records = self.require_fitted()?;
        let best_accuracy = records
            .iter()
            .map(|r| r.mean_accuracy)
            .fold(f32::NEG_INFINITY, f32::max);
        let tied = records.iter().filter(|r| r.mean_accuracy == best_accuracy);
        let chosen = tied
            .clone()
            .filter(|r| !r.is_degenerate())
            .min_by(|a, b| a.abs_bias().total_cmp(&b.abs_bias()))
            .or_else(|| tied.clone().next())
            .ok_or(SesgoError::NotFitted)?;
        self.announce("highest-accuracy", chosen);
        self.retrain(&chosen.configuration)
    }

    /// Select and retrain the configuration with the smallest bias
    /// magnitude (|mean bias|, sign ignored).
    ///
    /// # Errors
    ///
    /// Returns [`SesgoError::NotFitted`] before a successful `fit`, or
    /// [`SesgoError::EmptySelection`] when every record is degenerate.
    pub fn select_least_biased(&self) -> Result<E> {
        let records = self.require_fitted()?;
        let chosen = Self::least_biased_of(records.iter()).ok_or_else(|| {
            SesgoError::EmptySelection {
                message: "every configuration produced a degenerate bias value".to_string(),
            }
        })?;
        self.announce("least-biased", chosen);
        self.retrain(&chosen.configuration)
    }

    /// Among the `top_k` most accurate configurations (accuracy ties kept
    /// in store order), select and retrain the one with the smallest
    /// |mean bias|.
    ///
    /// # Errors
    ///
    /// Returns [`SesgoError::InvalidArgument`] unless
    /// `1 <= top_k <= results().len()`; [`SesgoError::NotFitted`] before a
    /// successful `fit`; [`SesgoError::EmptySelection`] when all `top_k`
    /// candidates are degenerate.
    pub fn select_balanced(&self, top_k: usize) -> Result<E> {
        let records = self.require_fitted()?;
        if top_k == 0 || top_k > records.len() {
            return Err(SesgoError::InvalidArgument {
                param: "top_k".to_string(),
                value: top_k.to_string(),
                constraint: format!("1..={}", records.len()),
            });
        }

        let mut by_accuracy: Vec<&SearchRecord> = records.iter().collect();
        // Stable sort: equal accuracies keep canonical store order.
        by_accuracy.sort_by(|a, b| b.mean_accuracy.total_cmp(&a.mean_accuracy));

        let chosen = Self::least_biased_of(by_accuracy[..top_k].iter().copied()).ok_or_else(
            || SesgoError::EmptySelection {
                message: format!("all top_{top_k} configurations are degenerate"),
            },
        )?;
        self.announce("balanced", chosen);
        self.retrain(&chosen.configuration)
    }

    /// Among every configuration within `margin` of the best mean
    /// accuracy (inclusive), select and retrain the one with the smallest
    /// |mean bias|.
    ///
    /// # Errors
    ///
    /// Returns [`SesgoError::NotFitted`] before a successful `fit`, or
    /// [`SesgoError::EmptySelection`] when no record meets the margin
    /// (only reachable with a negative margin) or all eligible records
    /// are degenerate.
    pub fn select_within_margin(&self, margin: f32) -> Result<E> {
        let records = self.require_fitted()?;
        let best_accuracy = records
            .iter()
            .map(|r| r.mean_accuracy)
            .fold(f32::NEG_INFINITY, f32::max);
        let floor = best_accuracy - margin;

        let eligible: Vec<&SearchRecord> = records
            .iter()
            .filter(|r| r.mean_accuracy >= floor)
            .collect();
        if eligible.is_empty() {
            return Err(SesgoError::EmptySelection {
                message: format!("no configurations within accuracy margin {margin}"),
            });
        }

        let chosen = Self::least_biased_of(eligible.into_iter()).ok_or_else(|| {
            SesgoError::EmptySelection {
                message: "all configurations within the margin are degenerate".to_string(),
            }
        })?;
        self.announce("within-margin", chosen);
        self.retrain(&chosen.configuration)
    }

    /// Retrain a fresh estimator with `config` on the entire dataset seen
    /// by `fit` (all rows, no held-out split).
    ///
    /// Does not consult or mutate the result store; the returned model
    /// shares no state with any estimator used during evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`SesgoError::NotFitted`] before a successful `fit`;
    /// propagates estimator failures.
    pub fn retrain(&self, config: &Configuration) -> Result<E> {
        let x = self.train_x.as_ref().ok_or(SesgoError::NotFitted)?;
        let y = self.train_y.as_ref().ok_or(SesgoError::NotFitted)?;

        let mut model = self.estimator.clone();
        model.set_params(config)?;
        model.fit(x, y)?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automl::ParamValue;
    use crate::metrics::{disparate_impact, statistical_parity_difference};

    /// Threshold rule on one feature column. Predicts 1.0 when the value
    /// reaches the threshold.
    #[derive(Debug, Clone)]
    struct StumpClassifier {
        feature: usize,
        threshold: f32,
        fitted: bool,
    }

    impl StumpClassifier {
        fn new() -> Self {
            Self {
                feature: 0,
                threshold: 0.5,
                fitted: false,
            }
        }
    }

    impl crate::traits::Estimator for StumpClassifier {
        fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
            if x.n_rows() != y.len() {
                return Err(SesgoError::dimension_mismatch("rows", x.n_rows(), y.len()));
            }
            self.fitted = true;
            Ok(())
        }

        fn predict(&self, x: &Matrix<f32>) -> Vector<f32> {
            let preds = (0..x.n_rows())
                .map(|i| {
                    if x.get(i, self.feature) >= self.threshold {
                        1.0
                    } else {
                        0.0
                    }
                })
                .collect();
            Vector::from_vec(preds)
        }
    }

    impl Tunable for StumpClassifier {
        fn set_params(&mut self, config: &Configuration) -> Result<()> {
            for (name, value) in config.iter() {
                match name {
                    "threshold" => {
                        self.threshold = value.as_f64().ok_or_else(|| {
                            SesgoError::InvalidHyperparameter {
                                param: "threshold".to_string(),
                                value: value.to_string(),
                                constraint: "numeric".to_string(),
                            }
                        })? as f32;
                    }
                    "feature" => {
                        let idx =
                            value
                                .as_i64()
                                .ok_or_else(|| SesgoError::InvalidHyperparameter {
                                    param: "feature".to_string(),
                                    value: value.to_string(),
                                    constraint: "integer".to_string(),
                                })?;
                        self.feature = idx as usize;
                    }
                    other => {
                        return Err(SesgoError::InvalidHyperparameter {
                            param: other.to_string(),
                            value: value.to_string(),
                            constraint: "one of: threshold, feature".to_string(),
                        });
                    }
                }
            }
            Ok(())
        }
    }

    /// 16 rows, 2 columns (signal, protected group), y == signal.
    ///
    /// The privileged group (0.0) holds 6 of the 8 favorable outcomes, so
    /// a perfect classifier carries a mean statistical parity difference
    /// of -0.5 across 4 unshuffled folds, while an always-unfavorable one
    /// is unbiased at accuracy 0.5.
    fn biased_dataset() -> (Matrix<f32>, Vector<f32>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        // signal 0.0: 6 unprivileged, then 2 privileged
        for group in [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0] {
            rows.extend_from_slice(&[0.0, group]);
            labels.push(0.0);
        }
        // signal 1.0: 6 privileged, then 2 unprivileged
        for group in [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0] {
            rows.extend_from_slice(&[1.0, group]);
            labels.push(1.0);
        }
        let x = Matrix::from_vec(16, 2, rows).unwrap();
        (x, Vector::from_vec(labels))
    }

    fn trade_off_grid() -> ParamGrid {
        // threshold 0.5 is a perfect (biased) rule, 10.0 predicts all
        // unfavorable (unbiased, accuracy 0.5)
        ParamGrid::new().add("threshold", [0.5, 10.0])
    }

    fn groups() -> GroupSpec {
        GroupSpec::new(1, 0.0, 1.0, 1.0)
    }

    fn fitted_search() -> BiasAwareGridSearch<StumpClassifier> {
        let (x, y) = biased_dataset();
        let mut search = BiasAwareGridSearch::new(StumpClassifier::new(), trade_off_grid(), groups())
            .with_n_splits(4);
        search
            .fit(&x, &y, statistical_parity_difference)
            .unwrap();
        search
    }

    #[test]
    fn fit_produces_one_record_per_configuration() {
        let search = fitted_search();
        assert_eq!(search.results().len(), 2);
        for record in search.results() {
            assert_eq!(record.raw_biases.len(), 4);
            assert!(record.mean_accuracy >= 0.0 && record.mean_accuracy <= 1.0);
        }
    }

    #[test]
    fn results_are_sorted_by_configuration() {
        let search = fitted_search();
        let keys: Vec<&Configuration> =
            search.results().iter().map(|r| &r.configuration).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn known_trade_off_is_measured() {
        let search = fitted_search();
        let perfect = &search.results()[0];
        let constant = &search.results()[1];
        assert_eq!(perfect.configuration.get_f64("threshold"), Some(0.5));
        assert!((perfect.mean_accuracy - 1.0).abs() < 1e-6);
        assert!((perfect.mean_bias - (-0.5)).abs() < 1e-6);
        assert!((constant.mean_accuracy - 0.5).abs() < 1e-6);
        assert!(constant.mean_bias.abs() < 1e-6);
    }

    #[test]
    fn selection_before_fit_is_rejected() {
        let search =
            BiasAwareGridSearch::new(StumpClassifier::new(), trade_off_grid(), groups());
        assert!(matches!(
            search.select_highest_accuracy(),
            Err(SesgoError::NotFitted)
        ));
        assert!(matches!(
            search.select_least_biased(),
            Err(SesgoError::NotFitted)
        ));
        assert!(matches!(
            search.retrain(&Configuration::empty()),
            Err(SesgoError::NotFitted)
        ));
    }

    #[test]
    fn misaligned_inputs_are_rejected() {
        let (x, _) = biased_dataset();
        let y = Vector::from_vec(vec![0.0; 10]);
        let mut search =
            BiasAwareGridSearch::new(StumpClassifier::new(), trade_off_grid(), groups());
        assert!(matches!(
            search.fit(&x, &y, statistical_parity_difference),
            Err(SesgoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn protected_column_out_of_range_is_rejected() {
        let (x, y) = biased_dataset();
        let mut search = BiasAwareGridSearch::new(
            StumpClassifier::new(),
            trade_off_grid(),
            GroupSpec::new(5, 0.0, 1.0, 1.0),
        );
        let err = search
            .fit(&x, &y, statistical_parity_difference)
            .unwrap_err();
        assert!(matches!(err, SesgoError::InvalidArgument { ref param, .. } if param == "protected_column"));
    }

    #[test]
    fn fold_count_must_fit_smallest_class() {
        let (x, y) = biased_dataset();
        let mut search =
            BiasAwareGridSearch::new(StumpClassifier::new(), trade_off_grid(), groups())
                .with_n_splits(9);
        assert!(search.fit(&x, &y, statistical_parity_difference).is_err());

        let mut search =
            BiasAwareGridSearch::new(StumpClassifier::new(), trade_off_grid(), groups())
                .with_n_splits(1);
        assert!(search.fit(&x, &y, statistical_parity_difference).is_err());
    }

    #[test]
    fn unknown_hyperparameter_aborts_the_search() {
        let (x, y) = biased_dataset();
        let grid = ParamGrid::new().add("bogus", [1.0]);
        let mut search =
            BiasAwareGridSearch::new(StumpClassifier::new(), grid, groups()).with_n_splits(4);
        assert!(matches!(
            search.fit(&x, &y, statistical_parity_difference),
            Err(SesgoError::InvalidHyperparameter { .. })
        ));
        assert!(!search.is_fitted());
        assert!(search.results().is_empty());
    }

    #[test]
    fn refit_replaces_the_result_store() {
        let (x, y) = biased_dataset();
        let grid = ParamGrid::new().add("threshold", [0.5, 2.0, 10.0]);
        let mut search = BiasAwareGridSearch::new(StumpClassifier::new(), grid, groups())
            .with_n_splits(4);
        search
            .fit(&x, &y, statistical_parity_difference)
            .unwrap();
        assert_eq!(search.results().len(), 3);
        search
            .fit(&x, &y, statistical_parity_difference)
            .unwrap();
        assert_eq!(search.results().len(), 3);
    }

    #[test]
    fn highest_accuracy_picks_the_perfect_rule() {
        let search = fitted_search();
        let model = search.select_highest_accuracy().unwrap();
        assert!((model.threshold - 0.5).abs() < 1e-6);
        assert!(model.fitted);
    }

    #[test]
    fn least_biased_picks_the_unbiased_rule() {
        let search = fitted_search();
        let model = search.select_least_biased().unwrap();
        assert!((model.threshold - 10.0).abs() < 1e-6);
    }

    #[test]
    fn balanced_narrows_then_minimizes_bias() {
        let search = fitted_search();
        let model = search.select_balanced(1).unwrap();
        assert!((model.threshold - 0.5).abs() < 1e-6);
        let model = search.select_balanced(2).unwrap();
        assert!((model.threshold - 10.0).abs() < 1e-6);
    }

    #[test]
    fn balanced_rejects_invalid_top_k() {
        let search = fitted_search();
        assert!(matches!(
            search.select_balanced(0),
            Err(SesgoError::InvalidArgument { .. })
        ));
        assert!(matches!(
            search.select_balanced(3),
            Err(SesgoError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn margin_widens_the_candidate_pool() {
        let search = fitted_search();
        let model = search.select_within_margin(0.0).unwrap();
        assert!((model.threshold - 0.5).abs() < 1e-6);
        let model = search.select_within_margin(0.6).unwrap();
        assert!((model.threshold - 10.0).abs() < 1e-6);
    }

    #[test]
    fn negative_margin_empties_the_pool() {
        let search = fitted_search();
        assert!(matches!(
            search.select_within_margin(-0.1),
            Err(SesgoError::EmptySelection { .. })
        ));
    }

    #[test]
    fn single_configuration_makes_all_policies_agree() {
        let (x, y) = biased_dataset();
        let grid = ParamGrid::new().add("threshold", [0.5]);
        let mut search =
            BiasAwareGridSearch::new(StumpClassifier::new(), grid, groups()).with_n_splits(4);
        search
            .fit(&x, &y, statistical_parity_difference)
            .unwrap();

        for model in [
            search.select_highest_accuracy().unwrap(),
            search.select_least_biased().unwrap(),
            search.select_balanced(1).unwrap(),
            search.select_within_margin(0.0).unwrap(),
        ] {
            assert!((model.threshold - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_rates_under_disparate_impact_are_degenerate() {
        // An all-unfavorable rule leaves both subgroup rates at zero, so
        // disparate impact is 0/0 in every fold.
        let (x, y) = biased_dataset();
        let grid = ParamGrid::new().add("threshold", [10.0]);
        let mut search =
            BiasAwareGridSearch::new(StumpClassifier::new(), grid, groups()).with_n_splits(4);
        search.fit(&x, &y, disparate_impact).unwrap();

        let record = &search.results()[0];
        assert!(record.is_degenerate());
        assert!(record.raw_biases.iter().all(|b| b.is_nan()));
        assert!(matches!(
            search.select_least_biased(),
            Err(SesgoError::EmptySelection { .. })
        ));
        // Accuracy selection still works; degenerate bias cannot block it.
        assert!(search.select_highest_accuracy().is_ok());
    }

    #[test]
    fn shuffled_fits_are_reproducible() {
        let (x, y) = biased_dataset();
        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut search =
                BiasAwareGridSearch::new(StumpClassifier::new(), trade_off_grid(), groups())
                    .with_n_splits(4)
                    .with_random_state(7);
            search
                .fit(&x, &y, statistical_parity_difference)
                .unwrap();
            runs.push(search.results().to_vec());
        }
        assert_eq!(runs[0], runs[1]);
    }

    #[test]
    fn retrain_leaves_the_store_untouched() {
        let search = fitted_search();
        let before = search.results().to_vec();
        let config = Configuration::from_pairs(vec![(
            "threshold".to_string(),
            ParamValue::Float(0.5),
        )]);
        let model = search.retrain(&config).unwrap();
        assert!(model.fitted);
        assert_eq!(search.results(), &before[..]);
    }
}

//! Stratified K-fold splitting for cross-validated search.

use std::collections::BTreeMap;

use crate::primitives::Vector;

/// Stratified K-Fold cross-validator.
///
/// Provides train/validation indices that split data into K folds while
/// maintaining the percentage of samples for each class in each fold.
/// Class grouping is order-deterministic, so splits are reproducible even
/// without a seed; with `with_random_state` the optional shuffle is
/// reproducible too.
///
/// # Examples
///
/// ```
/// use sesgo::model_selection::StratifiedKFold;
/// use sesgo::primitives::Vector;
///
/// let y = Vector::from_slice(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// let skfold = StratifiedKFold::new(3);
/// let splits = skfold.split(&y);
/// assert_eq!(splits.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl StratifiedKFold {
    /// Create a new Stratified K-Fold cross-validator.
    ///
    /// # Arguments
    ///
    /// * `n_splits` - Number of folds. Must be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling within each class before dealing across folds.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducible shuffling. Implies shuffling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true;
        self
    }

    /// Number of folds this splitter produces.
    #[must_use]
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Size of the smallest class in `y`.
    ///
    /// Stratification requires `n_splits` not to exceed this count.
    #[must_use]
    pub fn smallest_class_count(y: &Vector<f32>) -> usize {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for &label in y.iter() {
            *counts.entry(label as i64).or_insert(0) += 1;
        }
        counts.values().copied().min().unwrap_or(0)
    }

    /// Generate stratified train/validation indices for each fold.
    ///
    /// Each class's indices are dealt across folds in contiguous blocks,
    /// so each fold preserves the overall class proportion. Every row
    /// lands in exactly one validation fold.
    #[must_use]
    pub fn split(&self, y: &Vector<f32>) -> Vec<(Vec<usize>, Vec<usize>)> {
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let n_samples = y.len();

        // Group indices by class label; BTreeMap keeps class order stable.
        let mut class_indices: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (i, &label) in y.iter().enumerate() {
            class_indices.entry(label as i64).or_default().push(i);
        }

        if self.shuffle {
            let mut rng = match self.random_state {
                Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
                None => rand::rngs::StdRng::from_entropy(),
            };
            for indices in class_indices.values_mut() {
                indices.shuffle(&mut rng);
            }
        }

        // Distribute each class across folds.
        let mut fold_indices: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];

        for indices in class_indices.values() {
            let class_size = indices.len();
            let fold_size = class_size / self.n_splits;
            let remainder = class_size % self.n_splits;

            let mut start = 0;
            for (i, fold) in fold_indices.iter_mut().enumerate() {
                let current_size = if i < remainder {
                    fold_size + 1
                } else {
                    fold_size
                };
                let end = start + current_size;
                fold.extend_from_slice(&indices[start..end]);
                start = end;
            }
        }

        // Assemble train/validation pairs.
        let mut result = Vec::with_capacity(self.n_splits);

        for i in 0..self.n_splits {
            let val_indices = fold_indices[i].clone();

            let mut train_indices = Vec::with_capacity(n_samples - val_indices.len());
            for (j, fold) in fold_indices.iter().enumerate() {
                if i != j {
                    train_indices.extend_from_slice(fold);
                }
            }

            result.push((train_indices, val_indices));
        }

        result
    }
}

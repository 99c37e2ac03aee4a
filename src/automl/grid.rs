//! Hyperparameter grid types: values, configurations, and the grid itself.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A concrete hyperparameter value.
///
/// Carries a total ordering (floats via `total_cmp`, variants ranked
/// Float < Int < Bool < String) so configurations can be canonically
/// sorted for deterministic tie-breaking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    String(String),
}

impl ParamValue {
    /// Get as f64 if numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as i64 if integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Self::Float(_) => 0,
            Self::Int(_) => 1,
            Self::Bool(_) => 2,
            Self::String(_) => 3,
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParamValue {}

impl PartialOrd for ParamValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParamValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

/// One concrete assignment of values to every hyperparameter in the grid.
///
/// Immutable once built; two configurations are equal iff all mapped
/// values are equal. Ordered lexicographically over (name, value) pairs —
/// the canonical configuration key used to sort the result store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Configuration {
    values: BTreeMap<String, ParamValue>,
}

impl Configuration {
    /// The empty configuration (estimator defaults).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Build a configuration from (name, value) pairs.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, ParamValue)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Get a parameter value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Get parameter as f64.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(ParamValue::as_f64)
    }

    /// Get parameter as i64.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(ParamValue::as_i64)
    }

    /// Get parameter as usize.
    #[must_use]
    pub fn get_usize(&self, name: &str) -> Option<usize> {
        self.values
            .get(name)
            .and_then(ParamValue::as_i64)
            .map(|v| v as usize)
    }

    /// Get parameter as bool.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(ParamValue::as_bool)
    }

    /// Number of assigned parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters are assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self
            .values
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "{{{}}}", params.join(", "))
    }
}

/// A hyperparameter grid: each parameter name maps to a finite ordered
/// list of candidate values.
///
/// # Examples
///
/// ```
/// use sesgo::automl::ParamGrid;
///
/// let grid = ParamGrid::new()
///     .add("max_depth", [2, 4, 8])
///     .add("threshold", [0.25, 0.5]);
///
/// assert_eq!(grid.cardinality(), 6);
/// assert_eq!(grid.expand().len(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParamGrid {
    params: Vec<(String, Vec<ParamValue>)>,
}

impl ParamGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter with its candidate values. Re-adding an existing
    /// name replaces its candidates.
    #[must_use]
    pub fn add<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let values: Vec<ParamValue> = values.into_iter().map(Into::into).collect();
        if let Some(entry) = self.params.iter_mut().find(|(n, _)| n == name) {
            entry.1 = values;
        } else {
            self.params.push((name.to_string(), values));
        }
        self
    }

    /// Number of parameters in the grid.
    #[must_use]
    pub fn n_params(&self) -> usize {
        self.params.len()
    }

    /// Whether the grid has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Cartesian-product cardinality: the number of configurations
    /// `expand` produces. An empty grid expands to the single empty
    /// configuration, so the cardinality is 1.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.params.iter().map(|(_, v)| v.len()).product()
    }

    /// Fully expand the grid into every configuration of its Cartesian
    /// product, in deterministic enumeration order.
    #[must_use]
    pub fn expand(&self) -> Vec<Configuration> {
        let mut configs = vec![Configuration::empty()];

        for (name, values) in &self.params {
            let mut expanded = Vec::with_capacity(configs.len() * values.len());
            for config in &configs {
                for value in values {
                    let mut next = config.clone();
                    next.values.insert(name.clone(), value.clone());
                    expanded.push(next);
                }
            }
            configs = expanded;
        }

        configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_ordering_floats() {
        assert!(ParamValue::Float(1.0) < ParamValue::Float(2.0));
        assert_eq!(ParamValue::Float(1.5), ParamValue::Float(1.5));
    }

    #[test]
    fn test_param_value_ordering_across_variants() {
        assert!(ParamValue::Float(1e9) < ParamValue::Int(0));
        assert!(ParamValue::Int(5) < ParamValue::Bool(false));
        assert!(ParamValue::Bool(true) < ParamValue::String("a".to_string()));
    }

    #[test]
    fn test_param_value_conversions() {
        assert_eq!(ParamValue::from(2.5_f64).as_f64(), Some(2.5));
        assert_eq!(ParamValue::from(3_i32).as_i64(), Some(3));
        assert_eq!(ParamValue::from(3_usize).as_f64(), Some(3.0));
        assert_eq!(ParamValue::from(true).as_bool(), Some(true));
        assert_eq!(ParamValue::from("gini").as_str(), Some("gini"));
        assert_eq!(ParamValue::from(true).as_f64(), None);
    }

    #[test]
    fn test_configuration_equality_valuewise() {
        let a = Configuration::from_pairs(vec![
            ("depth".to_string(), ParamValue::Int(3)),
            ("lr".to_string(), ParamValue::Float(0.1)),
        ]);
        let b = Configuration::from_pairs(vec![
            ("lr".to_string(), ParamValue::Float(0.1)),
            ("depth".to_string(), ParamValue::Int(3)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_configuration_canonical_ordering() {
        let a = Configuration::from_pairs(vec![("depth".to_string(), ParamValue::Int(2))]);
        let b = Configuration::from_pairs(vec![("depth".to_string(), ParamValue::Int(4))]);
        assert!(a < b);
    }

    #[test]
    fn test_configuration_getters() {
        let config = Configuration::from_pairs(vec![
            ("depth".to_string(), ParamValue::Int(3)),
            ("lr".to_string(), ParamValue::Float(0.1)),
            ("bagging".to_string(), ParamValue::Bool(true)),
        ]);
        assert_eq!(config.get_i64("depth"), Some(3));
        assert_eq!(config.get_usize("depth"), Some(3));
        assert_eq!(config.get_f64("lr"), Some(0.1));
        assert_eq!(config.get_bool("bagging"), Some(true));
        assert!(config.get("missing").is_none());
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn test_configuration_display_sorted_by_name() {
        let config = Configuration::from_pairs(vec![
            ("b".to_string(), ParamValue::Int(2)),
            ("a".to_string(), ParamValue::Int(1)),
        ]);
        assert_eq!(config.to_string(), "{a=1, b=2}");
    }

    #[test]
    fn test_grid_expand_cartesian() {
        let grid = ParamGrid::new()
            .add("depth", [2, 4])
            .add("lr", [0.1, 0.2, 0.3]);

        let configs = grid.expand();
        assert_eq!(configs.len(), 6);
        assert_eq!(grid.cardinality(), 6);

        // Every configuration is distinct.
        for (i, a) in configs.iter().enumerate() {
            for b in &configs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_grid_expand_empty_grid_is_single_default() {
        let grid = ParamGrid::new();
        let configs = grid.expand();
        assert_eq!(configs.len(), 1);
        assert!(configs[0].is_empty());
        assert_eq!(grid.cardinality(), 1);
    }

    #[test]
    fn test_grid_expand_deterministic_order() {
        let grid = ParamGrid::new().add("a", [1, 2]).add("b", [10, 20]);
        assert_eq!(grid.expand(), grid.expand());
    }

    #[test]
    fn test_grid_add_replaces_existing_name() {
        let grid = ParamGrid::new().add("depth", [1, 2, 3]).add("depth", [7]);
        assert_eq!(grid.n_params(), 1);
        assert_eq!(grid.cardinality(), 1);
        assert_eq!(grid.expand()[0].get_i64("depth"), Some(7));
    }

    #[test]
    fn test_configuration_serde_round_trip() {
        let config = Configuration::from_pairs(vec![
            ("depth".to_string(), ParamValue::Int(3)),
            ("kernel".to_string(), ParamValue::String("rbf".to_string())),
        ]);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: Configuration = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }
}

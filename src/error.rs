//! Error types for sesgo operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for sesgo operations.
///
/// Covers the failure taxonomy of the search engine: dimension mismatches
/// in the supplied data, hyperparameter values an estimator rejects,
/// out-of-range selection arguments, selections over an empty eligible
/// set, and queries issued before a search has run.
///
/// # Examples
///
/// ```
/// use sesgo::error::SesgoError;
///
/// let err = SesgoError::InvalidArgument {
///     param: "top_k".to_string(),
///     value: "0".to_string(),
///     constraint: "1..=n_results".to_string(),
/// };
/// assert!(err.to_string().contains("top_k"));
/// ```
#[derive(Debug)]
pub enum SesgoError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value rejected by the estimator.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Out-of-range argument to a selection policy.
    InvalidArgument {
        /// Argument name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A selection filter matched no eligible result.
    EmptySelection {
        /// What the selection was looking for
        message: String,
    },

    /// A query was issued before `fit` populated the result store.
    NotFitted,

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SesgoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SesgoError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            SesgoError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            SesgoError::InvalidArgument {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid argument: {param} = {value}, expected {constraint}"
                )
            }
            SesgoError::EmptySelection { message } => {
                write!(f, "Empty selection: {message}")
            }
            SesgoError::NotFitted => {
                write!(f, "Search has not been fitted: call fit() first")
            }
            SesgoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SesgoError {}

impl From<&str> for SesgoError {
    fn from(msg: &str) -> Self {
        SesgoError::Other(msg.to_string())
    }
}

impl From<String> for SesgoError {
    fn from(msg: String) -> Self {
        SesgoError::Other(msg)
    }
}

impl SesgoError {
    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for SesgoError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SesgoError>;

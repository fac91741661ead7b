//! Error types for cosecha operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for cosecha operations.
///
/// Every failure in the engine is a deterministic data defect: shapes that
/// disagree, operands that cannot be multiplied, or a Gram matrix that stays
/// singular even after ridge regularization. None of these are retried
/// internally; callers translate them into their own failure responses.
///
/// # Examples
///
/// ```
/// use cosecha::error::CosechaError;
///
/// let err = CosechaError::ShapeMismatch {
///     expected: "n_samples=4".to_string(),
///     actual: "3".to_string(),
/// };
/// assert!(err.to_string().contains("shape mismatch"));
/// ```
#[derive(Debug)]
pub enum CosechaError {
    /// Row/column counts disagree between related inputs (X vs. y, feature
    /// vector vs. coefficient vector). Always a caller-side data defect.
    ShapeMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Operand shapes are incompatible for a matrix product.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Matrix has no inverse under the pivot tolerance.
    SingularMatrix {
        /// Column at which no adequate pivot could be found
        column: usize,
    },

    /// Model queried before a successful `fit()`.
    NotFitted,

    /// I/O error while reading input data.
    Io(std::io::Error),

    /// CSV parsing error.
    Csv(csv::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for CosechaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CosechaError::ShapeMismatch { expected, actual } => {
                write!(f, "Input shape mismatch: expected {expected}, got {actual}")
            }
            CosechaError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            CosechaError::SingularMatrix { column } => {
                write!(
                    f,
                    "Singular matrix detected: no adequate pivot in column {column}, cannot invert"
                )
            }
            CosechaError::NotFitted => {
                write!(f, "Model not fitted. Call fit() first.")
            }
            CosechaError::Io(e) => write!(f, "I/O error: {e}"),
            CosechaError::Csv(e) => write!(f, "CSV error: {e}"),
            CosechaError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CosechaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CosechaError::Io(e) => Some(e),
            CosechaError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CosechaError {
    fn from(err: std::io::Error) -> Self {
        CosechaError::Io(err)
    }
}

impl From<csv::Error> for CosechaError {
    fn from(err: csv::Error) -> Self {
        CosechaError::Csv(err)
    }
}

impl From<&str> for CosechaError {
    fn from(msg: &str) -> Self {
        CosechaError::Other(msg.to_string())
    }
}

impl From<String> for CosechaError {
    fn from(msg: String) -> Self {
        CosechaError::Other(msg)
    }
}

impl CosechaError {
    /// Create a shape mismatch error with descriptive context
    #[must_use]
    pub fn shape_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create a dimension mismatch error for a matrix product
    #[must_use]
    pub fn dimension_mismatch(expected: &str, actual: &str) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CosechaError>;

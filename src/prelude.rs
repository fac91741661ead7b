//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use cosecha::prelude::*;
//! ```

pub use crate::error::{CosechaError, Result};
pub use crate::ingest::records_from_csv;
pub use crate::insight::{analyze, analyze_with, AnalysisReport, IdealNutrients};
pub use crate::linear_model::LinearRegression;
pub use crate::metrics::{mse, r_squared, rmse};
pub use crate::primitives::{Matrix, Vector};
pub use crate::record::{AnalyzedRecord, SoilRecord};
pub use crate::traits::Estimator;

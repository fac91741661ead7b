//! Core compute primitives (Vector, Matrix).
//!
//! These types provide the dense-matrix foundation for the regression
//! solver. Data is always small and dense; there are no sparse shortcuts.

mod matrix;
mod vector;

pub use matrix::{Matrix, PIVOT_EPSILON};
pub use vector::Vector;

//! Linear models for yield regression.
//!
//! Ridge-stabilized Ordinary Least Squares solved in closed form via the
//! normal equations.

use crate::error::{CosechaError, Result};
use crate::metrics::r_squared;
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;

/// Fixed ridge term added to every diagonal entry of the Gram matrix before
/// inversion. Guarantees numerical invertibility even for collinear
/// features or n <= k+1, at the cost of a small fixed bias. Not a tunable
/// hyperparameter.
pub const RIDGE_LAMBDA: f64 = 1e-6;

/// Ridge-stabilized Ordinary Least Squares linear regression.
///
/// Fits a linear model by minimizing the residual sum of squares between
/// observed and predicted targets. The model equation is:
///
/// ```text
/// y = X β + ε
/// ```
///
/// where `β` is the coefficient vector and `ε` is random error.
///
/// # Solver
///
/// Normal equations with a fixed ridge shift:
/// `β = (XᵗX + λI)⁻¹ Xᵗy`, with the inverse computed by Gauss–Jordan
/// elimination. The design matrix gets a constant-1 intercept column
/// prepended, so `β[0]` is the intercept.
///
/// # Examples
///
/// ```
/// use cosecha::prelude::*;
///
/// // Simple linear regression: y = 2x
/// let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
/// let y = Vector::from_slice(&[2.0, 4.0, 6.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&x, &y).unwrap();
///
/// let yhat = model.predict_row(&[4.0]).unwrap();
/// assert!((yhat - 8.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    /// Coefficients for features (excluding intercept).
    coefficients: Option<Vector<f64>>,
    /// Intercept (bias) term.
    intercept: f64,
}

impl LinearRegression {
    /// Creates a new unfitted `LinearRegression`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
        }
    }

    /// Returns the per-feature coefficients (excluding intercept).
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if the model has not been fitted.
    pub fn coefficients(&self) -> Result<&Vector<f64>> {
        self.coefficients.as_ref().ok_or(CosechaError::NotFitted)
    }

    /// Returns the intercept term.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    /// Predicts the yield for a single feature row.
    ///
    /// Pure function of the fitted coefficients:
    /// `yhat = intercept + Σ coefficients[i] * features[i]`.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before a successful `fit()` and `ShapeMismatch`
    /// if the feature count doesn't match the fit.
    pub fn predict_row(&self, features: &[f64]) -> Result<f64> {
        let coefficients = self.coefficients()?;
        if features.len() != coefficients.len() {
            return Err(CosechaError::shape_mismatch(
                "n_features",
                coefficients.len(),
                features.len(),
            ));
        }

        let mut yhat = self.intercept;
        for (coef, feature) in coefficients.as_slice().iter().zip(features) {
            yhat += coef * feature;
        }
        Ok(yhat)
    }

    /// Adds an intercept column of ones to the design matrix.
    fn add_intercept_column(x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (n_rows, n_cols) = x.shape();
        let mut data = Vec::with_capacity(n_rows * (n_cols + 1));

        for i in 0..n_rows {
            data.push(1.0); // Intercept column
            for j in 0..n_cols {
                data.push(x.get(i, j));
            }
        }

        Matrix::from_vec(n_rows, n_cols + 1, data)
    }
}

impl Estimator for LinearRegression {
    /// Fits the model via the ridge-shifted normal equations.
    ///
    /// Solves: β = (XᵗX + λI)⁻¹ Xᵗy
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if X and y disagree on sample count, if
    /// there are no samples, or no features. Returns `SingularMatrix` only
    /// when inversion still fails after the ridge shift (degenerate input).
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(CosechaError::shape_mismatch(
                "n_samples",
                n_samples,
                y.len(),
            ));
        }

        if n_samples == 0 {
            return Err(CosechaError::ShapeMismatch {
                expected: "n_samples > 0".to_string(),
                actual: "0".to_string(),
            });
        }

        if n_features == 0 {
            return Err(CosechaError::ShapeMismatch {
                expected: "n_features > 0".to_string(),
                actual: "0".to_string(),
            });
        }

        let x_design = Self::add_intercept_column(x)?;

        // Gram matrix with the ridge shift on the diagonal.
        let xt = x_design.transpose();
        let mut xtx = xt.matmul(&x_design)?;
        xtx.add_to_diagonal(RIDGE_LAMBDA);

        let xty = xt.matvec(y)?;
        let beta = xtx.inverse()?.matvec(&xty)?;

        self.intercept = beta[0];
        self.coefficients = Some(Vector::from_slice(&beta.as_slice()[1..]));

        Ok(())
    }

    /// Predicts target values for every row of `x`.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before a successful `fit()` and
    /// `DimensionMismatch` if the feature count doesn't match the fit.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        let coefficients = self.coefficients()?;
        let result = x.matvec(coefficients)?;
        Ok(result.add_scalar(self.intercept))
    }

    /// Computes the R² score.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        Ok(r_squared(&y_pred, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::PIVOT_EPSILON;

    #[test]
    fn test_new() {
        let model = LinearRegression::new();
        assert!(!model.is_fitted());
        assert!(matches!(
            model.coefficients(),
            Err(CosechaError::NotFitted)
        ));
    }

    #[test]
    fn test_exact_recovery_noiseless() {
        // y = 2x exactly; fit + predict must reproduce y within 1e-3,
        // intercept ~0 and slope ~2 despite the ridge bias.
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let y = Vector::from_slice(&[2.0, 4.0, 6.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients().unwrap();
        assert!((coef[0] - 2.0).abs() < 1e-3);
        assert!(model.intercept().abs() < 1e-3);

        let predictions = model.predict(&x).unwrap();
        for i in 0..3 {
            assert!((predictions[i] - y[i]).abs() < 1e-3);
        }
    }

    #[test]
    fn test_multivariate_regression() {
        // y = 1 + 2*x1 + 3*x2
        let x = Matrix::from_vec(4, 2, vec![1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 2.0, 2.0]).unwrap();
        let y = Vector::from_slice(&[6.0, 8.0, 9.0, 11.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients().unwrap();
        assert!((coef[0] - 2.0).abs() < 1e-3);
        assert!((coef[1] - 3.0).abs() < 1e-3);
        assert!((model.intercept() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_coefficient_vector_shape() {
        // n records of k features produce k coefficients plus intercept.
        let x = Matrix::from_vec(
            6,
            3,
            vec![
                1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0,
                0.0, 1.0,
            ],
        )
        .unwrap();
        let y = Vector::from_slice(&[1.0, 2.0, 3.0, 3.0, 5.0, 4.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert_eq!(model.coefficients().unwrap().len(), 3);
    }

    #[test]
    fn test_ridge_shrinks_toward_zero() {
        // Compare against an unregularized normal-equations solve on the
        // same well-conditioned data: the ridge fit has the smaller
        // coefficient norm.
        let x = Matrix::from_vec(4, 2, vec![1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 2.0, 2.0]).unwrap();
        let y = Vector::from_slice(&[6.0, 8.0, 9.0, 11.0]);

        let design = LinearRegression::add_intercept_column(&x).unwrap();
        let xt = design.transpose();
        let xtx = xt.matmul(&design).unwrap();
        let xty = xt.matvec(&y).unwrap();
        let beta_ols = xtx.inverse().unwrap().matvec(&xty).unwrap();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        let coef = model.coefficients().unwrap();

        let ols_norm: f64 = beta_ols.as_slice().iter().map(|b| b * b).sum();
        let ridge_norm: f64 = model.intercept() * model.intercept()
            + coef.as_slice().iter().map(|b| b * b).sum::<f64>();

        assert!(
            ridge_norm < ols_norm,
            "ridge norm {ridge_norm} not below OLS norm {ols_norm}"
        );
    }

    #[test]
    fn test_shape_mismatch_error() {
        let x = Matrix::from_vec(3, 2, vec![1.0; 6]).unwrap();
        let y = Vector::from_slice(&[1.0, 2.0]); // Wrong length

        let mut model = LinearRegression::new();
        assert!(matches!(
            model.fit(&x, &y),
            Err(CosechaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_samples_error() {
        let x = Matrix::from_vec(0, 2, vec![]).unwrap();
        let y = Vector::from_vec(vec![]);

        let mut model = LinearRegression::new();
        assert!(matches!(
            model.fit(&x, &y),
            Err(CosechaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_features_error() {
        let x = Matrix::from_vec(2, 0, vec![]).unwrap();
        let y = Vector::from_slice(&[1.0, 2.0]);

        let mut model = LinearRegression::new();
        assert!(matches!(
            model.fit(&x, &y),
            Err(CosechaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_underdetermined_system_solves_with_ridge() {
        // More parameters than samples; the ridge shift keeps the Gram
        // matrix invertible where plain OLS could not proceed.
        let x = Matrix::from_vec(
            3,
            5,
            vec![
                1.0, 2.0, 3.0, 4.0, 5.0, 2.0, 3.0, 4.0, 5.0, 6.0, 3.0, 5.0, 4.0, 7.0, 6.0,
            ],
        )
        .unwrap();
        let y = Vector::from_vec(vec![10.0, 20.0, 30.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.coefficients().unwrap().len(), 5);
    }

    #[test]
    fn test_single_sample_solves_with_ridge() {
        let x = Matrix::from_vec(1, 6, vec![6.5, 40.0, 55.0, 30.0, 160.0, 22.0]).unwrap();
        let y = Vector::from_slice(&[3200.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        assert!(model.is_fitted());
        let yhat = model
            .predict_row(&[6.5, 40.0, 55.0, 30.0, 160.0, 22.0])
            .unwrap();
        assert!(yhat.is_finite());
    }

    #[test]
    fn test_predict_row_matches_predict() {
        let x = Matrix::from_vec(4, 2, vec![1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 2.0, 2.0]).unwrap();
        let y = Vector::from_slice(&[6.0, 8.0, 9.0, 11.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let batch = model.predict(&x).unwrap();
        for i in 0..4 {
            let single = model.predict_row(&[x.get(i, 0), x.get(i, 1)]).unwrap();
            assert!((single - batch[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_predict_row_is_idempotent() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let y = Vector::from_slice(&[2.0, 4.0, 6.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let first = model.predict_row(&[2.5]).unwrap();
        let second = model.predict_row(&[2.5]).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_predict_row_shape_error() {
        let x = Matrix::from_vec(3, 2, vec![1.0, 1.0, 2.0, 1.0, 1.0, 2.0]).unwrap();
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        assert!(matches!(
            model.predict_row(&[1.0]),
            Err(CosechaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_predict_unfitted_error() {
        let model = LinearRegression::new();
        let x = Matrix::from_vec(1, 1, vec![1.0]).unwrap();
        assert!(matches!(model.predict(&x), Err(CosechaError::NotFitted)));
        assert!(matches!(
            model.predict_row(&[1.0]),
            Err(CosechaError::NotFitted)
        ));
    }

    #[test]
    fn test_degenerate_zero_design_still_solves() {
        // An all-zero feature column: the ridge shift (1e-6) stays well
        // above the pivot epsilon, so the Gram matrix remains invertible.
        assert!(RIDGE_LAMBDA > PIVOT_EPSILON);

        let x = Matrix::from_vec(3, 2, vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0]).unwrap();
        let y = Vector::from_slice(&[2.0, 4.0, 6.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        let coef = model.coefficients().unwrap();
        // Zero column gets a ~zero coefficient, live column recovers ~2.
        assert!((coef[0] - 2.0).abs() < 1e-3);
        assert!(coef[1].abs() < 1e-3);
    }

    #[test]
    fn test_score_perfect_fit() {
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let r2 = model.score(&x, &y).unwrap();
        assert!((r2 - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_with_noise() {
        // y ≈ 2x + 1 with some noise
        let x = Matrix::from_vec(5, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y = Vector::from_slice(&[3.1, 4.9, 7.2, 8.8, 11.1]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients().unwrap();
        assert!((coef[0] - 2.0).abs() < 0.2);
        assert!((model.intercept() - 1.0).abs() < 0.5);

        let r2 = model.score(&x, &y).unwrap();
        assert!(r2 > 0.95);
        assert!(r2 < 1.0);
    }

    #[test]
    fn test_constant_target() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let y = Vector::from_slice(&[5.0, 5.0, 5.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients().unwrap();
        assert!(coef[0].abs() < 1e-3);
        assert!((model.intercept() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_negative_values() {
        let x = Matrix::from_vec(4, 1, vec![-2.0, -1.0, 0.0, 1.0]).unwrap();
        let y = Vector::from_slice(&[5.0, 3.0, 1.0, -1.0]); // y = -2x + 1

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients().unwrap();
        assert!((coef[0] - (-2.0)).abs() < 1e-3);
        assert!((model.intercept() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_clone() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let y = Vector::from_slice(&[2.0, 4.0, 6.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let cloned = model.clone();
        assert!(cloned.is_fitted());
        assert!((cloned.intercept() - model.intercept()).abs() < 1e-12);
    }
}

//! Regression oracle contract and the default least-squares fit.
//!
//! ## Purpose
//!
//! This module defines the [`RegressionOracle`] seam the selection engine fits
//! candidate models through, the [`OlsFit`] result it consumes, and
//! [`LeastSquares`], an ordinary least squares oracle reporting the usual
//! coefficient and goodness-of-fit statistics.
//!
//! ## Design notes
//!
//! * **Strongly keyed**: Coefficient statistics are looked up by [`Monomial`],
//!   never by string.
//! * **Failure**: Rank-deficient designs yield [`SelectionError::SingularMatrix`].
//! * **Degenerate residual df**: With as many columns as observations, every
//!   statistic that divides by the residual degrees of freedom is NaN.
//!
//! ## Key concepts
//!
//! * **Adjusted R²**: `1 - (n - 1) / (n - p) * (1 - R²)`.
//! * **Coefficient p-value**: Two-sided Student-t test with `n - p` df.
//! * **F statistic**: `(ESS / df_model) / (RSS / df_resid)`.
//!
//! ## Non-goals
//!
//! * This module does not support weights, robust covariance or regularisation.

use num_traits::Float;

use crate::algorithms::design::DesignMatrix;
use crate::math::linalg::solve_least_squares;
use crate::math::monomial::Monomial;
use crate::math::special::{f_upper_tail, student_t_critical, student_t_two_sided};
use crate::primitives::errors::SelectionError;

// ============================================================================
// Oracle Contract
// ============================================================================

/// Fits a linear model on a design matrix and a response vector.
pub trait RegressionOracle<T: Float> {
    /// Fit `y` on `design`.
    ///
    /// Must fail with [`SelectionError::SingularMatrix`] for rank-deficient designs.
    fn fit(&self, design: &DesignMatrix<T>, y: &[T]) -> Result<OlsFit<T>, SelectionError>;
}

// ============================================================================
// Fit Results
// ============================================================================

/// Estimate and inference for one regression coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientStats<T> {
    /// Point estimate.
    pub estimate: T,

    /// Standard error of the estimate.
    pub std_error: T,

    /// t statistic (`estimate / std_error`).
    pub t_value: T,

    /// Two-sided p-value of the t statistic.
    pub p_value: T,

    /// Lower bound of the 95% confidence interval.
    pub conf_lower: T,

    /// Upper bound of the 95% confidence interval.
    pub conf_upper: T,
}

/// Result of an ordinary least squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit<T> {
    /// Number of observations.
    pub n_obs: usize,

    /// Model degrees of freedom (columns minus the intercept).
    pub df_model: usize,

    /// Residual degrees of freedom (observations minus columns).
    pub df_resid: usize,

    /// Intercept statistics.
    pub intercept: CoefficientStats<T>,

    /// Term statistics in design column order.
    pub terms: Vec<(Monomial, CoefficientStats<T>)>,

    /// Coefficient of determination.
    pub r_squared: T,

    /// R² penalised for model size.
    pub adj_r_squared: T,

    /// Overall F statistic (NaN for the intercept-only model).
    pub f_statistic: T,

    /// Upper-tail probability of the F statistic.
    pub f_p_value: T,

    /// Gaussian log-likelihood.
    pub log_likelihood: T,

    /// Akaike information criterion.
    pub aic: T,

    /// Bayesian information criterion.
    pub bic: T,

    /// Residual sum of squares.
    pub rss: T,

    /// Fitted values.
    pub fitted: Vec<T>,

    /// Residuals `y - fitted`.
    pub residuals: Vec<T>,
}

impl<T: Float> OlsFit<T> {
    /// Statistics of the given term, if it is part of the fit.
    pub fn term(&self, term: &Monomial) -> Option<&CoefficientStats<T>> {
        self.terms
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, stats)| stats)
    }

    /// Estimated coefficient of the given term.
    pub fn coefficient(&self, term: &Monomial) -> Option<T> {
        self.term(term).map(|s| s.estimate)
    }

    /// Two-sided p-value of the given term.
    pub fn p_value(&self, term: &Monomial) -> Option<T> {
        self.term(term).map(|s| s.p_value)
    }
}

// ============================================================================
// Least Squares Oracle
// ============================================================================

/// Ordinary least squares via the singular value decomposition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeastSquares;

impl LeastSquares {
    /// Significance level of the reported confidence intervals.
    const CONFIDENCE_ALPHA: f64 = 0.05;

    /// Relative threshold below which the total sum of squares counts as zero.
    const MIN_TSS: f64 = 1e-12;
}

impl<T: Float> RegressionOracle<T> for LeastSquares {
    fn fit(&self, design: &DesignMatrix<T>, y: &[T]) -> Result<OlsFit<T>, SelectionError> {
        let n = y.len();
        if design.n_rows() != n {
            return Err(SelectionError::MismatchedInputs {
                rows: design.n_rows(),
                response: n,
            });
        }

        let p = design.n_columns();
        let solution = solve_least_squares(design.columns(), y)?;

        // Fitted values and residuals
        let mut fitted = vec![T::zero(); n];
        for (column, &beta) in design.columns().iter().zip(&solution.coefficients) {
            for (f, &x) in fitted.iter_mut().zip(column) {
                *f = *f + beta * x;
            }
        }
        let residuals: Vec<T> = y.iter().zip(&fitted).map(|(&yi, &fi)| yi - fi).collect();

        // Sums of squares
        let n_t = T::from(n).unwrap();
        let y_mean = y.iter().fold(T::zero(), |acc, &v| acc + v) / n_t;
        let rss = residuals.iter().fold(T::zero(), |acc, &r| acc + r * r);
        let tss = y
            .iter()
            .fold(T::zero(), |acc, &v| acc + (v - y_mean) * (v - y_mean));
        let sum_y_sq = y.iter().fold(T::zero(), |acc, &v| acc + v * v);

        let min_tss = T::from(Self::MIN_TSS).unwrap() * sum_y_sq;
        let r_squared = if tss > min_tss {
            T::one() - rss / tss
        } else if rss <= min_tss {
            T::one()
        } else {
            T::zero()
        };

        let df_model = p - 1;
        let df_resid = n - p;
        let df_resid_t = T::from(df_resid).unwrap();
        let df_model_t = T::from(df_model).unwrap();

        let (scale, adj_r_squared) = if df_resid > 0 {
            (
                rss / df_resid_t,
                T::one() - (n_t - T::one()) / df_resid_t * (T::one() - r_squared),
            )
        } else {
            (T::nan(), T::nan())
        };

        let f_statistic = if df_model > 0 && df_resid > 0 {
            ((tss - rss) / df_model_t) / scale
        } else {
            T::nan()
        };
        let f_p_value = f_upper_tail(f_statistic, df_model_t, df_resid_t);

        // Gaussian log-likelihood at the MLE of the variance
        let two_pi = T::from(2.0 * core::f64::consts::PI).unwrap();
        let half_n = n_t / T::from(2.0).unwrap();
        let log_likelihood = -half_n * (two_pi.ln() + (rss / n_t).ln() + T::one());
        let k = T::from(p).unwrap();
        let aic = T::from(-2.0).unwrap() * log_likelihood + T::from(2.0).unwrap() * k;
        let bic = T::from(-2.0).unwrap() * log_likelihood + n_t.ln() * k;

        // Coefficient inference
        let critical = student_t_critical(T::from(Self::CONFIDENCE_ALPHA).unwrap(), df_resid_t);
        let mut stats = solution
            .coefficients
            .iter()
            .zip(&solution.unscaled_variances)
            .map(|(&estimate, &unscaled)| {
                let std_error = (scale * unscaled).sqrt();
                let t_value = estimate / std_error;
                CoefficientStats {
                    estimate,
                    std_error,
                    t_value,
                    p_value: student_t_two_sided(t_value, df_resid_t),
                    conf_lower: estimate - critical * std_error,
                    conf_upper: estimate + critical * std_error,
                }
            });

        let intercept = stats.next().ok_or(SelectionError::EmptyInput)?;
        let terms = design.terms().iter().cloned().zip(stats).collect();

        Ok(OlsFit {
            n_obs: n,
            df_model,
            df_resid,
            intercept,
            terms,
            r_squared,
            adj_r_squared,
            f_statistic,
            f_p_value,
            log_likelihood,
            aic,
            bic,
            rss,
            fitted,
            residuals,
        })
    }
}

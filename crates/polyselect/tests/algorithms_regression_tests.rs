//! Tests for the least-squares regression oracle.
//!
//! These tests verify the fit statistics selection decisions are based on:
//! - Coefficient estimates, standard errors and p-values
//! - R², adjusted R², F statistic and information criteria
//! - Degenerate fits (intercept-only, saturated, exact)
//! - Singular designs
//!
//! ## Test Organization
//!
//! 1. **Simple Regression** - Hand-computed reference values
//! 2. **Multiple Regression** - Exact recovery of coefficients
//! 3. **Degenerate Fits** - Intercept-only and saturated designs
//! 4. **Singular Designs** - Collinear and duplicate columns
//! 5. **Lookup** - Statistics keyed by term

use approx::assert_relative_eq;

use polyselect::prelude::*;

fn simple_data() -> (Dataset<f64>, Vec<f64>) {
    let data = Dataset::from_columns([("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])]).unwrap();
    let y = vec![2.1, 3.9, 6.2, 7.8, 10.1];
    (data, y)
}

// ============================================================================
// Simple Regression Tests
// ============================================================================

/// Test coefficients and their inference against hand-computed values.
#[test]
fn test_simple_regression_coefficients() {
    let (data, y) = simple_data();
    let design = DesignMatrix::from_keys(&data, &["x"]).unwrap();
    let fit = LeastSquares.fit(&design, &y).unwrap();

    let x = Monomial::variable("x");
    let slope = fit.term(&x).unwrap();

    assert_relative_eq!(fit.intercept.estimate, 0.05, epsilon = 1e-10);
    assert_relative_eq!(slope.estimate, 1.99, epsilon = 1e-10);
    assert_relative_eq!(slope.std_error, 0.059_721_576_223_896_59, epsilon = 1e-10);
    assert_relative_eq!(fit.intercept.std_error, 0.198_074_060_223_275_1, epsilon = 1e-10);
    assert_relative_eq!(slope.t_value, 33.321_290_659_500_95, epsilon = 1e-7);

    // Two-sided t test with 3 df
    assert_relative_eq!(slope.p_value, 5.941_539_111_753_4e-5, max_relative = 1e-6);
    assert_relative_eq!(fit.intercept.p_value, 0.817_015_178_175_12, epsilon = 1e-8);

    // 95% interval: t(0.975, 3) = 3.182446305284263
    let half_width = 3.182_446_305_284_263 * slope.std_error;
    assert_relative_eq!(slope.conf_lower, 1.99 - half_width, epsilon = 1e-8);
    assert_relative_eq!(slope.conf_upper, 1.99 + half_width, epsilon = 1e-8);
}

/// Test goodness-of-fit statistics against hand-computed values.
#[test]
fn test_simple_regression_fit_statistics() {
    let (data, y) = simple_data();
    let design = DesignMatrix::from_keys(&data, &["x"]).unwrap();
    let fit = LeastSquares.fit(&design, &y).unwrap();

    assert_eq!(fit.n_obs, 5);
    assert_eq!(fit.df_model, 1);
    assert_eq!(fit.df_resid, 3);

    assert_relative_eq!(fit.rss, 0.107, epsilon = 1e-10);
    assert_relative_eq!(fit.r_squared, 0.997_305_328_900_977_1, epsilon = 1e-10);
    assert_relative_eq!(fit.adj_r_squared, 0.996_407_105_201_302_8, epsilon = 1e-10);
    assert_relative_eq!(fit.f_statistic, 1_110.308_411_214_945_6, max_relative = 1e-9);
    assert_relative_eq!(fit.f_p_value, slope_p_value(&fit), max_relative = 1e-6);

    assert_relative_eq!(fit.log_likelihood, 2.516_218_226_362_447_7, epsilon = 1e-9);
    assert_relative_eq!(fit.aic, -1.032_436_452_724_895_5, epsilon = 1e-9);
    assert_relative_eq!(fit.bic, -1.813_560_627_856_695, epsilon = 1e-9);
}

fn slope_p_value(fit: &OlsFit<f64>) -> f64 {
    fit.p_value(&Monomial::variable("x")).unwrap()
}

/// Test that fitted values and residuals add back to the response.
#[test]
fn test_fitted_plus_residuals() {
    let (data, y) = simple_data();
    let design = DesignMatrix::from_keys(&data, &["x"]).unwrap();
    let fit = LeastSquares.fit(&design, &y).unwrap();

    for ((&f, &r), &yi) in fit.fitted.iter().zip(&fit.residuals).zip(&y) {
        assert_relative_eq!(f + r, yi, epsilon = 1e-12);
    }

    // Residuals of a model with intercept sum to zero
    let sum: f64 = fit.residuals.iter().sum();
    assert!(sum.abs() < 1e-10);
}

// ============================================================================
// Multiple Regression Tests
// ============================================================================

/// Test exact recovery of a noiseless polynomial.
#[test]
fn test_exact_polynomial_recovery() {
    let x: Vec<f64> = (0..12).map(|i| i as f64 / 3.0).collect();
    let z: Vec<f64> = (0..12).map(|i| ((i * 5) % 7) as f64).collect();
    let y: Vec<f64> = x
        .iter()
        .zip(&z)
        .map(|(&x, &z)| 1.0 + 2.0 * x - 0.5 * z + 0.25 * x * z)
        .collect();

    let data = Dataset::from_columns([("x", x), ("z", z)]).unwrap();
    let design = DesignMatrix::from_keys(&data, &["x", "x*z", "z"]).unwrap();
    let fit = LeastSquares.fit(&design, &y).unwrap();

    assert_relative_eq!(fit.intercept.estimate, 1.0, epsilon = 1e-9);
    assert_relative_eq!(fit.coefficient(&Monomial::variable("x")).unwrap(), 2.0, epsilon = 1e-9);
    assert_relative_eq!(fit.coefficient(&Monomial::variable("z")).unwrap(), -0.5, epsilon = 1e-9);
    assert_relative_eq!(
        fit.coefficient(&Monomial::parse("x*z").unwrap()).unwrap(),
        0.25,
        epsilon = 1e-9
    );
    assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
}

/// Test that adjusted R² follows `1 - (n - 1) / (n - p) * (1 - R²)`.
#[test]
fn test_adjusted_r_squared_formula() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&v| 0.3 * v + (v * 1.7).sin()).collect();

    let data = Dataset::from_columns([("x", x)]).unwrap();
    let design = DesignMatrix::from_keys(&data, &["x", "x^2"]).unwrap();
    let fit = LeastSquares.fit(&design, &y).unwrap();

    let n = 20.0;
    let p = 3.0;
    let expected = 1.0 - (n - 1.0) / (n - p) * (1.0 - fit.r_squared);
    assert_relative_eq!(fit.adj_r_squared, expected, epsilon = 1e-12);
    assert!(fit.adj_r_squared < fit.r_squared);
}

/// Test that adding a column never lowers R².
#[test]
fn test_r_squared_is_monotone_in_columns() {
    let x: Vec<f64> = (0..15).map(|i| i as f64 * 0.4).collect();
    let y: Vec<f64> = x.iter().map(|&v| v.sin() + 0.1 * v).collect();
    let data = Dataset::from_columns([("x", x)]).unwrap();

    let small = LeastSquares
        .fit(&DesignMatrix::from_keys(&data, &["x"]).unwrap(), &y)
        .unwrap();
    let large = LeastSquares
        .fit(&DesignMatrix::from_keys(&data, &["x", "x^2", "x^3"]).unwrap(), &y)
        .unwrap();

    assert!(large.r_squared >= small.r_squared - 1e-12);
}

// ============================================================================
// Degenerate Fit Tests
// ============================================================================

/// Test the intercept-only model.
#[test]
fn test_intercept_only_fit() {
    let y: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0];
    let fit = LeastSquares
        .fit(&DesignMatrix::intercept_only(4), &y)
        .unwrap();

    assert_relative_eq!(fit.intercept.estimate, 2.5, epsilon = 1e-12);
    assert_relative_eq!(fit.r_squared, 0.0, epsilon = 1e-12);
    assert_relative_eq!(fit.adj_r_squared, 0.0, epsilon = 1e-12);
    assert!(fit.terms.is_empty());
    assert!(fit.f_statistic.is_nan());
    assert_eq!(fit.df_model, 0);
}

/// Test that a saturated design reports NaN for df-dependent statistics.
#[test]
fn test_saturated_fit() {
    let data = Dataset::<f64>::from_columns([("x", vec![1.0, 2.0, 4.0])]).unwrap();
    let y: Vec<f64> = vec![3.0, 1.0, 2.0];
    let fit = LeastSquares
        .fit(&DesignMatrix::from_keys(&data, &["x", "x^2"]).unwrap(), &y)
        .unwrap();

    assert_eq!(fit.df_resid, 0);
    assert!(fit.adj_r_squared.is_nan());
    assert!(fit.p_value(&Monomial::variable("x")).unwrap().is_nan());
    assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-9);
}

/// Test that a mismatched response length is rejected.
#[test]
fn test_mismatched_response() {
    let (data, _) = simple_data();
    let design = DesignMatrix::from_keys(&data, &["x"]).unwrap();
    let err = LeastSquares.fit(&design, &[1.0, 2.0][..]).unwrap_err();
    assert_eq!(
        err,
        SelectionError::MismatchedInputs {
            rows: 5,
            response: 2,
        }
    );
}

// ============================================================================
// Singular Design Tests
// ============================================================================

/// Test that a duplicated column is reported as singular.
#[test]
fn test_duplicate_column_is_singular() {
    let values: Vec<f64> = vec![1.0, 2.0, 3.0, 5.0, 8.0];
    let data = Dataset::from_columns([("a", values.clone()), ("b", values)]).unwrap();
    let y: Vec<f64> = vec![1.0, 2.0, 2.5, 4.0, 7.0];

    let err = LeastSquares
        .fit(&DesignMatrix::from_keys(&data, &["a", "b"]).unwrap(), &y)
        .unwrap_err();

    assert_eq!(
        err,
        SelectionError::SingularMatrix {
            rank: 2,
            columns: 3,
        }
    );
}

/// Test that a column collinear with the intercept is singular.
#[test]
fn test_constant_column_is_singular() {
    let data = Dataset::<f64>::from_columns([
        ("c", vec![2.0; 6]),
        ("x", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
    ])
    .unwrap();
    let y: Vec<f64> = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0];

    let err = LeastSquares
        .fit(&DesignMatrix::from_keys(&data, &["c", "x"]).unwrap(), &y)
        .unwrap_err();
    assert!(matches!(err, SelectionError::SingularMatrix { .. }));
}

/// Test that more columns than observations is singular.
#[test]
fn test_too_many_columns_is_singular() {
    let data = Dataset::<f64>::from_columns([("x", vec![1.0, 2.0, 3.0])]).unwrap();
    let y: Vec<f64> = vec![1.0, 0.0, 2.0];

    let err = LeastSquares
        .fit(&DesignMatrix::from_keys(&data, &["x", "x^2", "x^3"]).unwrap(), &y)
        .unwrap_err();
    assert!(matches!(err, SelectionError::SingularMatrix { columns: 4, .. }));
}

// ============================================================================
// Lookup Tests
// ============================================================================

/// Test that statistics are looked up by term, not by position.
#[test]
fn test_lookup_by_term() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&v| 4.0 + v * v).collect();
    let data = Dataset::from_columns([("x", x)]).unwrap();

    let fit = LeastSquares
        .fit(&DesignMatrix::from_keys(&data, &["x^2", "x"]).unwrap(), &y)
        .unwrap();

    assert_eq!(fit.terms[0].0.canonical(), "x^2");
    assert_relative_eq!(
        fit.coefficient(&Monomial::parse("x^2").unwrap()).unwrap(),
        1.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        fit.coefficient(&Monomial::variable("x")).unwrap(),
        0.0,
        epsilon = 1e-9
    );
    assert!(fit.term(&Monomial::variable("z")).is_none());
}

//! Dense least squares via the singular value decomposition.
//!
//! ## Purpose
//!
//! This module solves `min ||X b - y||` for a tall column-major matrix `X` and
//! returns the unscaled coefficient variances `diag((X'X)^-1)` needed for
//! standard errors.
//!
//! ## Design notes
//!
//! * **Backend**: `nalgebra` SVD in `f64`; results are converted back to `T`.
//! * **Equilibration**: Columns are scaled to unit norm before decomposing, so
//!   rank detection does not depend on the units of each term.
//! * **Rank detection**: A singular value is zero when it is negligible relative
//!   to the largest one.
//! * **Variances**: `(X'X)^-1 = V S^-2 V'`, so the diagonal is
//!   `sum_k V[j,k]^2 / s_k^2`, undone for the column scaling.
//!
//! ## Invariants
//!
//! * Solutions are only returned for full column rank.
//! * All columns have the same length as `y`.
//!
//! ## Non-goals
//!
//! * This module does not compute minimum-norm solutions of deficient systems.

use nalgebra::{DMatrix, DVector};
use num_traits::Float;

use crate::primitives::errors::SelectionError;

/// Relative floor for the rank tolerance.
const RANK_TOLERANCE_FLOOR: f64 = 1e-10;

/// Coefficients and unscaled variances of a full-rank least squares problem.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresSolution<T> {
    /// Coefficient for each column, in column order.
    pub coefficients: Vec<T>,

    /// Diagonal of `(X'X)^-1`, in column order.
    pub unscaled_variances: Vec<T>,
}

/// Solve the least squares problem for column-major `columns` and response `y`.
///
/// Fails with [`SelectionError::SingularMatrix`] when the columns are linearly
/// dependent or there are fewer rows than columns.
pub fn solve_least_squares<T: Float>(
    columns: &[Vec<T>],
    y: &[T],
) -> Result<LeastSquaresSolution<T>, SelectionError> {
    let n = y.len();
    let p = columns.len();

    if n < p {
        return Err(SelectionError::SingularMatrix {
            rank: n,
            columns: p,
        });
    }
    if p == 0 {
        return Ok(LeastSquaresSolution {
            coefficients: Vec::new(),
            unscaled_variances: Vec::new(),
        });
    }

    // Zero columns keep a unit scale and surface as a zero singular value.
    let scales: Vec<f64> = columns
        .iter()
        .map(|col| {
            let norm = col
                .iter()
                .fold(0.0, |acc, &v| acc + to_f64(v) * to_f64(v))
                .sqrt();
            if norm > 0.0 {
                norm
            } else {
                1.0
            }
        })
        .collect();

    let x = DMatrix::from_fn(n, p, |i, j| to_f64(columns[j][i]) / scales[j]);
    let rhs = DVector::from_iterator(n, y.iter().map(|&v| to_f64(v)));

    let svd = x
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or(SelectionError::SingularMatrix {
            rank: 0,
            columns: p,
        })?;

    let sigma_max = svd.singular_values.max();
    let tol = (f64::EPSILON * n.max(p) as f64).max(RANK_TOLERANCE_FLOOR) * sigma_max;
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&s| s.is_finite() && s > tol)
        .count();

    if rank < p {
        return Err(SelectionError::SingularMatrix { rank, columns: p });
    }

    let scaled = svd
        .solve(&rhs, tol)
        .map_err(|_| SelectionError::SingularMatrix { rank, columns: p })?;
    let v_t = svd
        .v_t
        .as_ref()
        .ok_or(SelectionError::SingularMatrix { rank, columns: p })?;

    let coefficients = (0..p)
        .map(|j| from_f64(scaled[j] / scales[j]))
        .collect();

    let unscaled_variances = (0..p)
        .map(|j| {
            let diag = svd
                .singular_values
                .iter()
                .enumerate()
                .fold(0.0, |acc, (k, &s)| acc + v_t[(k, j)] * v_t[(k, j)] / (s * s));
            from_f64(diag / (scales[j] * scales[j]))
        })
        .collect();

    Ok(LeastSquaresSolution {
        coefficients,
        unscaled_variances,
    })
}

#[inline]
fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[inline]
fn from_f64<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

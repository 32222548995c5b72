//! Terminal model produced when a selection run is finalized.
//!
//! ## Purpose
//!
//! This module defines [`FinalModel`], the regression fitted over the sorted
//! selected terms once selection has finished.
//!
//! ## Invariants
//!
//! * `terms` are sorted by canonical string and form a hierarchical set.
//! * `design` columns match `terms` (intercept first).
//! * The model is immutable once built.
//!
//! ## Non-goals
//!
//! * This module does not perform the fit (handled by the regression oracle).
//! * This module does not format reports (handled by `evaluation`).

use num_traits::Float;

use crate::algorithms::design::DesignMatrix;
use crate::algorithms::regression::OlsFit;
use crate::math::monomial::Monomial;
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::SelectionError;

/// Regression over the final selected term set.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalModel<T> {
    terms: Vec<Monomial>,
    design: DesignMatrix<T>,
    fit: OlsFit<T>,
}

impl<T: Float> FinalModel<T> {
    pub(crate) fn new(design: DesignMatrix<T>, fit: OlsFit<T>) -> Self {
        Self {
            terms: design.terms().to_vec(),
            design,
            fit,
        }
    }

    /// Selected terms in canonical order.
    pub fn terms(&self) -> &[Monomial] {
        &self.terms
    }

    /// Design matrix the model was fitted on.
    pub fn design(&self) -> &DesignMatrix<T> {
        &self.design
    }

    /// Fit statistics.
    pub fn fit(&self) -> &OlsFit<T> {
        &self.fit
    }

    /// Residuals of the final fit.
    pub fn residuals(&self) -> &[T] {
        &self.fit.residuals
    }

    /// Adjusted R² of the final fit.
    pub fn adj_r_squared(&self) -> T {
        self.fit.adj_r_squared
    }

    /// Predict the response for new base-variable data.
    pub fn predict(&self, data: &Dataset<T>) -> Result<Vec<T>, SelectionError> {
        let design = DesignMatrix::build(data, &self.terms)?;
        let mut out = vec![self.fit.intercept.estimate; data.n_rows()];
        for (term, stats) in &self.fit.terms {
            if let Some(column) = design.column(term) {
                for (o, &x) in out.iter_mut().zip(column) {
                    *o = *o + stats.estimate * x;
                }
            }
        }
        Ok(out)
    }
}

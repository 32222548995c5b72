//! Design matrix construction for polynomial terms.
//!
//! ## Purpose
//!
//! This module materialises the numeric regression columns for a list of
//! monomial terms over a base dataset, with an intercept column of ones in
//! front.
//!
//! ## Design notes
//!
//! * **Column order**: Intercept first, then terms exactly in caller order.
//! * **Storage**: Column-major, matching the least squares solver.
//! * **Evaluation**: Each term column is the elementwise product of its base
//!   columns raised to their exponents.
//!
//! ## Invariants
//!
//! * Every column has one entry per observation.
//! * Column `i + 1` holds the values of `terms()[i]`.
//!
//! ## Non-goals
//!
//! * This module does not deduplicate or sort terms (caller's responsibility).
//! * This module does not standardise or centre columns.

use num_traits::Float;

use crate::math::monomial::Monomial;
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::SelectionError;

/// Name reported for the intercept column.
pub const INTERCEPT_NAME: &str = "const";

/// Intercept column followed by one column per polynomial term.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix<T> {
    terms: Vec<Monomial>,
    columns: Vec<Vec<T>>,
}

impl<T: Float> DesignMatrix<T> {
    /// Intercept-only design with `n_rows` observations.
    pub fn intercept_only(n_rows: usize) -> Self {
        Self {
            terms: Vec::new(),
            columns: vec![vec![T::one(); n_rows]],
        }
    }

    /// Build the design for `terms` over `data`.
    pub fn build<'a, I>(data: &Dataset<T>, terms: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = &'a Monomial>,
    {
        let mut design = Self::intercept_only(data.n_rows());

        for term in terms {
            let column = Self::term_column(data, term)?;
            design.terms.push(term.clone());
            design.columns.push(column);
        }

        Ok(design)
    }

    /// Build the design from term strings, parsing each one first.
    pub fn from_keys<S: AsRef<str>>(data: &Dataset<T>, keys: &[S]) -> Result<Self, SelectionError> {
        let terms = keys
            .iter()
            .map(|k| Monomial::parse(k.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(data, &terms)
    }

    /// Values of a single term over the dataset.
    pub fn term_column(data: &Dataset<T>, term: &Monomial) -> Result<Vec<T>, SelectionError> {
        let mut column = vec![T::one(); data.n_rows()];

        for (var, exp) in term.powers() {
            let base = data
                .column(var)
                .ok_or_else(|| SelectionError::MissingVariable {
                    term: term.canonical().to_string(),
                    variable: var.to_string(),
                })?;

            let exp = i32::try_from(exp).map_err(|_| SelectionError::MalformedTerm {
                term: term.canonical().to_string(),
                reason: "exponent too large",
            })?;
            for (out, &v) in column.iter_mut().zip(base) {
                *out = *out * v.powi(exp);
            }
        }

        Ok(column)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.columns[0].len()
    }

    /// Number of columns, intercept included.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Terms in column order (intercept excluded).
    pub fn terms(&self) -> &[Monomial] {
        &self.terms
    }

    /// All columns, intercept first.
    pub fn columns(&self) -> &[Vec<T>] {
        &self.columns
    }

    /// Values of the given term, if it is part of the design.
    pub fn column(&self, term: &Monomial) -> Option<&[T]> {
        self.terms
            .iter()
            .position(|t| t == term)
            .map(|idx| self.columns[idx + 1].as_slice())
    }

    /// Column names, `const` first, then canonical term strings.
    pub fn column_names(&self) -> Vec<&str> {
        core::iter::once(INTERCEPT_NAME)
            .chain(self.terms.iter().map(Monomial::canonical))
            .collect()
    }
}

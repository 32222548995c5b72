//! Input validation for selector configuration and data.
//!
//! ## Purpose
//!
//! This module checks selector parameters and the base dataset/response pair
//! before a run starts.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validated variable names can always be embedded in canonical term strings.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not perform the selection itself.

use num_traits::Float;

use crate::math::monomial::{EXPONENT_MARKER, PRODUCT_MARKER};
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::SelectionError;

/// Validation utility for selector configuration and input data.
pub struct Validator;

impl Validator {
    /// Observations needed for the intercept-only baseline to have residual df.
    pub const MIN_OBSERVATIONS: usize = 2;

    // ========================================================================
    // Data Validation
    // ========================================================================

    /// Validate the base dataset and the response vector.
    pub fn validate_inputs<T: Float>(data: &Dataset<T>, y: &[T]) -> Result<(), SelectionError> {
        // Check 1: Non-empty data
        if data.is_empty() || y.is_empty() {
            return Err(SelectionError::EmptyInput);
        }

        // Check 2: Matching lengths
        let n = data.n_rows();
        if n != y.len() {
            return Err(SelectionError::MismatchedInputs {
                rows: n,
                response: y.len(),
            });
        }

        // Check 3: Enough observations for a baseline
        if n < Self::MIN_OBSERVATIONS {
            return Err(SelectionError::TooFewPoints {
                got: n,
                min: Self::MIN_OBSERVATIONS,
            });
        }

        // Check 4: Names usable inside term strings
        for name in data.names() {
            Self::validate_variable_name(name)?;
        }

        // Check 5: All values finite
        for (name, column) in data.iter() {
            if let Some(i) = column.iter().position(|v| !v.is_finite()) {
                return Err(SelectionError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    column[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(SelectionError::InvalidNumericValue(format!(
                "y[{}]={}",
                i,
                y[i].to_f64().unwrap_or(f64::NAN)
            )));
        }

        Ok(())
    }

    /// Validate that a variable name can be embedded in a canonical term string.
    pub fn validate_variable_name(name: &str) -> Result<(), SelectionError> {
        if name.trim().is_empty()
            || name.trim() != name
            || name.contains(PRODUCT_MARKER)
            || name.contains(EXPONENT_MARKER)
        {
            return Err(SelectionError::InvalidVariableName(name.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the maximum total degree of generated terms.
    pub fn validate_max_degree(max_degree: u32) -> Result<(), SelectionError> {
        if max_degree == 0 {
            return Err(SelectionError::InvalidMaxDegree(max_degree));
        }
        Ok(())
    }

    /// Validate the cap on the number of selected terms.
    pub fn validate_max_features(max_features: usize) -> Result<(), SelectionError> {
        if max_features == 0 {
            return Err(SelectionError::InvalidMaxFeatures(max_features));
        }
        Ok(())
    }

    /// Validate the coefficient significance threshold.
    pub fn validate_p_value_threshold<T: Float>(threshold: T) -> Result<(), SelectionError> {
        if !threshold.is_finite() || threshold <= T::zero() || threshold > T::one() {
            return Err(SelectionError::InvalidPValueThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the minimum adjusted R² gain required to commit a step.
    pub fn validate_improvement_threshold<T: Float>(threshold: T) -> Result<(), SelectionError> {
        if !threshold.is_finite() {
            return Err(SelectionError::InvalidImprovementThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), SelectionError> {
        if let Some(param) = duplicate_param {
            return Err(SelectionError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

//! Error types for hierarchical forward selection.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while parsing
//! polynomial terms, materialising design matrices, fitting regressions and
//! driving the selection state machine.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending term, variable or value.
//! * **Recoverable vs fatal**: Only [`SelectionError::SingularMatrix`] is ever
//!   absorbed (per candidate, by the engine). Everything else propagates.
//! * **Deferred**: Builder errors are detected when `build()` is called.
//!
//! ## Key concepts
//!
//! 1. **Term errors**: Malformed canonical strings, unknown base variables.
//! 2. **Numerical errors**: Rank-deficient design matrices.
//! 3. **Input validation**: Empty data, mismatched lengths, non-finite values.
//! 4. **Parameter validation**: Degree, feature cap and threshold bounds.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not decide which errors are recovered.

use core::fmt::{Display, Formatter, Result};
use std::error::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for selection operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// A term string does not follow the `var`, `var^k` factor syntax.
    MalformedTerm {
        /// The offending term string.
        term: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A term references a variable that is not a column of the base dataset.
    MissingVariable {
        /// Canonical form of the term being materialised.
        term: String,
        /// The variable that could not be found.
        variable: String,
    },

    /// The design matrix is rank-deficient (collinear columns).
    SingularMatrix {
        /// Numerical rank detected during the decomposition.
        rank: usize,
        /// Number of columns in the design matrix (intercept included).
        columns: usize,
    },

    /// The base dataset has no columns or no rows.
    EmptyInput,

    /// Response length does not match the number of observations.
    MismatchedInputs {
        /// Number of rows in the base dataset.
        rows: usize,
        /// Number of elements in the response vector.
        response: usize,
    },

    /// Fewer observations than the intercept-only baseline needs.
    TooFewPoints {
        /// Number of observations provided.
        got: usize,
        /// Minimum required observations.
        min: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// A column's length differs from the columns already in the dataset.
    RaggedColumn {
        /// Name of the offending column.
        name: String,
        /// Row count of the existing columns.
        expected: usize,
        /// Length of the offending column.
        got: usize,
    },

    /// Variable name is empty or contains a reserved term marker (`*`, `^`).
    InvalidVariableName(String),

    /// The same variable name was given to more than one column.
    DuplicateVariable(String),

    /// Maximum total degree must be at least 1.
    InvalidMaxDegree(u32),

    /// Maximum number of selected features must be at least 1.
    InvalidMaxFeatures(usize),

    /// Significance threshold must be finite and in (0, 1].
    InvalidPValueThreshold(f64),

    /// Minimum adjusted R² improvement must be finite.
    InvalidImprovementThreshold(f64),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// `step` or `run` was called before `initialize`.
    NotInitialized,
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::MalformedTerm { term, reason } => {
                write!(f, "Malformed term '{term}': {reason}")
            }
            Self::MissingVariable { term, variable } => {
                write!(
                    f,
                    "Term '{term}' references unknown variable '{variable}'"
                )
            }
            Self::SingularMatrix { rank, columns } => {
                write!(
                    f,
                    "Singular design matrix: rank {rank} with {columns} columns"
                )
            }
            Self::EmptyInput => write!(f, "Input data is empty"),
            Self::MismatchedInputs { rows, response } => {
                write!(
                    f,
                    "Length mismatch: data has {rows} rows, response has {response}"
                )
            }
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::RaggedColumn {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Column '{name}' has {got} rows, expected {expected}"
                )
            }
            Self::InvalidVariableName(name) => {
                write!(
                    f,
                    "Invalid variable name '{name}' (must be non-empty and contain neither '*' nor '^')"
                )
            }
            Self::DuplicateVariable(name) => write!(f, "Duplicate variable '{name}'"),
            Self::InvalidMaxDegree(d) => {
                write!(f, "Invalid max_degree: {d} (must be >= 1)")
            }
            Self::InvalidMaxFeatures(n) => {
                write!(f, "Invalid max_features: {n} (must be >= 1)")
            }
            Self::InvalidPValueThreshold(p) => {
                write!(f, "Invalid p_value_threshold: {p} (must be > 0 and <= 1)")
            }
            Self::InvalidImprovementThreshold(v) => {
                write!(f, "Invalid min_adj_r2_improvement: {v} (must be finite)")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::NotInitialized => {
                write!(f, "Selector has not been initialized with data")
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for SelectionError {}

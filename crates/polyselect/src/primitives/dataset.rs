//! Named numeric columns holding the base variables.
//!
//! ## Purpose
//!
//! This module provides [`Dataset`], the tabular container the selector reads
//! base-variable values from. Columns are stored in insertion order and
//! addressed by name.
//!
//! ## Invariants
//!
//! * Every column has the same number of rows.
//! * Column names are unique, non-empty and carry no surrounding whitespace.
//!
//! ## Non-goals
//!
//! * This module does not check values for finiteness or names for term
//!   markers (handled by `validator`).
//! * This module does not encode categorical data.

use num_traits::Float;

use crate::primitives::errors::SelectionError;

/// Base-variable table: named columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    names: Vec<String>,
    columns: Vec<Vec<T>>,
}

impl<T: Float> Default for Dataset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Dataset<T> {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Build a dataset from `(name, values)` pairs.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = (S, Vec<T>)>,
        S: Into<String>,
    {
        let mut data = Self::new();
        for (name, values) in columns {
            data.push_column(name, values)?;
        }
        Ok(data)
    }

    /// Append a column, consuming and returning the dataset.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<T>,
    ) -> Result<Self, SelectionError> {
        self.push_column(name, values)?;
        Ok(self)
    }

    /// Append a column in place.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<T>,
    ) -> Result<(), SelectionError> {
        let name = name.into();

        if name.trim().is_empty() || name.trim() != name {
            return Err(SelectionError::InvalidVariableName(name));
        }

        if self.names.iter().any(|n| *n == name) {
            return Err(SelectionError::DuplicateVariable(name));
        }

        if let Some(first) = self.columns.first() {
            if first.len() != values.len() {
                return Err(SelectionError::RaggedColumn {
                    name,
                    expected: first.len(),
                    got: values.len(),
                });
            }
        }

        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Number of observations (0 when there are no columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of base variables.
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// True when the dataset has no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.n_columns() == 0 || self.n_rows() == 0
    }

    /// Column names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values of the named column.
    pub fn column(&self, name: &str) -> Option<&[T]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Iterate over `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}

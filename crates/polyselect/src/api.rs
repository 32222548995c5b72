//! High-level API for hierarchical forward selection.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the selection parameters that ends in a ready-to-run
//! [`Selector`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Pluggable**: `.build_with_oracle()` swaps the least-squares oracle for
//!   any [`RegressionOracle`].
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`SelectorBuilder`] via `HierarchicalSelector::new()`.
//! 2. Chain configuration methods (`.max_degree()`, `.p_value_threshold()`, etc.).
//! 3. Call `.build()` to get a [`Selector`], then `.fit(data, y)`.

use num_traits::Float;

use crate::engine::executor::SelectorConfig;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::design::DesignMatrix;
pub use crate::algorithms::regression::{CoefficientStats, LeastSquares, OlsFit, RegressionOracle};
pub use crate::engine::executor::Selector;
pub use crate::engine::output::FinalModel;
pub use crate::engine::state::{Phase, SelectionState, StepRecord, StopReason};
pub use crate::evaluation::residuals::{
    CsvRenderer, GridLayout, ResidualPanel, ResidualPlot, ResidualRenderer,
};
pub use crate::evaluation::summary::Summary;
pub use crate::math::monomial::Monomial;
pub use crate::primitives::dataset::Dataset;
pub use crate::primitives::errors::SelectionError;

/// Fluent builder for configuring a hierarchical forward selector.
#[derive(Debug, Clone)]
pub struct SelectorBuilder<T> {
    /// Upper bound on the total degree of generated terms (default: 3).
    pub max_degree: Option<u32>,

    /// Hard cap on the number of selected terms (default: 20).
    pub max_features: Option<usize>,

    /// Significance threshold for a candidate's coefficient (default: 0.05).
    pub p_value_threshold: Option<T>,

    /// Minimum adjusted R² gain needed to commit a step (default: 0.002).
    pub min_adj_r2_improvement: Option<T>,

    /// Narrate progress through the `log` facade (default: false).
    pub verbose: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SelectorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SelectorBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            max_degree: None,
            max_features: None,
            p_value_threshold: None,
            min_adj_r2_improvement: None,
            verbose: None,
            duplicate_param: None,
        }
    }

    /// Set the maximum total degree of generated terms.
    pub fn max_degree(mut self, max_degree: u32) -> Self {
        if self.max_degree.is_some() {
            self.duplicate_param = Some("max_degree");
        }
        self.max_degree = Some(max_degree);
        self
    }

    /// Set the maximum number of selected terms.
    pub fn max_features(mut self, max_features: usize) -> Self {
        if self.max_features.is_some() {
            self.duplicate_param = Some("max_features");
        }
        self.max_features = Some(max_features);
        self
    }

    /// Set the significance threshold a candidate's p-value must stay below.
    pub fn p_value_threshold(mut self, threshold: T) -> Self {
        if self.p_value_threshold.is_some() {
            self.duplicate_param = Some("p_value_threshold");
        }
        self.p_value_threshold = Some(threshold);
        self
    }

    /// Set the minimum adjusted R² gain needed to commit a step.
    pub fn min_adj_r2_improvement(mut self, improvement: T) -> Self {
        if self.min_adj_r2_improvement.is_some() {
            self.duplicate_param = Some("min_adj_r2_improvement");
        }
        self.min_adj_r2_improvement = Some(improvement);
        self
    }

    /// Log selection progress at `info` level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if self.verbose.is_some() {
            self.duplicate_param = Some("verbose");
        }
        self.verbose = Some(verbose);
        self
    }

    /// Resolve defaults and validate the configuration.
    pub fn config(&self) -> Result<SelectorConfig<T>, SelectionError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = SelectorConfig::default();
        let config = SelectorConfig {
            max_degree: self.max_degree.unwrap_or(defaults.max_degree),
            max_features: self.max_features.unwrap_or(defaults.max_features),
            p_value_threshold: self.p_value_threshold.unwrap_or(defaults.p_value_threshold),
            min_adj_r2_improvement: self
                .min_adj_r2_improvement
                .unwrap_or(defaults.min_adj_r2_improvement),
            verbose: self.verbose.unwrap_or(defaults.verbose),
        };

        config.validate()?;
        Ok(config)
    }

    /// Build a selector backed by ordinary least squares.
    pub fn build(self) -> Result<Selector<T, LeastSquares>, SelectionError>
    where
        T: core::fmt::Debug,
    {
        self.build_with_oracle(LeastSquares)
    }

    /// Build a selector backed by a custom regression oracle.
    pub fn build_with_oracle<O>(self, oracle: O) -> Result<Selector<T, O>, SelectionError>
    where
        T: core::fmt::Debug,
        O: RegressionOracle<T>,
    {
        let config = self.config()?;
        Selector::new(config, oracle)
    }
}

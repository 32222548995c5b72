//! Stepwise execution engine for hierarchical forward selection.
//!
//! ## Purpose
//!
//! This module provides [`Selector`], the state machine that grows a
//! polynomial regression model one term per step while enforcing the
//! hierarchy principle: a term only ever enters together with all of its
//! divisors.
//!
//! ## Design notes
//!
//! * **Step-by-step**: `initialize`, repeated `step`, then `finalize`; `run` and
//!   `fit` chain them for callers that do not need to pause.
//! * **Deterministic scan**: Candidates are evaluated in lexicographic order of
//!   their canonical strings; ties keep the first candidate found.
//! * **Local recovery**: A singular candidate design is skipped for the
//!   current step. Every other error propagates.
//! * **Pluggable fitting**: Models are fitted through a [`RegressionOracle`].
//!
//! ## Key concepts
//!
//! * **Required divisors**: Evaluating a candidate tentatively adds every
//!   divisor of it (itself included) to the current selection.
//! * **Gates**: A candidate qualifies when its own p-value is strictly below
//!   the threshold and the tentative adjusted R² strictly beats the best so far.
//! * **Commit**: The winner is kept only if its gain reaches the minimum
//!   improvement; its divisors move from the pool into the selection.
//! * **Candidate generation**: The winner times each base variable, bounded by
//!   `max_degree`.
//!
//! ## Invariants
//!
//! * The selected set is closed under divisors after every step.
//! * Every pooled candidate has total degree at most `max_degree`.
//! * The best adjusted R² never decreases.
//! * `Complete` is left only through `initialize`.
//!
//! ## Non-goals
//!
//! * This module does not perform backward elimination.
//! * This module does not evaluate candidates in parallel.
//! * This module does not format reports (handled by `evaluation`).

use core::fmt::Debug;
use std::collections::BTreeSet;

use log::{debug, info, warn};
use num_traits::Float;

use crate::algorithms::design::DesignMatrix;
use crate::algorithms::regression::{LeastSquares, RegressionOracle};
use crate::engine::output::FinalModel;
use crate::engine::state::{Phase, SelectionState, StepRecord, StopReason};
use crate::engine::validator::Validator;
use crate::evaluation::residuals::{ResidualPlot, ResidualRenderer};
use crate::evaluation::summary::Summary;
use crate::math::monomial::Monomial;
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::SelectionError;

// ============================================================================
// Configuration
// ============================================================================

/// Validated selector parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig<T> {
    /// Upper bound on the total degree of generated terms.
    pub max_degree: u32,

    /// Hard cap on the number of selected terms.
    pub max_features: usize,

    /// A candidate's p-value must be strictly below this.
    pub p_value_threshold: T,

    /// Minimum adjusted R² gain needed to commit a step.
    pub min_adj_r2_improvement: T,

    /// Narrate progress through the `log` facade.
    pub verbose: bool,
}

impl<T: Float> Default for SelectorConfig<T> {
    fn default() -> Self {
        Self {
            max_degree: 3,
            max_features: 20,
            p_value_threshold: T::from(0.05).unwrap(),
            min_adj_r2_improvement: T::from(0.002).unwrap(),
            verbose: false,
        }
    }
}

impl<T: Float> SelectorConfig<T> {
    /// Check every parameter against its bounds.
    pub fn validate(&self) -> Result<(), SelectionError> {
        Validator::validate_max_degree(self.max_degree)?;
        Validator::validate_max_features(self.max_features)?;
        Validator::validate_p_value_threshold(self.p_value_threshold)?;
        Validator::validate_improvement_threshold(self.min_adj_r2_improvement)?;
        Ok(())
    }
}

// ============================================================================
// Run Inputs
// ============================================================================

/// Data a run was initialized with.
#[derive(Debug, Clone)]
struct RunInputs<T> {
    data: Dataset<T>,
    response: Vec<T>,
    base_terms: Vec<Monomial>,
}

/// Best candidate found during one evaluation pass.
struct Winner<T> {
    candidate: Monomial,
    adj_r_squared: T,
    p_value: T,
}

// ============================================================================
// Selector
// ============================================================================

/// Hierarchy-constrained forward selector over polynomial terms.
#[derive(Debug, Clone)]
pub struct Selector<T, O = LeastSquares> {
    config: SelectorConfig<T>,
    oracle: O,
    inputs: Option<RunInputs<T>>,
    state: SelectionState<T>,
    selected_features: Vec<Monomial>,
    final_model: Option<FinalModel<T>>,
}

impl<T, O> Selector<T, O>
where
    T: Float + Debug,
    O: RegressionOracle<T>,
{
    /// Create a selector from a configuration and an oracle.
    ///
    /// Fails if any parameter of `config` is out of range.
    pub fn new(config: SelectorConfig<T>, oracle: O) -> Result<Self, SelectionError> {
        config.validate()?;
        Ok(Self {
            config,
            oracle,
            inputs: None,
            state: SelectionState::new(),
            selected_features: Vec::new(),
            final_model: None,
        })
    }

    // ========================================================================
    // State Machine
    // ========================================================================

    /// Reset the selector for a new run on `data` and `response`.
    ///
    /// The candidate pool starts as the base variables, nothing is selected,
    /// and the best score is the adjusted R² of the intercept-only model.
    pub fn initialize(&mut self, data: Dataset<T>, response: Vec<T>) -> Result<(), SelectionError> {
        Validator::validate_inputs(&data, &response)?;

        let base_terms: Vec<Monomial> = data.names().iter().map(Monomial::variable).collect();
        let baseline = self
            .oracle
            .fit(&DesignMatrix::intercept_only(data.n_rows()), &response)?;

        self.state
            .reset(base_terms.iter().cloned(), baseline.adj_r_squared);
        self.selected_features.clear();
        self.final_model = None;
        self.inputs = Some(RunInputs {
            data,
            response,
            base_terms,
        });

        if self.config.verbose {
            info!("Starting hierarchical forward selection");
            info!(
                " - max degree: {}, max features: {}",
                self.config.max_degree, self.config.max_features
            );
            info!(
                " - p-value threshold: {:?}, min adjusted R² improvement: {:?}",
                self.config.p_value_threshold, self.config.min_adj_r2_improvement
            );
            info!(
                "Intercept-only model: adjusted R² = {:?}",
                baseline.adj_r_squared
            );
        }

        Ok(())
    }

    /// Run one selection step.
    ///
    /// Returns `Ok(true)` when a candidate was committed and `Ok(false)` when
    /// the selection is (or has just become) complete.
    pub fn step(&mut self) -> Result<bool, SelectionError> {
        if self.state.phase() == Phase::Uninitialized {
            return Err(SelectionError::NotInitialized);
        }

        if self.state.is_complete() {
            if self.config.verbose {
                info!("Selection already complete");
            }
            return Ok(false);
        }

        let n_selected = self.state.selected().len();
        if n_selected >= self.config.max_features {
            if self.config.verbose {
                info!("Reached the limit of {n_selected} features, stopping");
            }
            self.state.stop(StopReason::FeatureCap {
                selected: n_selected,
            });
            return Ok(false);
        }

        if self.config.verbose {
            info!(
                "Step {}: evaluating {} candidates",
                self.state.step_count() + 1,
                self.state.candidates().len()
            );
        }

        let Some(winner) = self.evaluate_candidates()? else {
            if self.config.verbose {
                info!("No qualifying candidate found, stopping");
            }
            self.state.stop(StopReason::NoQualifyingCandidate);
            return Ok(false);
        };

        let improvement = winner.adj_r_squared - self.state.best_adj_r2();
        if improvement < self.config.min_adj_r2_improvement {
            if self.config.verbose {
                info!("Insufficient improvement (+{improvement:?}), stopping");
            }
            self.state
                .stop(StopReason::InsufficientImprovement { improvement });
            return Ok(false);
        }

        // Commit: the winner and everything it depends on.
        let divisors = winner.candidate.divisors();
        let added = self.state.promote(&divisors, winner.adj_r_squared);

        if self.config.verbose {
            info!(
                "Best candidate '{}': adding {} terms",
                winner.candidate,
                added.len()
            );
            info!(
                "   New adjusted R²: {:?} (improvement: +{:?})",
                winner.adj_r_squared, improvement
            );
        }

        let generated = self.generate_candidates(&winner.candidate)?;

        if self.config.verbose {
            info!("   Generated {} new candidates", generated.len());
        }

        let step = self.state.step_count() + 1;
        self.state.record_step(StepRecord {
            step,
            candidate: winner.candidate,
            added,
            adj_r_squared: winner.adj_r_squared,
            improvement,
            p_value: winner.p_value,
            generated,
        });

        Ok(true)
    }

    /// Step until no progress is made, then finalize.
    pub fn run(&mut self) -> Result<(), SelectionError> {
        while self.step()? {}
        self.finalize()
    }

    /// Initialize on `data` and `response`, then run to completion.
    pub fn fit(&mut self, data: Dataset<T>, response: Vec<T>) -> Result<&Self, SelectionError> {
        self.initialize(data, response)?;
        self.run()?;
        Ok(self)
    }

    /// Freeze the selection and fit the terminal model.
    ///
    /// An empty selection is a valid outcome and leaves the final model unset.
    /// If the terminal fit fails, the selector is left exactly as it was.
    pub fn finalize(&mut self) -> Result<(), SelectionError> {
        let inputs = self.inputs.as_ref().ok_or(SelectionError::NotInitialized)?;

        let selected: Vec<Monomial> = self.state.selected().iter().cloned().collect();

        if self.config.verbose {
            info!("Selection complete");
        }

        let final_model = if selected.is_empty() {
            if self.config.verbose {
                info!("No features were selected");
            }
            None
        } else {
            if self.config.verbose {
                let names: Vec<&str> = selected.iter().map(Monomial::canonical).collect();
                info!("Selected terms: {names:?}");
            }

            let design = DesignMatrix::build(&inputs.data, &selected)?;
            let fit = self.oracle.fit(&design, &inputs.response)?;
            Some(FinalModel::new(design, fit))
        };

        self.selected_features = selected;
        self.final_model = final_model;
        self.state.seal();
        Ok(())
    }

    // ========================================================================
    // Step Internals
    // ========================================================================

    /// Scan the pool in canonical order and return the best qualifying candidate.
    fn evaluate_candidates(&self) -> Result<Option<Winner<T>>, SelectionError> {
        let inputs = self.inputs.as_ref().ok_or(SelectionError::NotInitialized)?;
        let selected = self.state.selected();

        let mut best: Option<Winner<T>> = None;
        let mut best_score = self.state.best_adj_r2();

        for candidate in self.state.candidates() {
            let required = candidate.divisors();
            let tentative: BTreeSet<&Monomial> = selected.iter().chain(required.iter()).collect();

            let design = DesignMatrix::build(&inputs.data, tentative.iter().copied())?;
            let fit = match self.oracle.fit(&design, &inputs.response) {
                Ok(fit) => fit,
                Err(SelectionError::SingularMatrix { rank, columns }) => {
                    debug!(
                        "Skipping '{candidate}': singular design (rank {rank} of {columns})"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(p_value) = fit.p_value(candidate) else {
                continue;
            };

            // Strict comparisons keep the first of equally good candidates.
            if fit.adj_r_squared > best_score && p_value < self.config.p_value_threshold {
                best_score = fit.adj_r_squared;
                best = Some(Winner {
                    candidate: candidate.clone(),
                    adj_r_squared: fit.adj_r_squared,
                    p_value,
                });
            }
        }

        Ok(best)
    }

    /// Pool `winner * v` for every base variable `v` within the degree bound.
    fn generate_candidates(&mut self, winner: &Monomial) -> Result<Vec<Monomial>, SelectionError> {
        let inputs = self.inputs.as_ref().ok_or(SelectionError::NotInitialized)?;

        let mut generated = Vec::new();
        for base in &inputs.base_terms {
            let candidate = winner.combine(base)?;
            if candidate.total_degree() <= self.config.max_degree
                && self.state.offer_candidate(candidate.clone())
            {
                generated.push(candidate);
            }
        }
        Ok(generated)
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Textual summary of the terminal model.
    pub fn summary(&self) -> Summary<'_, T> {
        match (&self.final_model, self.state.is_fitted()) {
            (Some(model), _) => Summary::Model(model.fit()),
            (None, true) => Summary::NoFeatures,
            (None, false) => Summary::NotFitted,
        }
    }

    /// Residual-versus-term panels for the terminal model.
    ///
    /// Returns `None` (with a warning) when no model has been fitted.
    pub fn residual_plot(&self) -> Option<ResidualPlot<T>> {
        match &self.final_model {
            Some(model) => Some(ResidualPlot::from_fit(model.design(), model.fit())),
            None => {
                warn!("The model must be fitted before residuals can be plotted");
                None
            }
        }
    }

    /// Hand the residual panels to `renderer`.
    ///
    /// Returns `Ok(false)` without rendering when no model has been fitted.
    pub fn plot_residuals<R>(&self, renderer: &mut R) -> Result<bool, R::Error>
    where
        R: ResidualRenderer<T>,
    {
        match self.residual_plot() {
            Some(plot) => {
                renderer.render(&plot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Selector parameters.
    pub fn config(&self) -> &SelectorConfig<T> {
        &self.config
    }

    /// Regression oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Current selection state.
    pub fn state(&self) -> &SelectionState<T> {
        &self.state
    }

    /// Sorted selected terms, available after `finalize`.
    pub fn selected_features(&self) -> &[Monomial] {
        &self.selected_features
    }

    /// Terminal model, if any term was selected.
    pub fn final_model(&self) -> Option<&FinalModel<T>> {
        self.final_model.as_ref()
    }
}

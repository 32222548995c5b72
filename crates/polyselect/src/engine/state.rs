//! Selection state for one forward-selection run.
//!
//! ## Purpose
//!
//! This module defines [`SelectionState`], everything the stepwise engine
//! knows about the run in progress: lifecycle phase, committed steps, the
//! selected terms, the candidate pool and the best adjusted R² so far.
//!
//! ## Design notes
//!
//! * **Ownership**: The state is held by the selector and mutated only by its
//!   `initialize`, `step` and `finalize` operations; callers get read access.
//! * **Ordering**: Term sets are `BTreeSet<Monomial>`, which iterate in
//!   lexicographic order of canonical strings (the candidate scan order).
//!
//! ## Invariants
//!
//! * `selected` and `candidates` are disjoint.
//! * `selected` only grows within a run.
//! * `best_adj_r2` is non-decreasing across committed steps.
//!
//! ## Non-goals
//!
//! * This module does not evaluate candidates or fit models.

use std::collections::BTreeSet;

use num_traits::Float;

use crate::math::monomial::Monomial;

// ============================================================================
// Lifecycle
// ============================================================================

/// Lifecycle phase of the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No data has been supplied yet.
    #[default]
    Uninitialized,

    /// Initialized; no step has been committed.
    Ready,

    /// At least one step has been committed.
    Stepping,

    /// Terminal: no further step can make progress.
    Complete,
}

/// Why `step` marked the selection complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason<T> {
    /// The number of selected terms reached `max_features`.
    FeatureCap {
        /// Number of selected terms at the time of stopping.
        selected: usize,
    },

    /// No candidate was both significant and an improvement.
    NoQualifyingCandidate,

    /// The best candidate improved adjusted R² by less than the threshold.
    InsufficientImprovement {
        /// Adjusted R² gain of the discarded winner.
        improvement: T,
    },
}

/// Record of one committed step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord<T> {
    /// 1-based index of the committed step.
    pub step: usize,

    /// Winning candidate.
    pub candidate: Monomial,

    /// Terms newly added to the selection (divisors not already selected).
    pub added: Vec<Monomial>,

    /// Adjusted R² after the step.
    pub adj_r_squared: T,

    /// Adjusted R² gain over the previous best.
    pub improvement: T,

    /// p-value of the winning candidate's coefficient.
    pub p_value: T,

    /// Candidates generated from the winner.
    pub generated: Vec<Monomial>,
}

// ============================================================================
// Selection State
// ============================================================================

/// Mutable state of one selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState<T> {
    phase: Phase,
    step_count: usize,
    selected: BTreeSet<Monomial>,
    candidates: BTreeSet<Monomial>,
    best_adj_r2: T,
    fitted: bool,
    stop_reason: Option<StopReason<T>>,
    history: Vec<StepRecord<T>>,
}

impl<T: Float> Default for SelectionState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SelectionState<T> {
    /// Uninitialized state.
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            step_count: 0,
            selected: BTreeSet::new(),
            candidates: BTreeSet::new(),
            best_adj_r2: T::neg_infinity(),
            fitted: false,
            stop_reason: None,
            history: Vec::new(),
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Start a fresh run with the given base terms and baseline score.
    pub(crate) fn reset<I>(&mut self, base_terms: I, baseline_adj_r2: T)
    where
        I: IntoIterator<Item = Monomial>,
    {
        *self = Self::new();
        self.candidates = base_terms.into_iter().collect();
        self.best_adj_r2 = baseline_adj_r2;
        self.phase = Phase::Ready;
    }

    /// Mark the run complete from `step`.
    pub(crate) fn stop(&mut self, reason: StopReason<T>) {
        self.phase = Phase::Complete;
        self.stop_reason = Some(reason);
    }

    /// Promote the winner's divisors into the selection.
    ///
    /// Returns the terms that were not selected before.
    pub(crate) fn promote(&mut self, divisors: &BTreeSet<Monomial>, adj_r2: T) -> Vec<Monomial> {
        self.best_adj_r2 = adj_r2;

        let mut added = Vec::new();
        for term in divisors {
            self.candidates.remove(term);
            if self.selected.insert(term.clone()) {
                added.push(term.clone());
            }
        }
        added
    }

    /// Add a candidate if it is neither selected nor already pooled.
    pub(crate) fn offer_candidate(&mut self, term: Monomial) -> bool {
        if self.selected.contains(&term) || self.candidates.contains(&term) {
            return false;
        }
        self.candidates.insert(term)
    }

    /// Close a committed step.
    pub(crate) fn record_step(&mut self, record: StepRecord<T>) {
        self.step_count += 1;
        self.phase = Phase::Stepping;
        self.history.push(record);
    }

    /// Seal the run after the terminal model has been built.
    pub(crate) fn seal(&mut self) {
        self.phase = Phase::Complete;
        self.fitted = true;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once the state machine reached its terminal phase.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// True once `finalize` has run.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Number of committed steps.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Terms currently in the model, in canonical order.
    pub fn selected(&self) -> &BTreeSet<Monomial> {
        &self.selected
    }

    /// Terms eligible for the next step, in canonical order.
    pub fn candidates(&self) -> &BTreeSet<Monomial> {
        &self.candidates
    }

    /// Best adjusted R² committed so far (the baseline before any step).
    pub fn best_adj_r2(&self) -> T {
        self.best_adj_r2
    }

    /// Reason the run stopped, if `step` stopped it.
    pub fn stop_reason(&self) -> Option<&StopReason<T>> {
        self.stop_reason.as_ref()
    }

    /// Committed steps in order.
    pub fn history(&self) -> &[StepRecord<T>] {
        &self.history
    }

    /// True when every selected term has all of its divisors selected.
    pub fn is_hierarchical(&self) -> bool {
        self.selected
            .iter()
            .all(|term| term.divisors().iter().all(|d| self.selected.contains(d)))
    }
}

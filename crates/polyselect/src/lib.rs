//! # polyselect — Hierarchical Forward Selection of Polynomial Terms
//!
//! Stepwise forward selection of polynomial regression terms under the
//! hierarchy principle: a product term such as `x^2*y` only enters the model
//! together with every term it is built from (`x`, `x^2`, `y`, `x*y`).
//!
//! ## How it works
//!
//! Starting from the intercept-only model, every step tentatively adds each
//! candidate term (plus its missing divisors), fits an ordinary least squares
//! model and keeps the candidate that raises adjusted R² the most while its own
//! coefficient stays significant. The winner's products with each base
//! variable then become new candidates, up to a maximum total degree. Selection
//! stops when the feature cap is reached, no candidate qualifies, or the gain
//! drops below a minimum improvement.
//!
//! ## Quick Start
//!
//! ```rust
//! use polyselect::prelude::*;
//!
//! let x: Vec<f64> = (0..40).map(|i| i as f64 / 10.0).collect();
//! let z: Vec<f64> = (0..40).map(|i| ((i * 7) % 11) as f64 / 5.0).collect();
//! let y: Vec<f64> = x
//!     .iter()
//!     .zip(&z)
//!     .enumerate()
//!     .map(|(i, (&x, &z))| 1.0 + 2.0 * x + 1.5 * x * z + 0.05 * (i as f64 * 1.3).sin())
//!     .collect();
//!
//! let data = Dataset::from_columns([("x", x), ("z", z)])?;
//!
//! let mut selector = HierarchicalSelector::new()
//!     .max_degree(2)
//!     .p_value_threshold(0.05)
//!     .build()?;
//!
//! selector.fit(data, y)?;
//!
//! let names: Vec<&str> = selector
//!     .selected_features()
//!     .iter()
//!     .map(Monomial::canonical)
//!     .collect();
//! assert!(names.contains(&"x*z"));
//! assert!(names.contains(&"x") && names.contains(&"z"));
//!
//! println!("{}", selector.summary());
//! # Result::<(), SelectionError>::Ok(())
//! ```
//!
//! ### Stepping manually
//!
//! ```rust
//! use polyselect::prelude::*;
//! # let x: Vec<f64> = (0..30).map(|i| i as f64 / 6.0).collect();
//! # let y: Vec<f64> = x.iter().map(|&x| 3.0 * x + 0.1 * (x * 5.0).sin()).collect();
//!
//! let mut selector = HierarchicalSelector::new().build()?;
//! selector.initialize(Dataset::from_columns([("x", x)])?, y)?;
//!
//! while selector.step()? {
//!     if let Some(record) = selector.state().history().last() {
//!         println!("step {}: added {}", record.step, record.candidate);
//!     }
//! }
//! selector.finalize()?;
//!
//! assert!(selector.state().is_complete());
//! # Result::<(), SelectionError>::Ok(())
//! ```
//!
//! ## Terms
//!
//! Terms are monomials over the base variables written as `*`-separated
//! factors, each `var` or `var^k`. Their canonical form sorts factors by
//! variable name and omits exponent 1, so `y*x^2` and `x^2*y` are the same
//! term:
//!
//! ```rust
//! use polyselect::prelude::*;
//!
//! let term = Monomial::parse("y * x^2")?;
//! assert_eq!(term.canonical(), "x^2*y");
//! assert_eq!(term.total_degree(), 3);
//! assert_eq!(term.divisors().len(), 5);
//! # Result::<(), SelectionError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! Progress is reported through the [`log`](https://docs.rs/log) facade when
//! `verbose(true)` is set; install any logger to see it.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - monomial algebra, special functions, linear algebra.
mod math;

// Layer 3: Algorithms - design matrices and regression fitting.
mod algorithms;

// Layer 4: Evaluation - summaries and residual diagnostics.
mod evaluation;

// Layer 5: Engine - the selection state machine.
mod engine;

// High-level fluent API.
mod api;

// Standard prelude.
pub mod prelude {
    pub use crate::api::{
        CoefficientStats, CsvRenderer, Dataset, DesignMatrix, FinalModel, GridLayout,
        LeastSquares, Monomial, OlsFit, Phase, RegressionOracle, ResidualPanel, ResidualPlot,
        ResidualRenderer, SelectionError, SelectionState, Selector,
        SelectorBuilder as HierarchicalSelector, StepRecord, StopReason, Summary,
    };
    pub use crate::engine::executor::SelectorConfig;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

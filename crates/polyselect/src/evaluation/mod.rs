//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer provides read-only reporting on a finalized selection: the
//! regression summary table and residual diagnostics.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Regression results table.
pub mod summary;

/// Residual-versus-term diagnostics.
pub mod residuals;

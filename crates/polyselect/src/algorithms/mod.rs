//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer turns terms and data into numbers: design matrix construction
//! and the regression oracle the selection engine fits candidates through.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Design matrix construction.
pub mod design;

/// Regression oracle contract and least squares fit.
pub mod regression;

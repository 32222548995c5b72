//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical building blocks: the monomial term
//! algebra, the special functions behind significance tests, and a dense
//! least squares solver.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Canonical polynomial terms and their divisors.
pub mod monomial;

/// Gamma, incomplete beta, Student-t and F tail functions.
pub mod special;

/// SVD least squares with rank detection.
pub mod linalg;

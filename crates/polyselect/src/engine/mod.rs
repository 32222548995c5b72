//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the selection run: parameter and data validation,
//! the selection state, the stepwise state machine and the terminal model.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Stepwise selection state machine.
pub mod executor;

/// Terminal model.
pub mod output;

/// Selection run state.
pub mod state;

/// Parameter and data validation.
pub mod validator;

//! Monomial algebra for polynomial regression terms.
//!
//! ## Purpose
//!
//! This module provides [`Monomial`], the canonical representation of a
//! polynomial term as a product of base variables raised to positive integer
//! powers, together with the operations the selection engine needs: parsing,
//! canonical formatting, total degree, exponent-wise combination and divisor
//! enumeration.
//!
//! ## Design notes
//!
//! * **Canonical key**: Variables are kept sorted by name; exponent 1 is
//!   rendered bare and higher exponents as `var^k`, factors joined by `*`.
//! * **Identity**: Equality, hashing and ordering all use the canonical key, so
//!   sets of monomials iterate in lexicographic order of their strings.
//! * **Divisors**: Enumerated with an odometer over per-variable exponent
//!   ranges; no recursion.
//!
//! ## Key concepts
//!
//! * **Total degree**: Sum of all exponents.
//! * **Divisor**: Any non-empty monomial obtained by independently lowering
//!   exponents. A monomial is one of its own divisors.
//! * **Combination**: Exponent-wise addition, i.e. the product of two terms.
//!
//! ## Invariants
//!
//! * Zero exponents are never stored.
//! * `Monomial::parse(m.canonical())` reproduces `m` exactly.
//!
//! ## Non-goals
//!
//! * This module does not evaluate terms on data (handled by `design`).
//! * This module does not represent coefficients or full polynomials.

use core::cmp::Ordering;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::collections::{BTreeMap, BTreeSet};

use crate::primitives::errors::SelectionError;

/// Separator between the factors of a canonical term string.
pub const PRODUCT_MARKER: char = '*';

/// Separator between a variable and its exponent.
pub const EXPONENT_MARKER: char = '^';

// ============================================================================
// Monomial
// ============================================================================

/// A product of base variables raised to positive integer powers.
#[derive(Debug, Clone)]
pub struct Monomial {
    powers: BTreeMap<String, u32>,
    key: String,
}

impl Monomial {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Degree-one monomial of a single base variable.
    pub fn variable(name: impl Into<String>) -> Self {
        let mut powers = BTreeMap::new();
        powers.insert(name.into(), 1);
        Self::from_map(powers)
    }

    /// Build a monomial from `(variable, exponent)` pairs.
    ///
    /// Repeated variables accumulate (saturating); zero exponents are dropped.
    pub fn from_powers<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut powers = BTreeMap::new();
        for (var, exp) in pairs {
            if exp > 0 {
                let slot = powers.entry(var.into()).or_insert(0u32);
                *slot = slot.saturating_add(exp);
            }
        }
        Self::from_map(powers)
    }

    fn from_map(powers: BTreeMap<String, u32>) -> Self {
        let key = format_powers(&powers);
        Self { powers, key }
    }

    /// Parse a term string such as `x`, `x^2*y` or `y*x*x`.
    ///
    /// Factors are separated by `*`; each is `var` (exponent 1) or `var^k`
    /// with `k` a positive integer. A variable may appear more than once and
    /// its exponents add up.
    pub fn parse(term: &str) -> Result<Self, SelectionError> {
        let malformed = |reason| SelectionError::MalformedTerm {
            term: term.to_string(),
            reason,
        };

        let mut powers: BTreeMap<String, u32> = BTreeMap::new();

        for factor in term.split(PRODUCT_MARKER) {
            let (var, exp) = match factor.split_once(EXPONENT_MARKER) {
                Some((var, exp)) => {
                    let exp: u32 = exp
                        .trim()
                        .parse()
                        .map_err(|_| malformed("exponent is not a positive integer"))?;
                    if exp == 0 {
                        return Err(malformed("exponent is not a positive integer"));
                    }
                    (var.trim(), exp)
                }
                None => (factor.trim(), 1),
            };

            if var.is_empty() {
                return Err(malformed("empty variable name"));
            }

            let slot = powers.entry(var.to_string()).or_insert(0);
            *slot = slot
                .checked_add(exp)
                .ok_or_else(|| malformed("exponent overflow"))?;
        }

        Ok(Self::from_map(powers))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Canonical string form, the term's identity key.
    pub fn canonical(&self) -> &str {
        &self.key
    }

    /// Exponent of `var` (0 when absent).
    pub fn exponent(&self, var: &str) -> u32 {
        self.powers.get(var).copied().unwrap_or(0)
    }

    /// `(variable, exponent)` pairs sorted by variable name.
    pub fn powers(&self) -> impl Iterator<Item = (&str, u32)> {
        self.powers.iter().map(|(v, &e)| (v.as_str(), e))
    }

    /// Number of distinct variables.
    pub fn n_variables(&self) -> usize {
        self.powers.len()
    }

    /// True for the degree-zero (constant) monomial.
    pub fn is_constant(&self) -> bool {
        self.powers.is_empty()
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    /// Sum of all exponents (saturating).
    pub fn total_degree(&self) -> u32 {
        self.powers
            .values()
            .fold(0u32, |acc, &exp| acc.saturating_add(exp))
    }

    /// Exponent-wise sum of two monomials (their product).
    ///
    /// Fails with [`SelectionError::MalformedTerm`] if an exponent overflows.
    pub fn combine(&self, other: &Monomial) -> Result<Monomial, SelectionError> {
        let mut powers = self.powers.clone();
        for (var, &exp) in &other.powers {
            let slot = powers.entry(var.clone()).or_insert(0);
            *slot = slot
                .checked_add(exp)
                .ok_or_else(|| SelectionError::MalformedTerm {
                    term: format!("{}{}{}", self.key, PRODUCT_MARKER, other.key),
                    reason: "exponent overflow",
                })?;
        }
        Ok(Self::from_map(powers))
    }

    /// True when every exponent of `self` is at most the matching one in `other`.
    pub fn divides(&self, other: &Monomial) -> bool {
        self.powers
            .iter()
            .all(|(var, &exp)| other.exponent(var) >= exp)
    }

    /// Every non-empty divisor, the monomial itself included.
    ///
    /// This is the set of terms that must be present in a hierarchical model
    /// containing `self`.
    pub fn divisors(&self) -> BTreeSet<Monomial> {
        let vars: Vec<(&String, u32)> = self.powers.iter().map(|(v, &e)| (v, e)).collect();
        let mut current = vec![0u32; vars.len()];
        let mut out = BTreeSet::new();

        loop {
            let powers: BTreeMap<String, u32> = vars
                .iter()
                .zip(&current)
                .filter(|(_, &e)| e > 0)
                .map(|(&(v, _), &e)| (v.clone(), e))
                .collect();

            if !powers.is_empty() {
                out.insert(Self::from_map(powers));
            }

            // Advance the odometer; finished once every digit has wrapped.
            let mut i = 0;
            loop {
                if i == current.len() {
                    return out;
                }
                if current[i] < vars[i].1 {
                    current[i] += 1;
                    break;
                }
                current[i] = 0;
                i += 1;
            }
        }
    }
}

/// Render sorted powers as the canonical term string.
fn format_powers(powers: &BTreeMap<String, u32>) -> String {
    let mut out = String::new();
    for (i, (var, &exp)) in powers.iter().enumerate() {
        if i > 0 {
            out.push(PRODUCT_MARKER);
        }
        out.push_str(var);
        if exp != 1 {
            out.push(EXPONENT_MARKER);
            out.push_str(&exp.to_string());
        }
    }
    out
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for Monomial {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Monomial {}

impl Hash for Monomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Display for Monomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(&self.key)
    }
}

impl FromStr for Monomial {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

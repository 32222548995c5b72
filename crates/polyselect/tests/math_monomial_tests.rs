//! Tests for monomial algebra.
//!
//! These tests verify the polynomial term type used throughout selection:
//! - Parsing term strings into exponent maps
//! - Canonical formatting (the term's identity)
//! - Total degree and products of terms
//! - Divisor enumeration (the hierarchy dependency set)
//!
//! ## Test Organization
//!
//! 1. **Parsing** - Valid syntax, whitespace, repeated variables
//! 2. **Malformed Terms** - Empty factors, bad exponents
//! 3. **Formatting** - Canonical ordering and exponent elision
//! 4. **Algebra** - Degree, combine, divides
//! 5. **Divisors** - Enumeration and closure properties

use std::collections::BTreeSet;

use polyselect::prelude::*;

fn keys(set: &BTreeSet<Monomial>) -> Vec<&str> {
    set.iter().map(Monomial::canonical).collect()
}

// ============================================================================
// Parsing Tests
// ============================================================================

/// Test parsing of single variables and powers.
#[test]
fn test_parse_simple_terms() {
    let x = Monomial::parse("x").unwrap();
    assert_eq!(x.exponent("x"), 1);
    assert_eq!(x.n_variables(), 1);

    let x3 = Monomial::parse("x^3").unwrap();
    assert_eq!(x3.exponent("x"), 3);
    assert_eq!(x3.exponent("y"), 0);
}

/// Test parsing of products with unsorted factors.
#[test]
fn test_parse_product() {
    let term = Monomial::parse("y*x^2").unwrap();
    assert_eq!(term.exponent("x"), 2);
    assert_eq!(term.exponent("y"), 1);
    assert_eq!(term.canonical(), "x^2*y");
}

/// Test that repeated variables accumulate their exponents.
#[test]
fn test_parse_repeated_variable() {
    let term = Monomial::parse("x*y*x").unwrap();
    assert_eq!(term.canonical(), "x^2*y");

    let term = Monomial::parse("x^2*x^3").unwrap();
    assert_eq!(term.canonical(), "x^5");
}

/// Test that whitespace around factors and markers is ignored.
#[test]
fn test_parse_whitespace() {
    let term = Monomial::parse(" x ^ 2 * y ").unwrap();
    assert_eq!(term.canonical(), "x^2*y");
}

/// Test multi-character variable names.
#[test]
fn test_parse_long_names() {
    let term = Monomial::parse("temp*pressure^2").unwrap();
    assert_eq!(term.canonical(), "pressure^2*temp");
    assert_eq!(term.total_degree(), 3);
}

/// Test `FromStr` delegates to `parse`.
#[test]
fn test_from_str() {
    let term: Monomial = "b*a".parse().unwrap();
    assert_eq!(term, Monomial::parse("a*b").unwrap());
}

// ============================================================================
// Malformed Term Tests
// ============================================================================

/// Test that malformed strings are rejected with `MalformedTerm`.
#[test]
fn test_parse_malformed() {
    for bad in ["", "*", "x*", "*x", "x**y", "^2", "x^", "x^0", "x^-1", "x^1.5", "x^a", "x^2^3"] {
        let err = Monomial::parse(bad).unwrap_err();
        assert!(
            matches!(err, SelectionError::MalformedTerm { .. }),
            "'{bad}' should be malformed, got {err:?}"
        );
    }
}

/// Test that the error reports the offending term.
#[test]
fn test_malformed_error_message() {
    let err = Monomial::parse("x^zero").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("x^zero"), "message was: {msg}");
}

// ============================================================================
// Formatting Tests
// ============================================================================

/// Test canonical ordering and exponent elision.
#[test]
fn test_canonical_format() {
    let term = Monomial::from_powers([("z", 1), ("a", 2), ("m", 1)]);
    assert_eq!(term.canonical(), "a^2*m*z");
    assert_eq!(term.to_string(), "a^2*m*z");
}

/// Test that zero exponents are dropped by `from_powers`.
#[test]
fn test_from_powers_drops_zero() {
    let term = Monomial::from_powers([("x", 2), ("y", 0)]);
    assert_eq!(term.canonical(), "x^2");
    assert_eq!(term.n_variables(), 1);
}

/// Test that formatting after parsing is stable.
#[test]
fn test_canonical_is_fixed_point() {
    for s in ["x", "x^2", "x*y", "x^2*y^3*z", "a*b*c"] {
        let term = Monomial::parse(s).unwrap();
        assert_eq!(term.canonical(), s);
        let again = Monomial::parse(term.canonical()).unwrap();
        assert_eq!(again, term);
    }
}

/// Test that `Display` honours width and alignment.
#[test]
fn test_display_padding() {
    let term = Monomial::parse("x*y").unwrap();
    assert_eq!(format!("{term:>6}"), "   x*y");
    assert_eq!(format!("{term:<6}|"), "x*y   |");
}

/// Test that ordering follows canonical strings.
#[test]
fn test_lexicographic_order() {
    let set: BTreeSet<Monomial> = ["y", "x^2", "x", "x*y", "w"]
        .iter()
        .map(|s| Monomial::parse(s).unwrap())
        .collect();
    assert_eq!(keys(&set), vec!["w", "x", "x*y", "x^2", "y"]);
}

// ============================================================================
// Algebra Tests
// ============================================================================

/// Test total degree.
#[test]
fn test_total_degree() {
    assert_eq!(Monomial::parse("x").unwrap().total_degree(), 1);
    assert_eq!(Monomial::parse("x^2*y").unwrap().total_degree(), 3);
    assert_eq!(Monomial::parse("a*b*c^4").unwrap().total_degree(), 6);
}

/// Test that combining adds exponents.
#[test]
fn test_combine() {
    let a = Monomial::parse("x*y").unwrap();
    let b = Monomial::parse("x").unwrap();
    assert_eq!(a.combine(&b).unwrap().canonical(), "x^2*y");

    let c = Monomial::parse("z^2").unwrap();
    assert_eq!(a.combine(&c).unwrap().canonical(), "x*y*z^2");
}

/// Test that combine is commutative and adds degrees.
#[test]
fn test_combine_properties() {
    let a = Monomial::parse("x^2*y").unwrap();
    let b = Monomial::parse("y*z").unwrap();
    assert_eq!(a.combine(&b), b.combine(&a));
    assert_eq!(
        a.combine(&b).unwrap().total_degree(),
        a.total_degree() + b.total_degree()
    );
}

/// Test that exponent overflow is reported instead of wrapping.
#[test]
fn test_combine_overflow() {
    let big = Monomial::parse("x^4294967295").unwrap();
    let err = big.combine(&Monomial::variable("x")).unwrap_err();
    assert!(matches!(
        err,
        SelectionError::MalformedTerm {
            reason: "exponent overflow",
            ..
        }
    ));

    // Disjoint variables never overflow
    let other = Monomial::variable("y");
    assert_eq!(big.combine(&other).unwrap().exponent("x"), u32::MAX);
}

/// Test the divisibility relation.
#[test]
fn test_divides() {
    let big = Monomial::parse("x^2*y").unwrap();
    assert!(Monomial::parse("x").unwrap().divides(&big));
    assert!(Monomial::parse("x*y").unwrap().divides(&big));
    assert!(big.divides(&big));
    assert!(!Monomial::parse("x^3").unwrap().divides(&big));
    assert!(!Monomial::parse("z").unwrap().divides(&big));
}

// ============================================================================
// Divisor Tests
// ============================================================================

/// Test divisors of a single variable.
#[test]
fn test_divisors_of_variable() {
    let x = Monomial::variable("x");
    assert_eq!(keys(&x.divisors()), vec!["x"]);
}

/// Test divisors of a pure power.
#[test]
fn test_divisors_of_power() {
    let x3 = Monomial::parse("x^3").unwrap();
    assert_eq!(keys(&x3.divisors()), vec!["x", "x^2", "x^3"]);
}

/// Test divisors of a mixed term include the term itself.
#[test]
fn test_divisors_of_product() {
    let term = Monomial::parse("x^2*y").unwrap();
    assert_eq!(
        keys(&term.divisors()),
        vec!["x", "x*y", "x^2", "x^2*y", "y"]
    );
}

/// Test the divisor count is the product of `(e_i + 1)` minus the constant.
#[test]
fn test_divisor_count() {
    let term = Monomial::parse("a^2*b^3*c").unwrap();
    assert_eq!(term.divisors().len(), 3 * 4 * 2 - 1);
}

/// Test that every divisor divides the term and the set is closed.
#[test]
fn test_divisors_are_closed() {
    let term = Monomial::parse("x^2*y*z").unwrap();
    let divisors = term.divisors();

    for d in &divisors {
        assert!(d.divides(&term));
        assert!(!d.is_constant());
        for dd in d.divisors() {
            assert!(divisors.contains(&dd), "{dd} missing from divisors of {term}");
        }
    }
}

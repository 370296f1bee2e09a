// src/error.rs

use thiserror::Error;

/// Errors raised by polynomial arithmetic, parsing and factorization.
///
/// Every variant is fatal for the computation that produced it; nothing in
/// the crate retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Gf2Error {
    #[error("capacity of {0} bits is not a positive multiple of 32")]
    InvalidCapacity(usize),

    #[error("capacity mismatch: {left} bits vs {right} bits")]
    CapacityMismatch { left: usize, right: usize },

    #[error("attempt to multiply deg(f) = {lhs_degree} with deg(g) = {rhs_degree} while using {bits} bits")]
    Overflow {
        lhs_degree: usize,
        rhs_degree: usize,
        bits: usize,
    },

    #[error("division by the zero polynomial")]
    DivisionByZero,

    #[error("coefficient index {index} does not fit in {bits} bits")]
    CoefficientOutOfRange { index: usize, bits: usize },

    #[error("invalid hex word {0:?}")]
    InvalidHexWord(String),

    #[error("expected {expected} hex words, found {found}")]
    MissingWords { expected: usize, found: usize },

    #[error("invalid bit width {0:?}")]
    InvalidWidth(String),

    #[error("the zero polynomial has no factorization")]
    ZeroPolynomial,

    #[error("polynomial has odd-exponent terms and is not a square")]
    NotASquare,

    #[error("recombination would visit {count} exponent assignments (limit {limit})")]
    TooManyCombinations { count: u128, limit: u128 },
}

// src/polynomial/mod.rs

pub mod format;
pub mod gcd;
pub mod gf2_polynomial;

pub use gcd::gcd;
pub use gf2_polynomial::{Division, Gf2Poly, WORD_BITS};

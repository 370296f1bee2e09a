// src/factor/mod.rs

pub mod berlekamp;
pub mod factor_multiset;
pub mod general;
pub mod recombine;

pub use factor_multiset::FactorMultiset;
pub use general::factor;
pub use recombine::{recombine, CoFactorPair};

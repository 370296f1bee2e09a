// src/lib.rs

pub mod config;
pub mod error;
pub mod factor;
pub mod matrix;
pub mod polynomial;

pub use error::Gf2Error;
pub use factor::{factor, recombine, CoFactorPair, FactorMultiset};
pub use polynomial::{gcd, Gf2Poly};

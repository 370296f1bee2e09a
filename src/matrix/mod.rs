// src/matrix/mod.rs

pub mod gf2_matrix;

pub use gf2_matrix::Gf2Matrix;

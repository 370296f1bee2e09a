// src/config/mod.rs

pub mod factor_config;

// Re-export main types for convenience
pub use factor_config::{FactorConfig, OutputConfig, RecombineConfig};

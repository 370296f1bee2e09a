// src/config/factor_config.rs

use serde::{Deserialize, Serialize};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;

/// Main configuration for the factoring front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorConfig {
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Output formatting
    pub output: OutputConfig,

    /// Recombination search limits
    pub recombine: RecombineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON instead of plain text
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecombineConfig {
    /// Refuse searches visiting more exponent assignments than this (default: 2^20)
    pub max_combinations: u64,
}

impl Default for FactorConfig {
    fn default() -> Self {
        FactorConfig {
            log_level: "info".to_string(),
            output: OutputConfig::default(),
            recombine: RecombineConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { json: false }
    }
}

impl Default for RecombineConfig {
    fn default() -> Self {
        RecombineConfig {
            max_combinations: 1 << 20,
        }
    }
}

impl FactorConfig {
    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("log_level", "info")?
            .set_default("output.json", false)?
            .set_default("recombine.max_combinations", 1u64 << 20)
    }

    fn environment() -> Environment {
        // GF2FACTOR__RECOMBINE__MAX_COMBINATIONS=4096
        Environment::with_prefix("GF2FACTOR")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Load configuration with precedence: config file → env vars → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        // TOML preferred, YAML fallback
        if Path::new("gf2factor.toml").exists() {
            builder = builder.add_source(File::with_name("gf2factor.toml"));
        } else if Path::new("gf2factor.yaml").exists() {
            builder = builder.add_source(File::with_name("gf2factor.yaml"));
        }

        builder = builder.add_source(Self::environment());

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(Self::environment());

        let config = builder.build()?;
        config.try_deserialize()
    }
}

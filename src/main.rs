// src/main.rs

use std::io::Read;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};
use serde::Serialize;
use gf2factor::config::FactorConfig;
use gf2factor::factor::berlekamp::even_powers_mod;
use gf2factor::factor::factor_multiset::FactorEntry;
use gf2factor::factor::recombine::{combination_count, CoFactorEntry};
use gf2factor::{factor, recombine, Gf2Error, Gf2Poly};

/// Factor polynomials over GF(2).
///
/// The polynomial is read as a bit width N followed by N/32 hex words,
/// least-significant word first, e.g. `32 0000011b`.
#[derive(Parser)]
#[command(name = "gf2factor", version)]
struct Cli {
    /// Configuration file (default: ./gf2factor.toml or ./gf2factor.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the polynomial from a file instead of stdin
    #[arg(long, short, global = true)]
    input: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List irreducible factors with multiplicities
    Factor,

    /// List every split into two co-factors of degree below the bound
    Recombine {
        #[arg(long)]
        bound: usize,
    },

    /// List x^(2i) mod f for i < deg f
    Powers,
}

#[derive(Serialize)]
struct FactorReport {
    input: String,
    bits: usize,
    factors: Vec<FactorEntry>,
}

#[derive(Serialize)]
struct RecombinationReport {
    input: String,
    bound: usize,
    pairs: Vec<CoFactorEntry>,
}

#[derive(Serialize)]
struct PowersReport {
    input: String,
    powers: Vec<String>,
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FactorConfig::load_from_file(path),
        None => FactorConfig::load(),
    }
    .context("loading configuration")?;

    // Initialize the logger
    let env = Env::default()
        .filter_or("GF2FACTOR_LOG", config.log_level.as_str())
        .write_style_or("GF2FACTOR_LOG_STYLE", "auto");
    env_logger::Builder::from_env(env).init();
    debug!("{:?}", config);

    let text = read_input(cli.input.as_deref())?;
    let f = Gf2Poly::parse_with_width(&text).context("parsing polynomial")?;
    info!("f = {} ({} bits)", f, f.bits());
    let json = cli.json || config.output.json;

    match cli.command {
        Command::Factor => {
            let factors = factor(&f)?;
            info!("{} = {}", f, factors);
            if json {
                return print_json(&FactorReport {
                    input: f.to_hex_string(),
                    bits: f.bits(),
                    factors: factors.entries(),
                });
            }
            for (p, multiplicity) in factors.iter() {
                println!("{}\t{}\t{}", p.to_hex_string(), multiplicity, p);
            }
        }

        Command::Recombine { bound } => {
            let factors = factor(&f)?;
            let count = combination_count(&factors);
            let limit = config.recombine.max_combinations as u128;
            if count > limit {
                return Err(Gf2Error::TooManyCombinations { count, limit }.into());
            }

            let pairs = recombine(&factors, bound)?;
            if json {
                return print_json(&RecombinationReport {
                    input: f.to_hex_string(),
                    bound,
                    pairs: pairs.iter().map(|pair| pair.entry()).collect(),
                });
            }
            for pair in &pairs {
                println!(
                    "{}\t{}\t{}",
                    pair.first.to_hex_string(),
                    pair.second.to_hex_string(),
                    pair
                );
            }
        }

        Command::Powers => {
            let powers = even_powers_mod(&f)?;
            if json {
                return print_json(&PowersReport {
                    input: f.to_hex_string(),
                    powers: powers.iter().map(|p| p.to_hex_string()).collect(),
                });
            }
            for (i, power) in powers.iter().enumerate() {
                println!("x^{} === {} (mod f)", 2 * i, power);
            }
        }
    }

    Ok(())
}

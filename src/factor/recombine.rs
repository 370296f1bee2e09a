// src/factor/recombine.rs

use std::fmt::{Display, Formatter, Result};
use log::debug;
use serde::Serialize;
use crate::error::Gf2Error;
use crate::factor::factor_multiset::FactorMultiset;
use crate::polynomial::Gf2Poly;

/// Two co-factors whose product is the factored polynomial. `exponents[i]`
/// is how many copies of the i-th distinct factor went into `first`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoFactorPair {
    pub first: Gf2Poly,
    pub second: Gf2Poly,
    pub exponents: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoFactorEntry {
    pub first: String,
    pub first_hex: String,
    pub second: String,
    pub second_hex: String,
}

impl CoFactorPair {
    pub fn entry(&self) -> CoFactorEntry {
        CoFactorEntry {
            first: self.first.to_string(),
            first_hex: self.first.to_hex_string(),
            second: self.second.to_string(),
            second_hex: self.second.to_hex_string(),
        }
    }
}

impl Display for CoFactorPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}) * ({})", self.first, self.second)
    }
}

/// Number of exponent assignments a full search visits, `prod(e_i + 1)`.
pub fn combination_count(factors: &FactorMultiset) -> u128 {
    factors
        .iter()
        .fold(1u128, |acc, (_, e)| acc.saturating_mul(e as u128 + 1))
}

struct Search<'a> {
    distinct: Vec<(&'a Gf2Poly, usize)>,
    bits: usize,
    bound: usize,
    total_degree: usize,
    exponents: Vec<usize>,
    pairs: Vec<CoFactorPair>,
}

impl<'a> Search<'a> {
    /// Picks the exponent of factor `index` in the first co-factor, then recurses.
    fn choose(&mut self, index: usize, first_degree: usize) -> std::result::Result<(), Gf2Error> {
        if index == self.distinct.len() {
            let second_degree = self.total_degree - first_degree;
            if first_degree < self.bound && second_degree < self.bound {
                self.emit()?;
            }
            return Ok(());
        }

        let (factor, multiplicity) = self.distinct[index];
        for k in 0..=multiplicity {
            self.exponents.push(k);
            self.choose(index + 1, first_degree + k * factor.degree())?;
            self.exponents.pop();
        }
        Ok(())
    }

    fn emit(&mut self) -> std::result::Result<(), Gf2Error> {
        let mut first = Gf2Poly::one(self.bits)?;
        let mut second = Gf2Poly::one(self.bits)?;
        for (&(factor, multiplicity), &k) in self.distinct.iter().zip(&self.exponents) {
            for _ in 0..k {
                first = first.checked_mul(factor)?;
            }
            for _ in k..multiplicity {
                second = second.checked_mul(factor)?;
            }
        }
        self.pairs.push(CoFactorPair {
            first,
            second,
            exponents: self.exponents.clone(),
        });
        Ok(())
    }
}

/// Every split of `factors` into two co-factors of degree below `bound`.
///
/// Each exponent assignment is its own result, so a split and its mirror
/// image both appear. Pairs come back sorted by their hex text.
pub fn recombine(
    factors: &FactorMultiset,
    bound: usize,
) -> std::result::Result<Vec<CoFactorPair>, Gf2Error> {
    let mut search = Search {
        distinct: factors.iter().collect(),
        bits: factors.bits(),
        bound,
        total_degree: factors.total_degree(),
        exponents: Vec::new(),
        pairs: Vec::new(),
    };
    debug!(
        "Recombining {} distinct factor(s), {} assignment(s), bound {}",
        search.distinct.len(),
        combination_count(factors),
        bound
    );

    search.choose(0, 0)?;

    let mut pairs = search.pairs;
    pairs.sort_by_cached_key(|pair| (pair.first.to_hex_string(), pair.second.to_hex_string()));
    debug!("{} co-factor pair(s) below degree {}", pairs.len(), bound);
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(bits: &[u8]) -> Gf2Poly {
        Gf2Poly::from_bits(32, bits).unwrap()
    }

    #[test]
    fn test_square_of_linear_bound_two() {
        let x_plus_one = poly(&[1, 1]);
        let mut factors = FactorMultiset::new(32);
        factors.add(x_plus_one.clone(), 2);

        let pairs = recombine(&factors, 2).unwrap();
        assert_eq!(
            pairs,
            vec![CoFactorPair {
                first: x_plus_one.clone(),
                second: x_plus_one,
                exponents: vec![1],
            }]
        );
    }

    #[test]
    fn test_square_of_linear_bound_three() {
        let mut factors = FactorMultiset::new(32);
        factors.add(poly(&[1, 1]), 2);

        let pairs = recombine(&factors, 3).unwrap();
        let exponents: Vec<Vec<usize>> = pairs.iter().map(|p| p.exponents.clone()).collect();
        assert_eq!(exponents, vec![vec![0], vec![1], vec![2]]);
        assert!(pairs[0].first.is_unit());
        assert_eq!(pairs[0].second, poly(&[1, 0, 1]));
    }

    #[test]
    fn test_mirror_pairs_both_emitted() {
        let x = poly(&[0, 1]);
        let x_plus_one = poly(&[1, 1]);
        let mut factors = FactorMultiset::new(32);
        factors.add(x.clone(), 1);
        factors.add(x_plus_one.clone(), 1);

        let pairs = recombine(&factors, 2).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].first.clone(), pairs[0].second.clone()), (x.clone(), x_plus_one.clone()));
        assert_eq!((pairs[1].first.clone(), pairs[1].second.clone()), (x_plus_one, x));
        assert_eq!(pairs[0].to_string(), "(x) * (x + 1)");
    }

    #[test]
    fn test_products_reassemble() {
        let mut factors = FactorMultiset::new(32);
        factors.add(poly(&[0, 1]), 3);
        factors.add(poly(&[1, 1, 1]), 2);
        let f = factors.product().unwrap();

        let pairs = recombine(&factors, 6).unwrap();
        assert!(!pairs.is_empty());
        for pair in &pairs {
            assert!(pair.first.degree() < 6 && pair.second.degree() < 6);
            assert_eq!(pair.first.checked_mul(&pair.second).unwrap(), f);
        }
    }

    #[test]
    fn test_bound_excludes_everything() {
        let mut factors = FactorMultiset::new(32);
        factors.add(poly(&[1, 1, 0, 1]), 1);
        assert!(recombine(&factors, 3).unwrap().is_empty());
        assert_eq!(recombine(&factors, 4).unwrap().len(), 2);
    }

    #[test]
    fn test_combination_count() {
        let mut factors = FactorMultiset::new(32);
        assert_eq!(combination_count(&factors), 1);
        factors.add(poly(&[1, 1]), 2);
        factors.add(poly(&[0, 1]), 1);
        assert_eq!(combination_count(&factors), 6);
    }

    #[test]
    fn test_entry() {
        let pair = CoFactorPair {
            first: poly(&[1, 1]),
            second: poly(&[1]),
            exponents: vec![1],
        };
        let entry = pair.entry();
        assert_eq!(entry.first, "x + 1");
        assert_eq!(entry.first_hex, "00000003");
        assert_eq!(entry.second, "1");
        assert_eq!(entry.second_hex, "00000001");
    }
}

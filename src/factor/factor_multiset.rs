// src/factor/factor_multiset.rs

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result};
use serde::Serialize;
use crate::error::Gf2Error;
use crate::polynomial::Gf2Poly;

/// Irreducible factors with their multiplicities, ordered by the polynomial
/// total order so iteration and printing are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorMultiset {
    bits: usize,
    factors: BTreeMap<Gf2Poly, usize>,
}

/// One line of a factorization report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorEntry {
    pub factor: String,
    pub hex: String,
    pub degree: usize,
    pub multiplicity: usize,
}

impl FactorMultiset {
    pub fn new(bits: usize) -> Self {
        FactorMultiset {
            bits,
            factors: BTreeMap::new(),
        }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn add(&mut self, factor: Gf2Poly, multiplicity: usize) {
        if multiplicity == 0 {
            return;
        }
        *self.factors.entry(factor).or_insert(0) += multiplicity;
    }

    /// Union with `other`, summing multiplicities of shared factors.
    pub fn combine(&mut self, other: &FactorMultiset) {
        for (factor, &multiplicity) in &other.factors {
            self.add(factor.clone(), multiplicity);
        }
    }

    pub fn multiplicity(&self, factor: &Gf2Poly) -> usize {
        self.factors.get(factor).copied().unwrap_or(0)
    }

    /// Number of distinct factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Gf2Poly, usize)> {
        self.factors.iter().map(|(factor, &multiplicity)| (factor, multiplicity))
    }

    /// Degree of the product, counting multiplicity.
    pub fn total_degree(&self) -> usize {
        self.iter().map(|(factor, e)| factor.degree() * e).sum()
    }

    /// Multiplies every factor back together; the empty multiset gives 1.
    pub fn product(&self) -> std::result::Result<Gf2Poly, Gf2Error> {
        let mut product = Gf2Poly::one(self.bits)?;
        for (factor, multiplicity) in self.iter() {
            for _ in 0..multiplicity {
                product = product.checked_mul(factor)?;
            }
        }
        Ok(product)
    }

    pub fn entries(&self) -> Vec<FactorEntry> {
        self.iter()
            .map(|(factor, multiplicity)| FactorEntry {
                factor: factor.to_string(),
                hex: factor.to_hex_string(),
                degree: factor.degree(),
                multiplicity,
            })
            .collect()
    }
}

impl Display for FactorMultiset {
    /// `(x + 1)^2 * (x^2 + x + 1)`, or `1` when empty.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        let factors: Vec<String> = self
            .iter()
            .map(|(factor, multiplicity)| match multiplicity {
                1 => format!("({})", factor),
                _ => format!("({})^{}", factor, multiplicity),
            })
            .collect();
        write!(f, "{}", factors.join(" * "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(bits: &[u8]) -> Gf2Poly {
        Gf2Poly::from_bits(32, bits).unwrap()
    }

    #[test]
    fn test_add_and_combine() {
        let mut left = FactorMultiset::new(32);
        left.add(poly(&[1, 1]), 1);
        left.add(poly(&[0, 1]), 2);
        left.add(poly(&[1, 1, 1]), 0);

        let mut right = FactorMultiset::new(32);
        right.add(poly(&[1, 1]), 3);
        right.add(poly(&[1, 1, 1]), 1);

        left.combine(&right);
        assert_eq!(left.len(), 3);
        assert_eq!(left.multiplicity(&poly(&[1, 1])), 4);
        assert_eq!(left.multiplicity(&poly(&[0, 1])), 2);
        assert_eq!(left.multiplicity(&poly(&[1, 1, 1])), 1);
        assert_eq!(left.multiplicity(&poly(&[1, 0, 1])), 0);
        assert_eq!(left.total_degree(), 4 + 2 + 2);
    }

    #[test]
    fn test_product() {
        let mut factors = FactorMultiset::new(32);
        assert!(factors.product().unwrap().is_unit());

        factors.add(poly(&[1, 1]), 2);
        factors.add(poly(&[0, 1]), 1);
        // x (x + 1)^2 = x^3 + x
        assert_eq!(factors.product().unwrap(), poly(&[0, 1, 0, 1]));
    }

    #[test]
    fn test_display_order() {
        let mut factors = FactorMultiset::new(32);
        factors.add(poly(&[1, 1, 1]), 1);
        factors.add(poly(&[1, 1]), 2);
        factors.add(poly(&[0, 1]), 1);
        assert_eq!(factors.to_string(), "(x) * (x + 1)^2 * (x^2 + x + 1)");
        assert_eq!(FactorMultiset::new(32).to_string(), "1");
    }

    #[test]
    fn test_entries() {
        let mut factors = FactorMultiset::new(32);
        factors.add(poly(&[1, 1]), 2);
        let entries = factors.entries();
        assert_eq!(
            entries,
            vec![FactorEntry {
                factor: "x + 1".to_string(),
                hex: "00000003".to_string(),
                degree: 1,
                multiplicity: 2,
            }]
        );
    }
}

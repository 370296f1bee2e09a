// src/polynomial/gf2_polynomial.rs

use std::cell::Cell;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use crate::error::Gf2Error;

/// Width of one storage word in bits. Capacities are multiples of this.
pub const WORD_BITS: usize = 32;

const ODD_BITS: u32 = 0xAAAA_AAAA;

/// A polynomial over GF(2) with a fixed capacity of `bits` coefficients.
///
/// Coefficient `i` lives in word `i / 32`, bit `i % 32`. The degree is cached
/// lazily and dropped whenever a coefficient changes; a clone carries its own
/// copy of the cache.
#[derive(Clone, Debug)]
pub struct Gf2Poly {
    pub(super) words: Vec<u32>,
    degree: Cell<Option<usize>>,
}

/// Quotient and remainder of a polynomial long division.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Division {
    pub quotient: Gf2Poly,
    pub remainder: Gf2Poly,
}

impl Gf2Poly {
    pub(super) fn from_words(words: Vec<u32>) -> Self {
        Gf2Poly {
            words,
            degree: Cell::new(None),
        }
    }

    fn zero_like(&self) -> Self {
        Self::from_words(vec![0; self.words.len()])
    }

    /// Number of storage words for a capacity of `bits`, without allocating.
    pub(super) fn word_count(bits: usize) -> Result<usize, Gf2Error> {
        if bits == 0 || bits % WORD_BITS != 0 {
            return Err(Gf2Error::InvalidCapacity(bits));
        }
        Ok(bits / WORD_BITS)
    }

    /// The zero polynomial with room for `bits` coefficients.
    pub fn zero(bits: usize) -> Result<Self, Gf2Error> {
        Ok(Self::from_words(vec![0; Self::word_count(bits)?]))
    }

    pub fn one(bits: usize) -> Result<Self, Gf2Error> {
        Self::monomial(bits, 0)
    }

    pub fn x(bits: usize) -> Result<Self, Gf2Error> {
        Self::monomial(bits, 1)
    }

    /// `x^k`.
    pub fn monomial(bits: usize, k: usize) -> Result<Self, Gf2Error> {
        let mut poly = Self::zero(bits)?;
        if k >= bits {
            return Err(Gf2Error::CoefficientOutOfRange { index: k, bits });
        }
        poly.xor_bit(k, true);
        Ok(poly)
    }

    /// Builds a polynomial from coefficients listed from the constant term up.
    /// Any nonzero entry counts as a 1.
    pub fn from_bits(bits: usize, coefficients: &[u8]) -> Result<Self, Gf2Error> {
        let mut poly = Self::zero(bits)?;
        for (index, &c) in coefficients.iter().enumerate() {
            if c == 0 {
                continue;
            }
            if index >= bits {
                return Err(Gf2Error::CoefficientOutOfRange { index, bits });
            }
            poly.xor_bit(index, true);
        }
        Ok(poly)
    }

    pub fn bits(&self) -> usize {
        WORD_BITS * self.words.len()
    }

    pub fn as_words(&self) -> &[u32] {
        &self.words
    }

    pub fn coeff(&self, i: usize) -> bool {
        assert!(i < self.bits(), "Coefficient index out of bounds");
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    pub fn xor_bit(&mut self, i: usize, value: bool) {
        assert!(i < self.bits(), "Coefficient index out of bounds");
        self.words[i / WORD_BITS] ^= (value as u32) << (i % WORD_BITS);
        self.degree.set(None);
    }

    /// Highest index with a set coefficient, or 0 for the zero polynomial.
    pub fn degree(&self) -> usize {
        if let Some(degree) = self.degree.get() {
            return degree;
        }
        let degree = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map(|k| k * WORD_BITS + (WORD_BITS - 1 - self.words[k].leading_zeros() as usize))
            .unwrap_or(0);
        self.degree.set(Some(degree));
        degree
    }

    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && !self.coeff(0)
    }

    pub fn is_unit(&self) -> bool {
        self.degree() == 0 && self.coeff(0)
    }

    fn ensure_same_capacity(&self, other: &Gf2Poly) -> Result<(), Gf2Error> {
        if self.words.len() != other.words.len() {
            return Err(Gf2Error::CapacityMismatch {
                left: self.bits(),
                right: other.bits(),
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Gf2Poly) -> Result<Gf2Poly, Gf2Error> {
        let mut sum = self.clone();
        sum.xor_assign(other)?;
        Ok(sum)
    }

    /// Same as [`Gf2Poly::checked_add`]; the field has characteristic 2.
    pub fn checked_sub(&self, other: &Gf2Poly) -> Result<Gf2Poly, Gf2Error> {
        self.checked_add(other)
    }

    pub fn xor_assign(&mut self, other: &Gf2Poly) -> Result<(), Gf2Error> {
        self.ensure_same_capacity(other)?;
        self.xor_same_capacity(other);
        Ok(())
    }

    /// In-place XOR for callers that guarantee equal capacities.
    pub(crate) fn xor_same_capacity(&mut self, other: &Gf2Poly) {
        assert_eq!(self.words.len(), other.words.len(), "Capacity mismatch");
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a ^= b;
        }
        self.degree.set(None);
    }

    /// XORs `other * x^shift` into `self`, dropping bits past the capacity.
    fn xor_shifted(&mut self, other: &Gf2Poly, shift: usize) {
        let word_shift = shift / WORD_BITS;
        let bit_shift = shift % WORD_BITS;
        let len = self.words.len();
        for (k, &w) in other.words.iter().enumerate() {
            let target = k + word_shift;
            if target >= len {
                break;
            }
            if w == 0 {
                continue;
            }
            self.words[target] ^= w << bit_shift;
            if bit_shift > 0 && target + 1 < len {
                self.words[target + 1] ^= w >> (WORD_BITS - bit_shift);
            }
        }
        self.degree.set(None);
    }

    /// Product over GF(2). Fails instead of truncating when the true product
    /// would not fit in the capacity.
    pub fn checked_mul(&self, other: &Gf2Poly) -> Result<Gf2Poly, Gf2Error> {
        self.ensure_same_capacity(other)?;
        let (lhs_degree, rhs_degree) = (self.degree(), other.degree());
        if lhs_degree + rhs_degree >= self.bits() {
            return Err(Gf2Error::Overflow {
                lhs_degree,
                rhs_degree,
                bits: self.bits(),
            });
        }

        let mut product = self.zero_like();
        for i in 0..=lhs_degree {
            if self.coeff(i) {
                product.xor_shifted(other, i);
            }
        }
        Ok(product)
    }

    pub fn square(&self) -> Result<Gf2Poly, Gf2Error> {
        self.checked_mul(self)
    }

    /// Formal derivative. Only odd exponents survive, each dropping by one.
    pub fn derivative(&self) -> Gf2Poly {
        // Bit 0 of every word is an even exponent, so nothing carries between words.
        let words = self.words.iter().map(|w| (w & ODD_BITS) >> 1).collect();
        Self::from_words(words)
    }

    /// For a polynomial made only of even powers, returns `g` with `g^2 == self`.
    pub fn square_root(&self) -> Option<Gf2Poly> {
        if self.words.iter().any(|w| w & ODD_BITS != 0) {
            return None;
        }
        let mut root = self.zero_like();
        for i in 0..=self.degree() / 2 {
            if self.coeff(2 * i) {
                root.xor_bit(i, true);
            }
        }
        Some(root)
    }

    /// Long division. A constant divisor must be 1, which leaves the dividend
    /// as the quotient.
    pub fn div_rem(&self, divisor: &Gf2Poly) -> Result<Division, Gf2Error> {
        self.ensure_same_capacity(divisor)?;
        let d = divisor.degree();
        if d == 0 {
            if !divisor.coeff(0) {
                return Err(Gf2Error::DivisionByZero);
            }
            return Ok(Division {
                quotient: self.clone(),
                remainder: self.zero_like(),
            });
        }

        let mut quotient = self.zero_like();
        let mut remainder = self.clone();
        for i in (d..=remainder.degree()).rev() {
            if remainder.coeff(i) {
                let shift = i - d;
                quotient.xor_bit(shift, true);
                remainder.xor_shifted(divisor, shift);
            }
        }

        Ok(Division {
            quotient,
            remainder,
        })
    }

    pub fn checked_rem(&self, modulus: &Gf2Poly) -> Result<Gf2Poly, Gf2Error> {
        Ok(self.div_rem(modulus)?.remainder)
    }
}

impl Gf2Poly {
    /// Equality that refuses to compare across capacities. `==` simply
    /// reports such pairs as unequal.
    pub fn checked_eq(&self, other: &Gf2Poly) -> Result<bool, Gf2Error> {
        self.ensure_same_capacity(other)?;
        Ok(self.words == other.words)
    }
}

impl PartialEq for Gf2Poly {
    fn eq(&self, other: &Gf2Poly) -> bool {
        self.words == other.words
    }
}

impl Eq for Gf2Poly {}

impl Hash for Gf2Poly {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

impl PartialOrd for Gf2Poly {
    fn partial_cmp(&self, other: &Gf2Poly) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Gf2Poly {
    /// Degree first, then coefficients from the top down. Capacity breaks the
    /// remaining ties so that the order agrees with `==`.
    fn cmp(&self, other: &Gf2Poly) -> Ordering {
        let word = |p: &Gf2Poly, k: usize| p.words.get(k).copied().unwrap_or(0);
        let len = self.words.len().max(other.words.len());

        self.degree()
            .cmp(&other.degree())
            .then_with(|| {
                (0..len)
                    .rev()
                    .map(|k| word(self, k).cmp(&word(other, k)))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.bits().cmp(&other.bits()))
    }
}

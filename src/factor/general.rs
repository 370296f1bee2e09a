// src/factor/general.rs
//
// Full factorization over GF(2), repeated factors included.
//
// With d = gcd(f, f') every input falls into one of three cases:
//
// d                Case             Next step
// ────────────────────────────────────────────────────────────────────
// 1                SquareFree       Berlekamp on f
// f                PerfectSquare    f' = 0, so f = g^2; factor g, doubled
// anything else    Mixed            factor d; Berlekamp on f / d
//
// f / d keeps exactly the factors of odd multiplicity, once each, so it is
// always square-free.

use log::debug;
use crate::error::Gf2Error;
use crate::factor::berlekamp::square_free_factors;
use crate::factor::factor_multiset::FactorMultiset;
use crate::polynomial::Gf2Poly;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactorCase {
    /// The constant 1, which has no irreducible factors
    Unit,

    SquareFree,

    /// `f = root^2`
    PerfectSquare(Gf2Poly),

    /// `f = repeated * square_free` with `repeated = gcd(f, f')`
    Mixed {
        repeated: Gf2Poly,
        square_free: Gf2Poly,
    },
}

impl FactorCase {
    pub fn name(&self) -> &str {
        match self {
            Self::Unit => "unit",
            Self::SquareFree => "square-free",
            Self::PerfectSquare(_) => "perfect square",
            Self::Mixed { .. } => "mixed",
        }
    }
}

/// Decides which case `f` falls into. The zero polynomial is rejected.
pub fn classify(f: &Gf2Poly) -> Result<FactorCase, Gf2Error> {
    if f.is_zero() {
        return Err(Gf2Error::ZeroPolynomial);
    }
    if f.is_unit() {
        return Ok(FactorCase::Unit);
    }

    let double = f.double_factor()?;
    if double.is_unit() {
        return Ok(FactorCase::SquareFree);
    }
    if &double == f {
        let root = f.square_root().ok_or(Gf2Error::NotASquare)?;
        return Ok(FactorCase::PerfectSquare(root));
    }

    let square_free = f.div_rem(&double)?.quotient;
    Ok(FactorCase::Mixed {
        repeated: double,
        square_free,
    })
}

/// Berlekamp factors of a square-free `f`, each carrying `multiplicity`.
fn square_free_multiset(f: &Gf2Poly, multiplicity: usize) -> Result<FactorMultiset, Gf2Error> {
    let mut factors = FactorMultiset::new(f.bits());
    for factor in square_free_factors(f)? {
        factors.add(factor, multiplicity);
    }
    Ok(factors)
}

/// Irreducible factorization of `f` with multiplicities.
///
/// # Examples
/// ```
/// use gf2factor::factor::general::factor;
/// use gf2factor::polynomial::Gf2Poly;
///
/// let f = Gf2Poly::from_bits(32, &[0, 0, 1]).unwrap(); // x^2
/// let factors = factor(&f).unwrap();
/// assert_eq!(factors.multiplicity(&Gf2Poly::x(32).unwrap()), 2);
/// ```
pub fn factor(f: &Gf2Poly) -> Result<FactorMultiset, Gf2Error> {
    let mut factors = FactorMultiset::new(f.bits());
    // Pending pieces, each with the multiplicity its factors will carry
    let mut pending = vec![(f.clone(), 1usize)];

    while let Some((g, multiplier)) = pending.pop() {
        let case = classify(&g)?;
        debug!("Factoring {} (x{}): {}", g, multiplier, case.name());

        match case {
            FactorCase::Unit => {}
            FactorCase::SquareFree => factors.combine(&square_free_multiset(&g, multiplier)?),
            FactorCase::PerfectSquare(root) => pending.push((root, 2 * multiplier)),
            FactorCase::Mixed {
                repeated,
                square_free,
            } => {
                factors.combine(&square_free_multiset(&square_free, multiplier)?);
                pending.push((repeated, multiplier));
            }
        }
    }

    Ok(factors)
}

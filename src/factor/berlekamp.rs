// src/factor/berlekamp.rs
//
// Berlekamp's algorithm over GF(2) for square-free input.
//
// Column i of Q holds x^(2i) mod f. The kernel of Q - I is the set of h with
// h^2 = h (mod f); its dimension is the number of irreducible factors, and
// gcd(p, h) * gcd(p, h + 1) = p splits any candidate p along h.

use std::collections::BTreeSet;
use log::{debug, trace};
use crate::error::Gf2Error;
use crate::matrix::Gf2Matrix;
use crate::polynomial::{gcd, Gf2Poly};

/// `x^(2i) mod f` for `i` in `0..deg f`.
pub fn even_powers_mod(f: &Gf2Poly) -> Result<Vec<Gf2Poly>, Gf2Error> {
    if f.is_zero() {
        return Err(Gf2Error::DivisionByZero);
    }
    let n = f.degree();
    let x = Gf2Poly::x(f.bits())?;
    let mut power = Gf2Poly::one(f.bits())?;
    let mut powers = Vec::with_capacity(n);

    for i in 0..n {
        powers.push(power.clone());
        if i + 1 == n {
            break;
        }
        // Reducing after each factor of x keeps deg f = bits - 1 in range
        for _ in 0..2 {
            power = power.checked_mul(&x)?.checked_rem(f)?;
        }
    }
    Ok(powers)
}

/// The Berlekamp matrix: `B[j][i]` is the coefficient of `x^j` in `x^(2i) mod f`.
pub fn powers_mod(f: &Gf2Poly) -> Result<Gf2Matrix, Gf2Error> {
    let n = f.degree();
    let mut matrix = Gf2Matrix::new(n, n, f.bits())?;
    for (i, power) in even_powers_mod(f)?.iter().enumerate() {
        for j in 0..n {
            if power.coeff(j) {
                matrix.xor_bit(j, i, true);
            }
        }
    }
    Ok(matrix)
}

/// Kernel basis of `Q - I`. The first vector is always the constant 1.
fn berlekamp_subalgebra(f: &Gf2Poly) -> Result<Vec<Gf2Poly>, Gf2Error> {
    let mut matrix = powers_mod(f)?;
    matrix.sub_unit_diag();
    let pivots = matrix.to_rref();
    let basis = matrix.rref_nullspace(&pivots)?;
    trace!("Berlekamp kernel for {}: {} vector(s)", f, basis.len());
    Ok(basis)
}

/// Distinct irreducible factors of a square-free polynomial, in ascending order.
///
/// The input must satisfy `f.double_factor()` being the unit; a repeated
/// factor would be reported once.
pub fn square_free_factors(f: &Gf2Poly) -> Result<Vec<Gf2Poly>, Gf2Error> {
    if f.is_zero() {
        return Err(Gf2Error::ZeroPolynomial);
    }
    debug_assert!(
        f.double_factor().map(|d| d.is_unit()).unwrap_or(false),
        "Berlekamp input must be square-free"
    );

    match f.degree() {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![f.clone()]),
        _ => {}
    }

    let basis = berlekamp_subalgebra(f)?;
    debug_assert!(
        basis.first().is_some_and(Gf2Poly::is_unit),
        "First Berlekamp basis vector must be the unit"
    );
    debug!("Berlekamp: deg f = {}, {} irreducible factor(s)", f.degree(), basis.len());

    let one = Gf2Poly::one(f.bits())?;
    let mut candidates = BTreeSet::from([f.clone()]);

    for h in basis.iter().skip(1) {
        let h_plus_one = h.checked_add(&one)?;
        let mut refined = BTreeSet::new();
        for p in &candidates {
            for part in [gcd(p, h)?, gcd(p, &h_plus_one)?] {
                if !part.is_unit() {
                    refined.insert(part);
                }
            }
        }
        candidates = refined;
    }

    Ok(candidates.into_iter().collect())
}

/// True when `f` is nonconstant and has no nontrivial factorization.
pub fn is_irreducible(f: &Gf2Poly) -> Result<bool, Gf2Error> {
    if f.degree() == 0 {
        return Ok(false);
    }
    if !f.double_factor()?.is_unit() {
        return Ok(false);
    }
    Ok(berlekamp_subalgebra(f)?.len() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(bits: &[u8]) -> Gf2Poly {
        Gf2Poly::from_bits(32, bits).unwrap()
    }

    fn product(factors: &[Gf2Poly]) -> Gf2Poly {
        factors
            .iter()
            .fold(Gf2Poly::one(32).unwrap(), |acc, p| acc.checked_mul(p).unwrap())
    }

    #[test]
    fn test_even_powers_mod() {
        // f = x^3 + x + 1: 1, x^2, x^4 = x^2 + x
        let f = poly(&[1, 1, 0, 1]);
        let powers = even_powers_mod(&f).unwrap();
        assert_eq!(powers, vec![poly(&[1]), poly(&[0, 0, 1]), poly(&[0, 1, 1])]);
    }

    #[test]
    fn test_powers_mod_matrix() {
        let f = poly(&[1, 1, 0, 1]);
        let matrix = powers_mod(&f).unwrap();
        assert_eq!(matrix.to_string(), "100\n001\n011\n");
    }

    #[test]
    fn test_powers_mod_full_capacity() {
        // deg f = bits - 1 must not overflow while squaring x
        let mut coefficients = vec![0u8; 32];
        coefficients[0] = 1;
        coefficients[31] = 1;
        let f = Gf2Poly::from_bits(32, &coefficients).unwrap();
        assert_eq!(even_powers_mod(&f).unwrap().len(), 31);
    }

    #[test]
    fn test_irreducible_octic() {
        let f = poly(&[1, 1, 0, 1, 1, 0, 0, 0, 1]);
        assert!(f.double_factor().unwrap().is_unit());
        assert_eq!(square_free_factors(&f).unwrap(), vec![f.clone()]);
        assert!(is_irreducible(&f).unwrap());
    }

    #[test]
    fn test_splits_distinct_factors() {
        let x = poly(&[0, 1]);
        let x_plus_one = poly(&[1, 1]);
        let quadratic = poly(&[1, 1, 1]);
        let cubic = poly(&[1, 1, 0, 1]);
        let quintic = poly(&[1, 0, 1, 0, 0, 1]);

        let expected = vec![x, x_plus_one, quadratic, cubic, quintic];
        let f = product(&expected);
        assert_eq!(f.degree(), 12);
        assert_eq!(square_free_factors(&f).unwrap(), expected);
        assert!(!is_irreducible(&f).unwrap());
    }

    #[test]
    fn test_same_degree_factors() {
        // Both irreducible quartics
        let a = poly(&[1, 1, 0, 0, 1]);
        let b = poly(&[1, 0, 0, 1, 1]);
        let f = a.checked_mul(&b).unwrap();
        assert_eq!(square_free_factors(&f).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_constants_and_linear() {
        assert!(square_free_factors(&Gf2Poly::one(32).unwrap()).unwrap().is_empty());
        assert_eq!(
            square_free_factors(&Gf2Poly::zero(32).unwrap()),
            Err(Gf2Error::ZeroPolynomial)
        );
        let x_plus_one = poly(&[1, 1]);
        assert_eq!(square_free_factors(&x_plus_one).unwrap(), vec![x_plus_one.clone()]);
        assert!(is_irreducible(&x_plus_one).unwrap());
        assert!(!is_irreducible(&Gf2Poly::one(32).unwrap()).unwrap());
    }

    #[test]
    fn test_is_irreducible_rejects_squares() {
        assert!(!is_irreducible(&poly(&[1, 0, 1])).unwrap());
    }
}

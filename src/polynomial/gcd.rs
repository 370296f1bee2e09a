// src/polynomial/gcd.rs

use log::trace;
use crate::error::Gf2Error;
use crate::polynomial::gf2_polynomial::Gf2Poly;

/// Euclidean gcd. The result is monic automatically, GF(2) having a single
/// nonzero constant.
pub fn gcd(left: &Gf2Poly, right: &Gf2Poly) -> Result<Gf2Poly, Gf2Error> {
    let (mut a, mut b) = if left.degree() > right.degree() {
        (left.clone(), right.clone())
    } else {
        (right.clone(), left.clone())
    };

    while !b.is_zero() {
        let remainder = a.checked_rem(&b)?;
        a = b;
        b = remainder;
    }

    Ok(a)
}

impl Gf2Poly {
    /// `gcd(f, f')`. The unit polynomial exactly when `f` is square-free.
    pub fn double_factor(&self) -> Result<Gf2Poly, Gf2Error> {
        let double = gcd(self, &self.derivative())?;
        trace!("gcd({}, f') = {}", self, double);
        Ok(double)
    }
}

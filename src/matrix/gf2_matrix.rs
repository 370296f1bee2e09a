//! Dense GF(2) matrix whose rows are [`Gf2Poly`] bit-vectors.
//!
//! Only the first `num_cols` bits of each row are meaningful. The matrix is
//! built transiently by the Berlekamp step: fill it, subtract the identity,
//! reduce to RREF, then read the kernel off the reduced rows.
//!
//! # Examples
//!
//! ```
//! use gf2factor::matrix::gf2_matrix::Gf2Matrix;
//!
//! let mut matrix = Gf2Matrix::new(2, 2, 32).unwrap();
//! matrix.xor_bit(0, 0, true);
//! matrix.xor_bit(1, 0, true);
//! let pivots = matrix.to_rref();
//! assert_eq!(pivots, vec![0]);
//! assert_eq!(matrix.rref_nullspace(&pivots).unwrap().len(), 1);
//! ```

use std::fmt::{Display, Formatter, Result};
use log::trace;
use crate::error::Gf2Error;
use crate::polynomial::Gf2Poly;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gf2Matrix {
    rows: Vec<Gf2Poly>,

    /// Number of meaningful columns, at most the row capacity
    pub num_cols: usize,

    /// Capacity of every row in bits
    pub bits: usize,
}

impl Gf2Matrix {
    /// Creates an all-zero `num_rows x num_cols` matrix with rows of `bits` capacity.
    pub fn new(num_rows: usize, num_cols: usize, bits: usize) -> std::result::Result<Self, Gf2Error> {
        let zero = Gf2Poly::zero(bits)?;
        if num_cols > bits {
            return Err(Gf2Error::CoefficientOutOfRange {
                index: num_cols - 1,
                bits,
            });
        }
        Ok(Gf2Matrix {
            rows: vec![zero; num_rows],
            num_cols,
            bits,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(col < self.num_cols, "Column index out of bounds");
        self.rows[row].coeff(col)
    }

    pub fn xor_bit(&mut self, row: usize, col: usize, value: bool) {
        assert!(col < self.num_cols, "Column index out of bounds");
        self.rows[row].xor_bit(col, value);
    }

    /// XORs `src_row` into `dest_row`.
    pub fn row_xor(&mut self, dest_row: usize, src_row: usize) {
        assert!(dest_row != src_row, "Cannot XOR a row into itself");

        let (dest, src) = if dest_row < src_row {
            let (head, tail) = self.rows.split_at_mut(src_row);
            (&mut head[dest_row], &tail[0])
        } else {
            let (head, tail) = self.rows.split_at_mut(dest_row);
            (&mut tail[0], &head[src_row])
        };
        dest.xor_same_capacity(src);
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    /// First row at or after `start_row` with a 1 in `col`.
    pub fn find_pivot(&self, col: usize, start_row: usize) -> Option<usize> {
        (start_row..self.num_rows()).find(|&row| self.get(row, col))
    }

    /// XORs a 1 onto the main diagonal, i.e. subtracts the identity.
    pub fn sub_unit_diag(&mut self) {
        for i in 0..self.num_rows().min(self.num_cols) {
            self.rows[i].xor_bit(i, true);
        }
    }

    /// Gauss-Jordan elimination to reduced row-echelon form, in place.
    ///
    /// Returns the pivot columns in increasing order; every other column is free.
    pub fn to_rref(&mut self) -> Vec<usize> {
        let mut pivots = Vec::new();

        for col in 0..self.num_cols {
            let Some(found) = self.find_pivot(col, pivots.len()) else {
                continue;
            };

            let pivot_row = pivots.len();
            if found != pivot_row {
                self.swap_rows(pivot_row, found);
            }
            pivots.push(col);

            for row in 0..self.num_rows() {
                if row != pivot_row && self.get(row, col) {
                    self.row_xor(row, pivot_row);
                }
            }
        }

        trace!("RREF pivots: {:?}", pivots);
        pivots
    }

    /// Kernel basis of a matrix already in RREF, one vector per free column.
    pub fn rref_nullspace(&self, pivots: &[usize]) -> std::result::Result<Vec<Gf2Poly>, Gf2Error> {
        let mut basis = Vec::new();
        let mut next_pivot = pivots.iter().peekable();

        for col in 0..self.num_cols {
            if next_pivot.peek() == Some(&&col) {
                next_pivot.next();
                continue;
            }

            let mut vector = Gf2Poly::zero(self.bits)?;
            vector.xor_bit(col, true);
            for (row, &pivot_col) in pivots.iter().enumerate() {
                if self.get(row, col) {
                    vector.xor_bit(pivot_col, true);
                }
            }
            basis.push(vector);
        }

        Ok(basis)
    }
}

impl Display for Gf2Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for row in 0..self.num_rows() {
            let line: String = (0..self.num_cols)
                .map(|col| if self.get(row, col) { '1' } else { '0' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&str]) -> Gf2Matrix {
        let mut matrix = Gf2Matrix::new(rows.len(), rows[0].len(), 32).unwrap();
        for (i, row) in rows.iter().enumerate() {
            for (j, c) in row.chars().enumerate() {
                matrix.xor_bit(i, j, c == '1');
            }
        }
        matrix
    }

    fn apply(matrix: &Gf2Matrix, vector: &Gf2Poly) -> Vec<bool> {
        (0..matrix.num_rows())
            .map(|i| {
                (0..matrix.num_cols)
                    .filter(|&j| matrix.get(i, j) && vector.coeff(j))
                    .count()
                    % 2
                    == 1
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_wide_matrix() {
        assert!(Gf2Matrix::new(2, 33, 32).is_err());
        assert!(Gf2Matrix::new(2, 32, 32).is_ok());
        assert_eq!(Gf2Matrix::new(1, 1, 20), Err(Gf2Error::InvalidCapacity(20)));
    }

    #[test]
    fn test_row_xor_and_swap() {
        let mut matrix = from_rows(&["110", "011"]);
        matrix.row_xor(0, 1);
        assert_eq!(matrix.to_string(), "101\n011\n");
        matrix.row_xor(1, 0);
        assert_eq!(matrix.to_string(), "101\n110\n");
        matrix.swap_rows(0, 1);
        assert_eq!(matrix.to_string(), "110\n101\n");
    }

    #[test]
    fn test_find_pivot() {
        let matrix = from_rows(&["100", "001", "011"]);
        assert_eq!(matrix.find_pivot(0, 0), Some(0));
        assert_eq!(matrix.find_pivot(0, 1), None);
        assert_eq!(matrix.find_pivot(1, 0), Some(2));
        assert_eq!(matrix.find_pivot(2, 2), Some(2));
    }

    #[test]
    fn test_sub_unit_diag() {
        let mut matrix = from_rows(&["100", "010", "111"]);
        matrix.sub_unit_diag();
        assert_eq!(matrix.to_string(), "000\n000\n110\n");
    }

    #[test]
    fn test_to_rref() {
        let mut matrix = from_rows(&["0110", "1011", "1101"]);
        let pivots = matrix.to_rref();
        assert_eq!(pivots, vec![0, 1]);
        assert_eq!(matrix.to_string(), "1011\n0110\n0000\n");
    }

    #[test]
    fn test_to_rref_full_reduction_above_pivot() {
        let mut matrix = from_rows(&["11", "01"]);
        let pivots = matrix.to_rref();
        assert_eq!(pivots, vec![0, 1]);
        assert_eq!(matrix.to_string(), "10\n01\n");
        assert!(matrix.rref_nullspace(&pivots).unwrap().is_empty());
    }

    #[test]
    fn test_nullspace_is_kernel() {
        let original = from_rows(&["0110", "1011", "1101"]);
        let mut reduced = original.clone();
        let pivots = reduced.to_rref();
        let basis = reduced.rref_nullspace(&pivots).unwrap();

        // One vector per free column
        assert_eq!(basis.len(), 2);
        for vector in &basis {
            assert!(!vector.is_zero());
            assert!(apply(&original, vector).iter().all(|&bit| !bit));
        }
        assert_ne!(basis[0], basis[1]);
    }

    #[test]
    fn test_nullspace_of_zero_matrix() {
        let mut matrix = Gf2Matrix::new(3, 3, 32).unwrap();
        let pivots = matrix.to_rref();
        assert!(pivots.is_empty());
        let basis = matrix.rref_nullspace(&pivots).unwrap();
        let expected: Vec<Gf2Poly> = (0..3).map(|k| Gf2Poly::monomial(32, k).unwrap()).collect();
        assert_eq!(basis, expected);
    }
}

// src/polynomial/format.rs
//
// Text forms of a polynomial:
//   hex words  "00000013 00000000"  storage order, exact round trip
//   Display    "x^4 + x + 1"        descending terms, constants as 0 / 1

use std::fmt::{Display, Formatter, Result};
use crate::error::Gf2Error;
use crate::polynomial::gf2_polynomial::Gf2Poly;

/// One word of at most 8 hex digits, optionally prefixed with `0x`.
fn parse_hex_word(token: &str) -> std::result::Result<u32, Gf2Error> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    // from_str_radix would also take a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Gf2Error::InvalidHexWord(token.to_string()));
    }
    u32::from_str_radix(digits, 16).map_err(|_| Gf2Error::InvalidHexWord(token.to_string()))
}

impl Gf2Poly {
    /// Space-separated words, each zero-padded to 8 hex digits, word 0 first.
    pub fn to_hex_string(&self) -> String {
        self.words
            .iter()
            .map(|w| format!("{:08x}", w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn from_hex_words(bits: usize, input: &str) -> std::result::Result<Self, Gf2Error> {
        Self::from_hex_tokens(bits, input.split_whitespace())
    }

    /// Reads `bits / 32` hex words from `tokens`; extra tokens are left alone.
    pub fn from_hex_tokens<'a, I>(bits: usize, tokens: I) -> std::result::Result<Self, Gf2Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let expected = Self::word_count(bits)?;
        let words = tokens
            .into_iter()
            .take(expected)
            .map(parse_hex_word)
            .collect::<std::result::Result<Vec<u32>, Gf2Error>>()?;

        if words.len() < expected {
            return Err(Gf2Error::MissingWords {
                expected,
                found: words.len(),
            });
        }
        Ok(Self::from_words(words))
    }

    /// Parses `N w_0 ... w_{N/32-1}`: a bit width followed by its hex words.
    pub fn parse_with_width(input: &str) -> std::result::Result<Self, Gf2Error> {
        let mut tokens = input.split_whitespace();
        let width = tokens
            .next()
            .ok_or_else(|| Gf2Error::InvalidWidth(String::new()))?;
        let bits = width
            .parse::<usize>()
            .map_err(|_| Gf2Error::InvalidWidth(width.to_string()))?;
        Self::from_hex_tokens(bits, tokens)
    }
}

impl Display for Gf2Poly {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let degree = self.degree();
        if degree == 0 {
            return write!(f, "{}", self.coeff(0) as u8);
        }

        let terms: Vec<String> = (0..=degree)
            .rev()
            .filter(|&i| self.coeff(i))
            .map(|i| match i {
                0 => "1".to_string(),
                1 => "x".to_string(),
                _ => format!("x^{}", i),
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}

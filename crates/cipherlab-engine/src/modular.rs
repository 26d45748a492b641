//! Integer arithmetic modulo m
//!
//! Values are `u64` with `u128` intermediates, which covers every modulus the
//! demo schemas accept. All results lie in `[0, m)`.

use std::fmt;

use crate::alphabet::RING;
use crate::error::{EngineError, Result};

/// Mathematical modulo: always in `[0, m)`, also for negative `n`.
///
/// `m` must be non-zero.
pub fn modulo(n: i64, m: u64) -> u64 {
    i128::from(n).rem_euclid(i128::from(m)) as u64
}

/// `(a * b) mod m` without overflow
pub fn mod_mul(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

/// Greatest common divisor
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Fast square-and-multiply exponentiation `base^exp mod m`.
///
/// ```
/// use cipherlab_engine::modular::mod_pow;
///
/// assert_eq!(mod_pow(65, 17, 3233), 2790);
/// ```
pub fn mod_pow(base: u64, mut exp: u64, m: u64) -> u64 {
    if m == 1 {
        return 0;
    }
    let mut result = 1;
    let mut base = base % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mod_mul(result, base, m);
        }
        base = mod_mul(base, base, m);
        exp >>= 1;
    }
    result
}

/// Smallest positive `x` with `a*x = 1 (mod m)`, via the extended Euclidean
/// algorithm.
///
/// # Errors
///
/// Returns [`EngineError::NoInverse`] when `gcd(a, m) != 1` or `m` is zero.
pub fn mod_inverse(a: u64, m: u64) -> Result<u64> {
    if m == 0 {
        return Err(EngineError::NoInverse {
            value: a,
            modulus: m,
        });
    }

    let (mut old_r, mut r) = (i128::from(a % m), i128::from(m));
    let (mut old_s, mut s) = (1_i128, 0_i128);
    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_s, s) = (s, old_s - quotient * s);
    }

    if old_r != 1 {
        return Err(EngineError::NoInverse {
            value: a,
            modulus: m,
        });
    }
    Ok(old_s.rem_euclid(i128::from(m)) as u64)
}

/// Trial-division primality test, adequate for demo-sized values
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut i = 3_u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// 2x2 matrix over the ring Z/26, stored row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrix2x2([u64; 4]);

/// Inverse of a [`Matrix2x2`] together with the values used to derive it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixInverse {
    /// The inverse matrix
    pub inverse: Matrix2x2,
    /// Determinant of the original matrix mod 26
    pub determinant: u64,
    /// Inverse of the determinant mod 26
    pub det_inverse: u64,
}

impl Matrix2x2 {
    /// Build from `[a, b, c, d]`, reducing each entry mod 26
    pub fn new(entries: [i64; 4]) -> Self {
        Self(entries.map(|e| modulo(e, RING)))
    }

    /// Parse four comma- or whitespace-separated integers
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != 4 {
            return Err(EngineError::validation(
                "matrix",
                format!("expected 4 numbers, got {}", parts.len()),
            ));
        }

        let mut entries = [0_i64; 4];
        for (slot, part) in entries.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                EngineError::validation("matrix", format!("'{part}' is not an integer"))
            })?;
        }
        Ok(Self::new(entries))
    }

    /// Entries `[a, b, c, d]`, each in `[0, 26)`
    pub const fn entries(&self) -> [u64; 4] {
        self.0
    }

    /// `ad - bc` mod 26
    pub fn determinant(&self) -> u64 {
        let [a, b, c, d] = self.0;
        (a * d + RING * RING - b * c) % RING
    }

    /// Inverse mod 26: `det^-1 * [d, -b; -c, a]`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SingularMatrix`] when `gcd(det, 26) != 1`.
    pub fn inverse(&self) -> Result<MatrixInverse> {
        let determinant = self.determinant();
        let det_inverse = mod_inverse(determinant, RING)
            .map_err(|_| EngineError::SingularMatrix { determinant })?;

        let [a, b, c, d] = self.0;
        let adjugate = [d, RING - b, RING - c, a];
        let inverse = Self(adjugate.map(|e| (e * det_inverse) % RING));

        Ok(MatrixInverse {
            inverse,
            determinant,
            det_inverse,
        })
    }

    /// Matrix-vector product mod 26 for the column vector `[v0, v1]`
    pub fn apply(&self, v0: u64, v1: u64) -> (u64, u64) {
        let [a, b, c, d] = self.0;
        ((a * v0 + b * v1) % RING, (c * v0 + d * v1) % RING)
    }
}

impl fmt::Display for Matrix2x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}, {b}, {c}, {d}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_modulo_negative() {
        assert_eq!(modulo(-1, 26), 25);
        assert_eq!(modulo(-27, 26), 25);
        assert_eq!(modulo(52, 26), 0);
        assert_eq!(modulo(-3233, 3120), 3007);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(17, 3120), 1);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 5), 5);
    }

    #[test]
    fn test_mod_pow() {
        assert_eq!(mod_pow(5, 6, 23), 8);
        assert_eq!(mod_pow(5, 15, 23), 19);
        assert_eq!(mod_pow(2, 0, 7), 1);
        assert_eq!(mod_pow(9, 9, 1), 0);
        assert_eq!(mod_pow(u64::MAX, 2, u64::MAX - 1), 1);
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(17, 3120).unwrap(), 2753);
        assert_eq!(mod_inverse(3, 26).unwrap(), 9);
        assert_eq!(mod_inverse(1, 26).unwrap(), 1);
        assert_eq!(
            mod_inverse(13, 26),
            Err(EngineError::NoInverse {
                value: 13,
                modulus: 26
            })
        );
        assert!(mod_inverse(0, 29).is_err());
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(4_294_967_291));
        assert!(!is_prime(3233));
    }

    #[test]
    fn test_matrix_parse() {
        let m = Matrix2x2::parse("3,3,2,5").unwrap();
        assert_eq!(m.entries(), [3, 3, 2, 5]);

        let m = Matrix2x2::parse(" -1  27, 0 ,26 ").unwrap();
        assert_eq!(m.entries(), [25, 1, 0, 0]);

        assert!(Matrix2x2::parse("1,2,3").is_err());
        assert!(Matrix2x2::parse("1,2,x,4").is_err());
    }

    #[test]
    fn test_matrix_inverse() {
        let m = Matrix2x2::new([3, 3, 2, 5]);
        let inv = m.inverse().unwrap();
        assert_eq!(inv.determinant, 9);
        assert_eq!(inv.det_inverse, 3);
        assert_eq!(inv.inverse.entries(), [15, 17, 20, 9]);

        // M * M^-1 = I
        let [a, b, c, d] = m.entries();
        let [e, f, g, h] = inv.inverse.entries();
        assert_eq!((a * e + b * g) % 26, 1);
        assert_eq!((a * f + b * h) % 26, 0);
        assert_eq!((c * e + d * g) % 26, 0);
        assert_eq!((c * f + d * h) % 26, 1);
    }

    #[test]
    fn test_singular_matrix() {
        let m = Matrix2x2::new([2, 4, 1, 2]);
        assert_eq!(m.determinant(), 0);
        assert_eq!(
            m.inverse(),
            Err(EngineError::SingularMatrix { determinant: 0 })
        );

        // det = 2*1 - 0 = 2, shares a factor with 26
        assert!(Matrix2x2::new([2, 0, 0, 1]).inverse().is_err());
    }

    proptest! {
        #[test]
        fn inverse_is_a_unit(a in 1u64..1_000_000, m in 2u64..1_000_000) {
            match mod_inverse(a, m) {
                Ok(inv) => {
                    prop_assert!(inv < m);
                    prop_assert_eq!(mod_mul(a, inv, m), 1);
                }
                Err(_) => prop_assert_ne!(gcd(a, m), 1),
            }
        }

        #[test]
        fn pow_adds_exponents(
            base in any::<u64>(),
            x in 0u64..1_000,
            y in 0u64..1_000,
            m in 2u64..u64::MAX,
        ) {
            prop_assert_eq!(
                mod_pow(base, x + y, m),
                mod_mul(mod_pow(base, x, m), mod_pow(base, y, m), m)
            );
        }

        #[test]
        fn modulo_stays_in_range(n in any::<i64>(), m in 1u64..u64::MAX) {
            let r = modulo(n, m);
            prop_assert!(r < m);
            prop_assert_eq!((i128::from(n) - i128::from(r)).rem_euclid(i128::from(m)), 0);
        }

        #[test]
        fn invertible_matrices_invert(entries in prop::array::uniform4(-100i64..100)) {
            let m = Matrix2x2::new(entries);
            if let Ok(inv) = m.inverse() {
                let [a, b, c, d] = m.entries();
                let [e, f, g, h] = inv.inverse.entries();
                let product = [
                    (a * e + b * g) % 26,
                    (a * f + b * h) % 26,
                    (c * e + d * g) % 26,
                    (c * f + d * h) % 26,
                ];
                prop_assert_eq!(product, [1, 0, 0, 1]);
            } else {
                prop_assert_ne!(gcd(m.determinant(), 26), 1);
            }
        }
    }
}

//! Textbook RSA with small primes

use std::fmt;

use crate::error::{EngineError, Result};
use crate::modular::{gcd, is_prime, mod_inverse, mod_pow};
use crate::recorder::StepRecorder;

/// Parameters for one RSA run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaParams {
    /// First prime
    pub p: u64,
    /// Second prime, distinct from `p`
    pub q: u64,
    /// Public exponent
    pub e: u64,
    /// Message as an integer in `[0, n)`
    pub message: u64,
}

/// Key pair derived from two primes and a public exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaKeyPair {
    /// Modulus `p * q`
    pub n: u64,
    /// Euler totient `(p - 1) * (q - 1)`
    pub phi: u64,
    /// Public exponent
    pub e: u64,
    /// Private exponent `e^-1 mod phi`
    pub d: u64,
}

impl RsaKeyPair {
    /// Derive the key pair.
    ///
    /// # Errors
    ///
    /// Fails when `p` or `q` is not prime, when they are equal, or when `e`
    /// is not a unit mod `phi`.
    pub fn derive(p: u64, q: u64, e: u64) -> Result<Self> {
        for (field, value) in [("p", p), ("q", q)] {
            if !is_prime(value) {
                return Err(EngineError::validation(
                    field,
                    format!("{value} is not prime"),
                ));
            }
        }
        if p == q {
            return Err(EngineError::InvalidKey("p and q must be distinct".to_string()));
        }

        let n = p
            .checked_mul(q)
            .ok_or_else(|| EngineError::validation("q", "p * q does not fit in 64 bits"))?;
        let phi = (p - 1) * (q - 1);

        if gcd(e, phi) != 1 {
            return Err(EngineError::InvalidKey(format!(
                "e = {e} is not coprime to phi = {phi}"
            )));
        }
        let d = mod_inverse(e, phi)?;

        Ok(Self { n, phi, e, d })
    }

    /// `m^e mod n`
    pub fn encrypt(&self, message: u64) -> u64 {
        mod_pow(message, self.e, self.n)
    }

    /// `c^d mod n`
    pub fn decrypt(&self, cipher: u64) -> u64 {
        mod_pow(cipher, self.d, self.n)
    }
}

/// Ciphertext and the value recovered from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaOutcome {
    /// `m^e mod n`
    pub ciphertext: u64,
    /// `c^d mod n`
    pub decrypted: u64,
}

impl fmt::Display for RsaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cipher: {} | Decrypted: {}", self.ciphertext, self.decrypted)
    }
}

/// Derive keys, encrypt the message and decrypt it again
pub fn run(params: &RsaParams, rec: &mut dyn StepRecorder) -> Result<RsaOutcome> {
    let keys = RsaKeyPair::derive(params.p, params.q, params.e)?;
    if params.message >= keys.n {
        return Err(EngineError::validation(
            "message",
            format!("must be less than n = {}, got {}", keys.n, params.message),
        ));
    }

    rec.record(format!("n = p*q = {}", keys.n));
    rec.record(format!("phi = (p-1)*(q-1) = {}", keys.phi));
    rec.record(format!("d = e^-1 mod phi = {}", keys.d));

    let ciphertext = keys.encrypt(params.message);
    rec.record(format!("Ciphertext c = m^e mod n = {ciphertext}"));
    let decrypted = keys.decrypt(ciphertext);
    rec.record(format!("Decrypted m = c^d mod n = {decrypted}"));

    Ok(RsaOutcome {
        ciphertext,
        decrypted,
    })
}

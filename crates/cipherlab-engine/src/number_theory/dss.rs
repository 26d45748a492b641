//! DSA-style signatures over a small prime-order subgroup
//!
//! The message hash is SHA-1 read as a big-endian integer and reduced mod
//! `q`. Signing and verification are separate so that a signature can be
//! altered before it is checked.

use std::fmt;

use crate::digest::sha1;
use crate::error::{EngineError, Result};
use crate::modular::{is_prime, mod_inverse, mod_mul, mod_pow};
use crate::recorder::StepRecorder;

/// Parameters for one sign-and-verify run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DssParams {
    /// Prime modulus
    pub p: u64,
    /// Prime subgroup order, divides `p - 1`
    pub q: u64,
    /// Subgroup generator
    pub g: u64,
    /// Private key in `[1, q - 1]`
    pub x: u64,
    /// Per-signature nonce in `[1, q - 1]`
    pub k: u64,
    /// Message to sign
    pub message: String,
}

/// Validated domain parameters `(p, q, g)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DssDomain {
    p: u64,
    q: u64,
    g: u64,
}

/// Signature pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// `(g^k mod p) mod q`
    pub r: u64,
    /// `k^-1 (h + x*r) mod q`
    pub s: u64,
}

/// Intermediates of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// `s^-1 mod q`
    pub w: u64,
    /// `h*w mod q`
    pub u1: u64,
    /// `r*w mod q`
    pub u2: u64,
    /// `(g^u1 * y^u2 mod p) mod q`
    pub v: u64,
    /// Whether `v == r`
    pub valid: bool,
}

impl DssDomain {
    /// Check and wrap domain parameters.
    ///
    /// # Errors
    ///
    /// Fails unless `p` and `q` are prime, `q` divides `p - 1`, and `g` is a
    /// non-trivial element of order `q`.
    pub fn new(p: u64, q: u64, g: u64) -> Result<Self> {
        for (field, value) in [("p", p), ("q", q)] {
            if !is_prime(value) {
                return Err(EngineError::validation(
                    field,
                    format!("{value} is not prime"),
                ));
            }
        }
        if (p - 1) % q != 0 {
            return Err(EngineError::InvalidKey(format!(
                "q = {q} does not divide p - 1 = {}",
                p - 1
            )));
        }
        if !(2..p).contains(&g) {
            return Err(EngineError::validation(
                "g",
                format!("must be between 2 and {}, got {g}", p - 1),
            ));
        }
        if mod_pow(g, q, p) != 1 {
            return Err(EngineError::InvalidKey(format!(
                "g = {g} does not have order q = {q} mod p"
            )));
        }
        Ok(Self { p, q, g })
    }

    /// Prime modulus
    pub const fn p(&self) -> u64 {
        self.p
    }

    /// Subgroup order
    pub const fn q(&self) -> u64 {
        self.q
    }

    /// Generator
    pub const fn g(&self) -> u64 {
        self.g
    }

    fn check_exponent(&self, field: &str, value: u64) -> Result<()> {
        if (1..self.q).contains(&value) {
            Ok(())
        } else {
            Err(EngineError::validation(
                field,
                format!("must be between 1 and {}, got {value}", self.q - 1),
            ))
        }
    }

    /// Public key `g^x mod p`
    pub fn public_key(&self, x: u64) -> Result<u64> {
        self.check_exponent("x", x)?;
        Ok(mod_pow(self.g, x, self.p))
    }

    /// Message hash reduced mod `q`
    pub fn hash(&self, message: &str) -> u64 {
        sha1::digest_mod(message.as_bytes(), self.q)
    }

    /// Sign hash `h` with private key `x` and nonce `k`
    ///
    /// # Errors
    ///
    /// Fails when `x` or `k` is out of range, or when the nonce yields
    /// `r = 0` or `s = 0`.
    pub fn sign(&self, h: u64, x: u64, k: u64) -> Result<Signature> {
        self.check_exponent("x", x)?;
        self.check_exponent("k", k)?;

        let r = mod_pow(self.g, k, self.p) % self.q;
        if r == 0 {
            return Err(EngineError::InvalidKey(
                "r became 0, choose a different k".to_string(),
            ));
        }
        let k_inv = mod_inverse(k, self.q)?;
        let s = mod_mul(k_inv, (h % self.q + mod_mul(x, r, self.q)) % self.q, self.q);
        if s == 0 {
            return Err(EngineError::InvalidKey(
                "s became 0, choose a different k".to_string(),
            ));
        }
        Ok(Signature { r, s })
    }

    /// Verify `signature` over hash `h` against public key `y`.
    ///
    /// A signature with `r` or `s` outside `[1, q - 1]` is rejected without
    /// computing anything, and every intermediate is reported as zero.
    pub fn verify(&self, h: u64, y: u64, signature: Signature) -> Verification {
        let Signature { r, s } = signature;
        let in_range = |v: u64| (1..self.q).contains(&v);
        let w = match mod_inverse(s, self.q) {
            Ok(w) if in_range(r) && in_range(s) => w,
            _ => {
                return Verification {
                    w: 0,
                    u1: 0,
                    u2: 0,
                    v: 0,
                    valid: false,
                };
            }
        };

        let u1 = mod_mul(h, w, self.q);
        let u2 = mod_mul(r, w, self.q);
        let v = mod_mul(mod_pow(self.g, u1, self.p), mod_pow(y, u2, self.p), self.p) % self.q;
        Verification {
            w,
            u1,
            u2,
            v,
            valid: v == r,
        }
    }
}

/// Signature together with its verification verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DssOutcome {
    /// Produced signature
    pub signature: Signature,
    /// Verification result
    pub verification: Verification,
}

impl fmt::Display for DssOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature (r, s): ({}, {}) | Verify: {}",
            self.signature.r,
            self.signature.s,
            if self.verification.valid { "valid" } else { "invalid" }
        )
    }
}

/// Sign the message and verify the fresh signature, recording each quantity
pub fn run(params: &DssParams, rec: &mut dyn StepRecorder) -> Result<DssOutcome> {
    let domain = DssDomain::new(params.p, params.q, params.g)?;

    let y = domain.public_key(params.x)?;
    let h = domain.hash(&params.message);
    let signature = domain.sign(h, params.x, params.k)?;

    rec.record(format!("Public key y = g^x mod p = {y}"));
    rec.record(format!("Hash h = SHA-1(m) mod q = {h}"));
    rec.record(format!("r = (g^k mod p) mod q = {}", signature.r));
    rec.record(format!("s = k^-1 (h + x*r) mod q = {}", signature.s));

    let verification = domain.verify(h, y, signature);
    rec.record(format!("Inverse w = s^-1 mod q = {}", verification.w));
    rec.record(format!("u1 = h*w mod q = {}", verification.u1));
    rec.record(format!("u2 = r*w mod q = {}", verification.u2));
    rec.record(format!("Verify v = {}", verification.v));

    Ok(DssOutcome {
        signature,
        verification,
    })
}

//! Diffie-Hellman key agreement over Z/p

use std::fmt;

use crate::error::{EngineError, Result};
use crate::modular::{is_prime, mod_pow};
use crate::recorder::StepRecorder;

/// Parameters for one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhParams {
    /// Prime modulus
    pub p: u64,
    /// Generator in `[2, p - 1]`
    pub g: u64,
    /// First party's private exponent
    pub a: u64,
    /// Second party's private exponent
    pub b: u64,
}

/// Public values and the agreed secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhOutcome {
    /// `g^a mod p`
    pub public_a: u64,
    /// `g^b mod p`
    pub public_b: u64,
    /// `B^a mod p`, equal to `A^b mod p`
    pub shared: u64,
}

impl fmt::Display for DhOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared key: {}", self.shared)
    }
}

/// Public value `g^secret mod p`
pub fn public_value(p: u64, g: u64, secret: u64) -> u64 {
    mod_pow(g, secret, p)
}

/// Secret derived from the peer's public value
pub fn shared_secret(p: u64, peer_public: u64, secret: u64) -> u64 {
    mod_pow(peer_public, secret, p)
}

/// Run the exchange from both sides and check that they agree
pub fn run(params: &DhParams, rec: &mut dyn StepRecorder) -> Result<DhOutcome> {
    let DhParams { p, g, a, b } = *params;
    if !is_prime(p) {
        return Err(EngineError::validation("p", format!("{p} is not prime")));
    }
    if !(2..p).contains(&g) {
        return Err(EngineError::validation(
            "g",
            format!("must be between 2 and {}, got {g}", p - 1),
        ));
    }

    let public_a = public_value(p, g, a);
    rec.record(format!("Public A = g^a mod p = {public_a}"));
    let public_b = public_value(p, g, b);
    rec.record(format!("Public B = g^b mod p = {public_b}"));

    let from_a = shared_secret(p, public_b, a);
    rec.record(format!("Shared from A = {from_a}"));
    let from_b = shared_secret(p, public_a, b);
    rec.record(format!("Shared from B = {from_b}"));

    if from_a != from_b {
        return Err(EngineError::Inconsistent(format!(
            "shared secrets differ ({from_a} != {from_b})"
        )));
    }

    Ok(DhOutcome {
        public_a,
        public_b,
        shared: from_a,
    })
}

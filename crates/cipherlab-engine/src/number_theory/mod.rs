//! Public-key schemes over small integers
//!
//! Each `run` returns a typed outcome whose `Display` is the response output
//! string.

pub mod diffie_hellman;
pub mod dss;
pub mod rsa;

pub use diffie_hellman::{DhOutcome, DhParams};
pub use dss::{DssDomain, DssOutcome, DssParams, Signature};
pub use rsa::{RsaKeyPair, RsaOutcome, RsaParams};

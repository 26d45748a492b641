//! Single-byte Feistel network
//!
//! A teaching cipher in the shape of DES: the byte is split into 4-bit halves
//! `L` and `R`, and every round computes
//!
//! ```text
//! L' = R
//! R' = L ^ F(R, k)
//! ```
//!
//! The halves are swapped once more on output, so decryption is the same
//! network with the round keys in reverse order.

use crate::error::{EngineError, Result};
use crate::params::Mode;
use crate::recorder::{NoopRecorder, StepRecorder};

/// Largest supported round count
pub const MAX_ROUNDS: u8 = 6;

const NIBBLE: u8 = 0x0F;

/// Parameters for one Feistel run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeistelParams {
    /// Input block
    pub block: u8,
    /// Key byte the round keys are taken from
    pub key: u8,
    /// Round count, `1..=6`
    pub rounds: u8,
    /// Direction
    pub mode: Mode,
}

/// Round key `i`: four key bits starting at bit `i`
pub const fn round_key(key: u8, round: u8) -> u8 {
    (key >> round) & NIBBLE
}

/// Round keys in the order they are applied
pub fn round_keys(key: u8, rounds: u8, mode: Mode) -> Vec<u8> {
    let mut keys: Vec<u8> = (0..rounds).map(|i| round_key(key, i)).collect();
    if mode == Mode::Decrypt {
        keys.reverse();
    }
    keys
}

/// Round function on 4-bit values: `((r ^ k) + ((r << 1) & 0xF)) & 0xF`
pub const fn round_function(right: u8, key: u8) -> u8 {
    ((right ^ key).wrapping_add((right << 1) & NIBBLE)) & NIBBLE
}

/// Encrypt one byte
pub fn encrypt(block: u8, key: u8, rounds: u8) -> Result<u8> {
    run(
        &FeistelParams {
            block,
            key,
            rounds,
            mode: Mode::Encrypt,
        },
        &mut NoopRecorder,
    )
}

/// Decrypt one byte
pub fn decrypt(block: u8, key: u8, rounds: u8) -> Result<u8> {
    run(
        &FeistelParams {
            block,
            key,
            rounds,
            mode: Mode::Decrypt,
        },
        &mut NoopRecorder,
    )
}

/// Run the network, recording the key schedule and every round
pub fn run(params: &FeistelParams, rec: &mut dyn StepRecorder) -> Result<u8> {
    if !(1..=MAX_ROUNDS).contains(&params.rounds) {
        return Err(EngineError::validation(
            "rounds",
            format!("must be between 1 and {MAX_ROUNDS}, got {}", params.rounds),
        ));
    }

    let keys = round_keys(params.key, params.rounds, params.mode);
    rec.record_with(|| {
        let rendered: Vec<String> = keys.iter().map(|k| format!("{k:04b}")).collect();
        format!("Round keys: {}", rendered.join(" "))
    });

    let mut left = params.block >> 4;
    let mut right = params.block & NIBBLE;
    rec.record(format!("Start L={left:04b}, R={right:04b}"));

    for (i, &k) in keys.iter().enumerate() {
        let f = round_function(right, k);
        let new_right = left ^ f;
        left = right;
        right = new_right;
        tracing::trace!(round = i + 1, key = k, f, left, right, "feistel round");
        rec.record(format!(
            "Round {}: k={k:04b} f={f:04b} -> L={left:04b} R={right:04b}",
            i + 1
        ));
    }

    let output = (right << 4) | left;
    rec.record(format!("Output byte: {output}"));
    Ok(output)
}

//! Message digests built on a 512-bit Merkle-Damgård core
//!
//! [`md5`] and [`sha1`] only provide the compression function; padding,
//! block iteration and the summary trace live here. The trace is summary
//! level: message size, padded size, block count and the final digest.

pub mod md5;
pub mod sha1;

use crate::recorder::StepRecorder;

/// Size of one message block in bytes
pub const BLOCK_BYTES: usize = 64;

/// A compression function over 512-bit blocks
pub trait BlockDigest: Default {
    /// Whether the trailing bit length is written big-endian
    const LENGTH_BIG_ENDIAN: bool;

    /// Fold one block into the working registers
    fn compress(&mut self, block: &[u8; BLOCK_BYTES]);

    /// Serialize the registers into the final digest
    fn output(&self) -> Vec<u8>;
}

/// Pad `message`: a single `1` bit, zeros up to 56 mod 64 bytes, then the
/// message length in bits as a 64-bit integer.
pub fn pad(message: &[u8], length_big_endian: bool) -> Vec<u8> {
    let bit_len = (message.len() as u64).wrapping_mul(8);
    let padded_len = (message.len() + 9).div_ceil(BLOCK_BYTES) * BLOCK_BYTES;

    let mut out = Vec::with_capacity(padded_len);
    out.extend_from_slice(message);
    out.push(0x80);
    out.resize(padded_len - 8, 0);
    if length_big_endian {
        out.extend_from_slice(&bit_len.to_be_bytes());
    } else {
        out.extend_from_slice(&bit_len.to_le_bytes());
    }
    out
}

/// Result of hashing one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSummary {
    /// Raw digest bytes
    pub bytes: Vec<u8>,
    /// Padded message length in bits
    pub padded_bits: usize,
    /// Number of 512-bit blocks compressed
    pub blocks: usize,
}

impl DigestSummary {
    /// Lowercase hex of the digest
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// Pad `message` and run every block through `D`
pub fn hash<D: BlockDigest>(message: &[u8]) -> DigestSummary {
    let padded = pad(message, D::LENGTH_BIG_ENDIAN);
    let (blocks, _) = padded.as_chunks::<BLOCK_BYTES>();
    let mut state = D::default();
    for block in blocks {
        state.compress(block);
    }
    DigestSummary {
        bytes: state.output(),
        padded_bits: padded.len() * 8,
        blocks: blocks.len(),
    }
}

/// Hash `text` as UTF-8 and record the summary steps; returns the hex digest
pub fn run<D: BlockDigest>(text: &str, rec: &mut dyn StepRecorder) -> String {
    rec.record(format!(
        "Message length: {} chars ({} bytes)",
        text.chars().count(),
        text.len()
    ));

    let summary = hash::<D>(text.as_bytes());
    let hex = summary.to_hex();

    rec.record(format!("Padded length: {} bits", summary.padded_bits));
    rec.record(format!("Processed blocks: {} x 512-bit", summary.blocks));
    rec.record(format!("Digest: {hex}"));
    hex
}

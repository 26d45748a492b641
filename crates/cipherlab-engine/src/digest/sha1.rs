//! SHA-1 compression (FIPS 180-4)

use super::{BLOCK_BYTES, BlockDigest, DigestSummary};

const INIT: [u32; 5] = [
    0x6745_2301,
    0xefcd_ab89,
    0x98ba_dcfe,
    0x1032_5476,
    0xc3d2_e1f0,
];

/// SHA-1 working registers `H0..H4`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sha1State([u32; 5]);

impl Default for Sha1State {
    fn default() -> Self {
        Self(INIT)
    }
}

#[inline]
const fn round_mix(i: usize, b: u32, c: u32, d: u32) -> (u32, u32) {
    match i / 20 {
        0 => ((b & c) | (!b & d), 0x5a82_7999),
        1 => (b ^ c ^ d, 0x6ed9_eba1),
        2 => ((b & c) | (b & d) | (c & d), 0x8f1b_bcdc),
        _ => (b ^ c ^ d, 0xca62_c1d6),
    }
}

impl BlockDigest for Sha1State {
    const LENGTH_BIG_ENDIAN: bool = true;

    fn compress(&mut self, block: &[u8; BLOCK_BYTES]) {
        let mut w = [0u32; 80];
        for (word, bytes) in w.iter_mut().zip(block.as_chunks::<4>().0) {
            *word = u32::from_be_bytes(*bytes);
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.0;
        for (i, &wi) in w.iter().enumerate() {
            let (f, k) = round_mix(i, b, c, d);
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(wi);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        for (reg, v) in self.0.iter_mut().zip([a, b, c, d, e]) {
            *reg = reg.wrapping_add(v);
        }
    }

    fn output(&self) -> Vec<u8> {
        self.0.iter().flat_map(|w| w.to_be_bytes()).collect()
    }
}

/// SHA-1 of `data`
pub fn digest(data: &[u8]) -> [u8; 20] {
    let mut out = [0u8; 20];
    out.copy_from_slice(&summary(data).bytes);
    out
}

/// SHA-1 of `data` with padding and block statistics
pub fn summary(data: &[u8]) -> DigestSummary {
    super::hash::<Sha1State>(data)
}

/// SHA-1 of `data` read as a big-endian integer, reduced mod `m`
pub fn digest_mod(data: &[u8], m: u64) -> u64 {
    if m == 0 {
        return 0;
    }
    let m = u128::from(m);
    let reduced = digest(data)
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + u128::from(byte)) % m);
    // reduced < m <= u64::MAX
    u64::try_from(reduced).unwrap_or_default()
}

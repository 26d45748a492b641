//! MD5 compression (RFC 1321)

use super::{BLOCK_BYTES, BlockDigest, DigestSummary};

const INIT: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

/// Per-round left rotation amounts
const SHIFTS: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// `floor(abs(sin(i + 1)) * 2^32)`
const K: [u32; 64] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee, 0xf57c_0faf, 0x4787_c62a, 0xa830_4613,
    0xfd46_9501, 0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be, 0x6b90_1122, 0xfd98_7193,
    0xa679_438e, 0x49b4_0821, 0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa, 0xd62f_105d,
    0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8, 0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed,
    0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a, 0xfffa_3942, 0x8771_f681, 0x6d9d_6122,
    0xfde5_380c, 0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70, 0x289b_7ec6, 0xeaa1_27fa,
    0xd4ef_3085, 0x0488_1d05, 0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665, 0xf429_2244,
    0x432a_ff97, 0xab94_23a7, 0xfc93_a039, 0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1, 0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb,
    0xeb86_d391,
];

/// MD5 working registers `A, B, C, D`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Md5State([u32; 4]);

impl Default for Md5State {
    fn default() -> Self {
        Self(INIT)
    }
}

impl BlockDigest for Md5State {
    const LENGTH_BIG_ENDIAN: bool = false;

    fn compress(&mut self, block: &[u8; BLOCK_BYTES]) {
        let mut m = [0u32; 16];
        for (word, bytes) in m.iter_mut().zip(block.as_chunks::<4>().0) {
            *word = u32::from_le_bytes(*bytes);
        }

        let [mut a, mut b, mut c, mut d] = self.0;
        for i in 0..64 {
            let (f, g) = match i / 16 {
                0 => ((b & c) | (!b & d), i),
                1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
                2 => (b ^ c ^ d, (3 * i + 5) % 16),
                _ => (c ^ (b | !d), (7 * i) % 16),
            };
            let f = f.wrapping_add(a).wrapping_add(K[i]).wrapping_add(m[g]);
            a = d;
            d = c;
            c = b;
            b = b.wrapping_add(f.rotate_left(SHIFTS[i]));
        }

        for (reg, v) in self.0.iter_mut().zip([a, b, c, d]) {
            *reg = reg.wrapping_add(v);
        }
    }

    fn output(&self) -> Vec<u8> {
        self.0.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

/// MD5 of `data`
pub fn digest(data: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&summary(data).bytes);
    out
}

/// MD5 of `data` with padding and block statistics
pub fn summary(data: &[u8]) -> DigestSummary {
    super::hash::<Md5State>(data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::recorder::StepTrace;
    use ::md5::{Digest, Md5};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn hex_of(data: &[u8]) -> String {
        hex::encode(digest(data))
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(hex_of(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hex_of(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            hex_of(b"The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn test_two_blocks() {
        let data = [b'a'; 64];
        let summary = summary(&data);
        assert_eq!(summary.blocks, 2);
        assert_eq!(summary.padded_bits, 1024);
        assert_eq!(summary.to_hex(), "014842d480b571495a4a0363793f7367");
    }

    #[test]
    fn test_run_steps() {
        let mut trace = StepTrace::new();
        let hex = crate::digest::run::<Md5State>("security lab", &mut trace);
        assert_eq!(hex, "6bef93248f48a3f57d5608a43b3292ca");
        assert_eq!(
            trace.steps(),
            [
                "Message length: 12 chars (12 bytes)",
                "Padded length: 512 bits",
                "Processed blocks: 1 x 512-bit",
                "Digest: 6bef93248f48a3f57d5608a43b3292ca",
            ]
        );
    }

    proptest! {
        #[test]
        fn matches_reference_crate(data in prop::collection::vec(any::<u8>(), 0..300)) {
            let expected = Md5::digest(&data);
            prop_assert_eq!(&digest(&data)[..], expected.as_slice());
        }
    }
}

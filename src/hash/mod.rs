//! MD5 (RFC 1321) as a streaming hasher, plus the keyed and tree
//! constructions built on top of it.
//!
//! MD5 is used here as a fingerprint for bucket selection and integrity
//! checks, not as a collision-resistant hash.
use digest::generic_array::typenum::{U16, U64};
use digest::generic_array::GenericArray;
use digest::{BlockInput, FixedOutput, Input, Reset};
use std::fmt;

pub mod hmac;
pub mod merkle;

pub const DIGEST_LEN: usize = 16;
const BLOCK_LEN: usize = 64;

quick_error! {
    #[derive(Debug)]
    pub enum HashError {
        InvalidKeyLength {}
        InvalidHex {}
    }
}

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

// Rotation amounts, one row per group of 16 steps.
const SHIFTS: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

// floor(2^32 * |sin(i + 1)|)
const T: [u32; 64] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee, 0xf57c_0faf, 0x4787_c62a, 0xa830_4613, 0xfd46_9501,
    0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be, 0x6b90_1122, 0xfd98_7193, 0xa679_438e, 0x49b4_0821,
    0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa, 0xd62f_105d, 0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8,
    0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed, 0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a,
    0xfffa_3942, 0x8771_f681, 0x6d9d_6122, 0xfde5_380c, 0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70,
    0x289b_7ec6, 0xeaa1_27fa, 0xd4ef_3085, 0x0488_1d05, 0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665,
    0xf429_2244, 0x432a_ff97, 0xab94_23a7, 0xfc93_a039, 0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1, 0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb, 0xeb86_d391,
];

/// A 128-bit MD5 output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(hex: &str) -> Result<Digest, HashError> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| HashError::InvalidHex)?;
        Ok(Digest(bytes))
    }

    /// The digest read as a big-endian number, i.e. the value of its hex
    /// rendering.
    pub fn to_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Digest {
        Digest(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

#[derive(Clone)]
pub struct Md5 {
    state: [u32; 4],
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    length: u64,
}

impl Md5 {
    pub fn new() -> Md5 {
        Md5 {
            state: INITIAL_STATE,
            buffer: [0u8; BLOCK_LEN],
            buffered: 0,
            length: 0,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < BLOCK_LEN {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    pub fn finalize(mut self) -> Digest {
        let bit_length = self.length.wrapping_mul(8);

        // A single 1 bit, then zeros up to 448 mod 512.
        let mut padding = [0u8; BLOCK_LEN];
        padding[0] = 0x80;
        let padding_len = if self.buffered < 56 {
            56 - self.buffered
        } else {
            120 - self.buffered
        };
        self.update(&padding[..padding_len]);
        self.update(&bit_length.to_le_bytes());
        debug_assert_eq!(self.buffered, 0);

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Digest(out)
    }
}

impl Default for Md5 {
    fn default() -> Md5 {
        Md5::new()
    }
}

fn compress(state: &mut [u32; 4], block: &[u8]) {
    let mut x = [0u32; 16];
    for (word, bytes) in x.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];

    for i in 0..64 {
        let (f, k) = match i / 16 {
            0 => ((b & c) | (!b & d), i),
            1 => ((b & d) | (c & !d), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };
        let rotated = a
            .wrapping_add(f)
            .wrapping_add(x[k])
            .wrapping_add(T[i])
            .rotate_left(SHIFTS[i / 16][i % 4]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// One-shot MD5 of `data`.
pub fn digest(data: &[u8]) -> Digest {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize()
}

impl Input for Md5 {
    fn input<B: AsRef<[u8]>>(&mut self, data: B) {
        self.update(data.as_ref());
    }
}

impl BlockInput for Md5 {
    type BlockSize = U64;
}

impl FixedOutput for Md5 {
    type OutputSize = U16;

    fn fixed_result(self) -> GenericArray<u8, U16> {
        GenericArray::clone_from_slice(self.finalize().as_bytes())
    }
}

impl Reset for Md5 {
    fn reset(&mut self) {
        *self = Md5::new();
    }
}

#[cfg(test)]
mod test {
    use super::{digest, Digest, Md5};

    const RFC_1321_VECTORS: [(&str, &str); 7] = [
        ("", "d41d8cd98f00b204e9800998ecf8427e"),
        ("a", "0cc175b9c0f1b6a831c399e269772661"),
        ("abc", "900150983cd24fb0d6963f7d28e17f72"),
        ("message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
        ("abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
        (
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            "d174ab98d277d9f5a5611c2c9f419d9f",
        ),
        (
            "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
            "57edf4a22be3c955ac49da2e2107b67a",
        ),
    ];

    #[test]
    fn test_reference_vectors() {
        for (input, expected) in RFC_1321_VECTORS.iter() {
            assert_eq!(digest(input.as_bytes()).to_hex(), *expected, "input {:?}", input);
        }
        assert_eq!(
            digest(b"The quick brown fox jumps over the lazy dog").to_hex(),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn test_deterministic() {
        let input = b"Noah Porter";
        assert_eq!(digest(input), digest(input));
        assert_ne!(digest(input), digest(b"Noah Porter "));
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 31 % 251) as u8).collect();
        let expected = digest(&data);
        for split in &[1usize, 3, 55, 56, 63, 64, 65, 128, 999] {
            let mut hasher = Md5::new();
            for chunk in data.chunks(*split) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.finalize(), expected, "chunk size {}", split);
        }
    }

    #[test]
    fn test_padding_boundaries() {
        // Lengths around the 448-bit boundary take one or two final blocks.
        for len in 54..=66 {
            let data = vec![b'x'; len];
            let mut hasher = Md5::new();
            hasher.update(&data[..len / 2]);
            hasher.update(&data[len / 2..]);
            assert_eq!(hasher.finalize(), digest(&data));
        }
    }

    #[test]
    fn test_digest_trait_adapter() {
        let via_trait = <Md5 as digest::Digest>::digest(b"abc");
        assert_eq!(via_trait.as_slice(), digest(b"abc").as_bytes());

        let mut hasher = <Md5 as digest::Digest>::new();
        digest::Digest::input(&mut hasher, b"message ");
        digest::Digest::input(&mut hasher, b"digest");
        let out = digest::Digest::result(hasher);
        assert_eq!(out.as_slice(), digest(b"message digest").as_bytes());
    }

    #[test]
    fn test_hex_and_integer_views() {
        let d = digest(b"");
        assert_eq!(Digest::from_hex(&d.to_hex()).unwrap(), d);
        assert_eq!(format!("{}", d), d.to_hex());
        assert_eq!(d.to_u128(), 0xd41d8cd98f00b204e9800998ecf8427e);
        assert!(Digest::from_hex("abc").is_err());
        assert!(Digest::from_hex("zz1d8cd98f00b204e9800998ecf8427e").is_err());
    }

    #[test]
    fn test_single_bit_flip_diffuses() {
        let mut total = 0u32;
        let mut samples = 0u32;
        for i in 0..8 {
            let input = format!("sample input number {}", i).into_bytes();
            let original = digest(&input);
            for bit in 0..8 {
                let mut flipped = input.clone();
                flipped[i % input.len()] ^= 1 << bit;
                let changed: u32 = original
                    .as_bytes()
                    .iter()
                    .zip(digest(&flipped).as_bytes().iter())
                    .map(|(a, b)| (a ^ b).count_ones())
                    .sum();
                assert!(changed > 32, "only {} bits changed", changed);
                total += changed;
                samples += 1;
            }
        }
        assert!(total / samples > 48);
    }
}

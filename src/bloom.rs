//! Bloom Filter
//!
//! A space-efficient probabilistic data structure for set membership testing.
//!
//! A bloom filter can tell you with certainty that a key is **not** in the
//! set (no false negatives), but may occasionally report that a key **is** in
//! the set when it isn't (false positives). The false positive rate depends
//! on the number of bits and hash functions used.
//!
//! ## Usage in levelkv
//!
//! Every disk level owns one filter over the keys it currently stores. Point
//! lookups test the filter first and skip the level's files entirely on a
//! negative answer. Each level seeds its filter differently so that a false
//! positive at one level does not repeat at every level below it.

use crate::types::Key;

/// A bloom filter backed by a bit vector with `k` derived hash functions.
///
/// One 128-bit MurmurHash3 of the key yields `h1` and `h2`; hash `i` is
/// `(h1 + i * h2) mod num_bits`.
#[derive(Clone)]
pub struct BloomFilter {
    /// The bit vector storing the filter state.
    bits: Vec<u8>,
    /// Number of bits in the filter.
    num_bits: u64,
    /// Number of hash functions (k).
    num_hashes: u32,
    /// Seed passed to MurmurHash3.
    seed: u32,
}

impl BloomFilter {
    /// Creates an empty filter with `num_bits` bits and `num_hashes` hashes.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` is 0.
    pub fn new(num_bits: u64, num_hashes: u32, seed: u32) -> Self {
        assert!(num_bits > 0, "num_bits must be > 0");
        let byte_len = num_bits.div_ceil(8) as usize;
        Self {
            bits: vec![0u8; byte_len],
            num_bits,
            num_hashes,
            seed,
        }
    }

    /// Adds a key to the filter.
    pub fn add(&mut self, key: Key) {
        let (h1, h2) = self.hash_pair(key);
        for i in 0..self.num_hashes {
            let bit_idx = self.bit_index(h1, h2, i);
            self.set_bit(bit_idx);
        }
    }

    /// Returns `true` if the key **might** have been added, `false` if it
    /// **definitely** was not.
    #[must_use]
    pub fn test(&self, key: Key) -> bool {
        let (h1, h2) = self.hash_pair(key);
        (0..self.num_hashes).all(|i| self.get_bit(self.bit_index(h1, h2, i)))
    }

    /// Forgets every key added so far.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Returns the number of bits in the filter.
    #[must_use]
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Returns the number of hash functions.
    #[must_use]
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    // ---- Internal helpers ----

    fn hash_pair(&self, key: Key) -> (u64, u64) {
        murmur3_x64_128(&key.to_le_bytes(), self.seed)
    }

    /// Double hashing: h(i) = (h1 + i * h2) mod num_bits.
    fn bit_index(&self, h1: u64, h2: u64, i: u32) -> u64 {
        h1.wrapping_add((i as u64).wrapping_mul(h2)) % self.num_bits
    }

    fn set_bit(&mut self, idx: u64) {
        let byte_idx = (idx / 8) as usize;
        let bit_offset = (idx % 8) as u8;
        self.bits[byte_idx] |= 1 << bit_offset;
    }

    fn get_bit(&self, idx: u64) -> bool {
        let byte_idx = (idx / 8) as usize;
        let bit_offset = (idx % 8) as u8;
        (self.bits[byte_idx] >> bit_offset) & 1 == 1
    }
}

impl std::fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("num_bits", &self.num_bits)
            .field("num_hashes", &self.num_hashes)
            .field("seed", &self.seed)
            .finish()
    }
}

// =============================================================================
// MurmurHash3 (x64, 128-bit)
// =============================================================================

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// MurmurHash3_x64_128, returning the two 64-bit halves.
fn murmur3_x64_128(data: &[u8], seed: u32) -> (u64, u64) {
    let mut h1 = seed as u64;
    let mut h2 = seed as u64;

    let mut blocks = data.chunks_exact(16);
    for block in &mut blocks {
        let k1 = read_u64_le(&block[..8]);
        let k2 = read_u64_le(&block[8..]);

        h1 ^= mix_k1(k1);
        h1 = h1
            .rotate_left(27)
            .wrapping_add(h2)
            .wrapping_mul(5)
            .wrapping_add(0x52dc_e729);

        h2 ^= mix_k2(k2);
        h2 = h2
            .rotate_left(31)
            .wrapping_add(h1)
            .wrapping_mul(5)
            .wrapping_add(0x3849_5ab5);
    }

    let tail = blocks.remainder();
    if tail.len() > 8 {
        h2 ^= mix_k2(read_u64_le(&tail[8..]));
    }
    if !tail.is_empty() {
        h1 ^= mix_k1(read_u64_le(&tail[..tail.len().min(8)]));
    }

    let len = data.len() as u64;
    h1 ^= len;
    h2 ^= len;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    (h1, h2)
}

fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

/// Little-endian read of up to 8 bytes.
fn read_u64_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

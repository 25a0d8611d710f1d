//! Deterministic key hashing.
//!
//! # Responsibilities
//! - Produce a platform-independent 32-bit hash code for any `Hash` key
//! - Apply the avalanche finalizer before index reduction
//!
//! # Design Decisions
//! - FNV-1a (32-bit) over the key's `Hash` byte stream
//! - Integer writes are defined little-endian; `usize`/`isize` widen to
//!   64 bits so 32- and 64-bit targets produce the same code
//! - All mixing arithmetic is wrapping; overflow is expected, not an error

use std::hash::{Hash, Hasher};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hasher with platform-independent integer writes.
///
/// The default `Hasher` integer methods feed native-endian bytes, which
/// would let the same key hash differently across architectures. Every
/// fixed-width write here is pinned to little-endian, and pointer-width
/// writes go through the 64-bit path.
#[derive(Debug, Clone)]
pub struct Fnv32Hasher {
    state: u32,
}

impl Default for Fnv32Hasher {
    fn default() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv32Hasher {
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_u8(&mut self, n: u8) {
        self.write(&[n]);
    }

    fn write_u16(&mut self, n: u16) {
        self.write(&n.to_le_bytes());
    }

    fn write_u32(&mut self, n: u32) {
        self.write(&n.to_le_bytes());
    }

    fn write_u64(&mut self, n: u64) {
        self.write(&n.to_le_bytes());
    }

    fn write_u128(&mut self, n: u128) {
        self.write(&n.to_le_bytes());
    }

    fn write_usize(&mut self, n: usize) {
        self.write_u64(n as u64);
    }
}

/// Hash a key to its 32-bit routing hash code.
pub fn key_hash<K: Hash + ?Sized>(key: &K) -> i32 {
    let mut hasher = Fnv32Hasher::default();
    key.hash(&mut hasher);
    hasher.state as i32
}

/// Avalanche finalizer applied to a raw hash code before index reduction.
///
/// Raw hash codes of similar keys often differ only in a few low bits;
/// this scrambles them so the later modulo sees well-mixed input. The
/// steps must stay bit-for-bit as written: independent processes (and
/// implementations in other languages) agree on key placement only
/// because they run this exact sequence. Wrapping 32-bit arithmetic,
/// unsigned right shifts.
pub fn avalanche(hcode: i32) -> i32 {
    let mut h = hcode.wrapping_add(!hcode.wrapping_shl(9));
    h ^= ((h as u32) >> 14) as i32;
    h = h.wrapping_add(h.wrapping_shl(4));
    h ^= ((h as u32) >> 10) as i32;
    h
}

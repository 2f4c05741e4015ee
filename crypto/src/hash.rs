//! Blake2b hashing for block hashing and proof-of-work validation.
//!
//! The same hash family backs both uses with different digest lengths: 32
//! bytes for block hashes, 8 bytes for proof-of-work.

use blake2::digest::consts::{U32, U8};
use blake2::{Blake2b, Digest};
use lattice_types::BlockHash;

type Blake2b256 = Blake2b<U32>;
type Blake2b64 = Blake2b<U8>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute a 64-bit Blake2b digest of multiple byte slices, used by proof-of-work.
pub fn blake2b_64_multi(parts: &[&[u8]]) -> [u8; 8] {
    let mut hasher = Blake2b64::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 8];
    output.copy_from_slice(&result);
    output
}

/// Hash a block's already-serialized hashable tuple to produce its `BlockHash`.
pub fn hash_block(hashable_bytes: &[u8]) -> BlockHash {
    BlockHash::new(blake2b_256(hashable_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        let h1 = blake2b_256(b"hello lattice");
        let h2 = blake2b_256(b"hello lattice");
        assert_eq!(h1, h2);
    }

    #[test]
    fn blake2b_different_inputs() {
        let h1 = blake2b_256(b"hello");
        let h2 = blake2b_256(b"world");
        assert_ne!(h1, h2);
    }

    #[test]
    fn blake2b_empty() {
        let h = blake2b_256(b"");
        assert_ne!(h, [0u8; 32]);
    }

    #[test]
    fn blake2b_multi_equivalent() {
        let single = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn hash_block_returns_blockhash() {
        let h = hash_block(b"test block data");
        assert!(!h.is_zero());
    }

    #[test]
    fn pow_digest_is_eight_bytes_and_deterministic() {
        let a = blake2b_64_multi(&[&1u64.to_le_bytes(), &[2u8; 32]]);
        let b = blake2b_64_multi(&[&1u64.to_le_bytes(), &[2u8; 32]]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }
}

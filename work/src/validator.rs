//! Proof-of-work validation.
//!
//! Validates `hash(work ∥ root)`, work first: the nonce's natural
//! little-endian bytes followed by the 32-byte root the work is anchored to
//! (a block's `previous`, or `account` for an open). The digest's bytes,
//! read as a little-endian integer, must meet or exceed the threshold.

use lattice_crypto::blake2b_64_multi;
use lattice_types::{BlockHash, Work};

/// Validate that `work` meets `threshold` when anchored to `root`.
pub fn validate_work(work: Work, root: &BlockHash, threshold: u64) -> bool {
    let digest = blake2b_64_multi(&[&work.to_le_bytes(), root.as_bytes()]);
    let value = u64::from_le_bytes(digest);
    value >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_work(root: &BlockHash, threshold: u64) -> Work {
        (0u64..)
            .map(Work)
            .find(|w| validate_work(*w, root, threshold))
            .expect("a satisfying nonce exists within range for a low test threshold")
    }

    #[test]
    fn found_work_validates() {
        let root = BlockHash::from([0xDEu8; 32]);
        let threshold = 0x0000_0000_0000_0001;
        let work = find_work(&root, threshold);
        assert!(validate_work(work, &root, threshold));
    }

    #[test]
    fn zero_threshold_always_passes() {
        let root = BlockHash::from([0u8; 32]);
        assert!(validate_work(Work(0), &root, 0));
    }

    #[test]
    fn max_threshold_rejects_arbitrary_nonce() {
        let root = BlockHash::from([0xFFu8; 32]);
        assert!(!validate_work(Work(12345), &root, u64::MAX));
    }

    #[test]
    fn different_roots_change_the_digest() {
        let r1 = BlockHash::from([0x11u8; 32]);
        let r2 = BlockHash::from([0x22u8; 32]);
        let w = Work(999);
        let d1 = u64::from_le_bytes(blake2b_64_multi(&[&w.to_le_bytes(), r1.as_bytes()]));
        let d2 = u64::from_le_bytes(blake2b_64_multi(&[&w.to_le_bytes(), r2.as_bytes()]));
        assert_ne!(d1, d2);
    }

    #[test]
    fn work_order_is_work_then_root() {
        // Swapping the concatenation order must change the digest: this
        // pins the ordering mandated by the block codec.
        let root = BlockHash::from([0x33u8; 32]);
        let w = Work(42);
        let correct = blake2b_64_multi(&[&w.to_le_bytes(), root.as_bytes()]);
        let swapped = blake2b_64_multi(&[root.as_bytes(), &w.to_le_bytes()]);
        assert_ne!(correct, swapped);
    }
}

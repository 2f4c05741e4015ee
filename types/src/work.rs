//! Proof-of-work nonce, a 64-bit value attached to every block's wire form.

use serde::{Deserialize, Serialize};

/// The 64-bit proof-of-work nonce accompanying a block.
///
/// Validity is a property of `(nonce, root, threshold)`, checked by
/// `lattice-work`; this type is just the bit pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Work(pub u64);

impl Work {
    pub const ZERO: Self = Self(0);

    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }
}

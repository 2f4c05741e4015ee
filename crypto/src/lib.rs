//! Cryptographic primitives for the ledger core.
//!
//! - **Ed25519** for signing and signature verification.
//! - **Blake2b** for hashing, at two digest lengths: 32 bytes for block
//!   hashes, 8 bytes for proof-of-work.
//! - Human-readable account string encoding with a `lat_` prefix.

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{account_from_string, account_to_string};
pub use hash::{blake2b_256, blake2b_256_multi, blake2b_64_multi, hash_block};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};

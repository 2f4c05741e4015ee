//! Fundamental types for the ledger core.
//!
//! This crate defines the primitives shared across every other crate in the
//! workspace: accounts, hashes, amounts, keys, epochs, work nonces, and
//! per-network parameters. No crate outside this workspace's ledger stack
//! depends on it; it has no dependency on `lattice-crypto` or `lattice-store`.

pub mod account;
pub mod amount;
pub mod epoch;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod params;
pub mod time;
pub mod work;

pub use account::Account;
pub use amount::Amount;
pub use epoch::Epoch;
pub use error::TypesError;
pub use hash::BlockHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use params::LedgerConstants;
pub use time::Timestamp;
pub use work::Work;

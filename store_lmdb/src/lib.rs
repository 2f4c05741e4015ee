//! LMDB storage backend for the ledger core.
//!
//! Implements every table trait from `lattice-store` on top of `heed`.
//! Fixed-width binary encodings live in [`codec`]; transaction lifetime
//! erasure lives in [`transaction`]; everything else is one file per table.

pub mod account;
pub mod block;
pub mod codec;
pub mod confirmation_height;
pub mod environment;
pub mod error;
pub mod final_vote;
pub mod frontier;
pub mod integrity;
pub mod meta;
pub mod online_weight;
pub mod peer;
pub mod pending;
pub mod pruned;
pub mod representation;
pub mod transaction;
pub mod unchecked;
pub mod version;

pub use environment::LmdbStore;
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
pub use transaction::{LmdbReadTransaction, LmdbWriteTransaction};

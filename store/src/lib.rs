//! Abstract storage traits for the ledger core.
//!
//! Every storage backend (LMDB today, in-memory for testing) implements
//! these traits against the explicit transaction handles in [`transaction`].
//! The rest of the codebase depends only on the traits here, never on a
//! concrete backend.

pub mod account;
pub mod block;
pub mod confirmation_height;
pub mod error;
pub mod final_vote;
pub mod frontier;
pub mod meta;
pub mod online_weight;
pub mod peer;
pub mod pending;
pub mod pruned;
pub mod representation;
pub mod transaction;
pub mod unchecked;
pub mod version;

pub use account::{AccountInfo, AccountStore};
pub use block::{BlockStore, Sideband};
pub use confirmation_height::{ConfirmationHeightInfo, ConfirmationHeightStore};
pub use error::StoreError;
pub use final_vote::FinalVoteStore;
pub use frontier::FrontierStore;
pub use meta::MetaStore;
pub use online_weight::OnlineWeightStore;
pub use peer::PeerStore;
pub use pending::{PendingKey, PendingRecord, PendingStore};
pub use pruned::PrunedStore;
pub use representation::RepresentationStore;
pub use transaction::{ReadTransaction, Transaction, WriteTransaction};
pub use unchecked::UncheckedStore;
pub use version::{VersionStore, STORE_VERSION_CURRENT, STORE_VERSION_MINIMUM};

/// Configuration accepted by any store implementation, deserializable from
/// the node's TOML config alongside the engine's own `LedgerConfig`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StoreConfig {
    pub max_map_size_mb: u64,
    pub max_readers: u32,
    pub pruning: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_map_size_mb: 64 * 1024,
            max_readers: 128,
            pruning: false,
        }
    }
}

/// The full set of tables a store implementation must provide. Combining
/// them into one trait lets the ledger crate hold a single `Arc<dyn Store>`
/// instead of threading eleven separate trait objects.
pub trait Store:
    AccountStore
    + BlockStore
    + ConfirmationHeightStore
    + FinalVoteStore
    + FrontierStore
    + MetaStore
    + OnlineWeightStore
    + PeerStore
    + PendingStore
    + PrunedStore
    + RepresentationStore
    + UncheckedStore
    + VersionStore
{
    /// Begin a read transaction (a consistent snapshot at this instant).
    fn begin_read(&self) -> Box<dyn ReadTransaction + '_>;

    /// Begin a write transaction. Blocks until any other write transaction
    /// on this store has committed or aborted.
    fn begin_write(&self) -> Box<dyn WriteTransaction + '_>;
}

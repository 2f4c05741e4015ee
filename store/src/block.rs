//! Block table: the content-addressed graph itself.
//!
//! Block bodies are stored as their wire-form bytes (hashable tuple ∥
//! signature ∥ work); the codec that produces and parses those bytes lives
//! in the ledger crate, not here. The store only needs to move bytes and to
//! track each block's sideband and successor pointer.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::{Account, Amount, BlockHash, Epoch, Timestamp};

/// Per-block metadata kept outside the hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sideband {
    pub account: Account,
    pub height: u64,
    pub balance: Amount,
    pub timestamp: Timestamp,
    pub is_send: bool,
    pub is_receive: bool,
    pub is_epoch: bool,
    pub epoch: Epoch,
    /// Epoch of the matching pending record, for receives; `Epoch::Unspecified` otherwise.
    pub source_epoch: Epoch,
}

pub trait BlockStore {
    fn put(
        &self,
        txn: &mut dyn WriteTransaction,
        hash: &BlockHash,
        block_bytes: &[u8],
        sideband: &Sideband,
    ) -> Result<(), StoreError>;

    fn get(
        &self,
        txn: &dyn ReadTransaction,
        hash: &BlockHash,
    ) -> Result<Option<(Vec<u8>, Sideband)>, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError>;

    fn exists(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, StoreError> {
        Ok(self.get(txn, hash)?.is_some())
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError>;

    /// All block hashes belonging to one account's chain, oldest first.
    fn account_blocks(
        &self,
        txn: &dyn ReadTransaction,
        account: &Account,
    ) -> Result<Vec<BlockHash>, StoreError>;

    fn successor(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<BlockHash>, StoreError>;

    /// Set `hash`'s successor pointer, called when a new block is appended
    /// onto `hash`.
    fn successor_set(
        &self,
        txn: &mut dyn WriteTransaction,
        hash: &BlockHash,
        successor: &BlockHash,
    ) -> Result<(), StoreError>;

    /// Reset `hash`'s successor pointer to zero, called when the block built
    /// on top of it is rolled back.
    fn successor_clear(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError>;
}

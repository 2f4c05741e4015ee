//! Pending-receivable table, keyed by `(destination, send-hash)`.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::{Account, Amount, BlockHash, Epoch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingKey {
    pub destination: Account,
    pub send_hash: BlockHash,
}

impl PendingKey {
    pub fn new(destination: Account, send_hash: BlockHash) -> Self {
        Self { destination, send_hash }
    }
}

/// An unreceived send, recorded at the moment the send was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRecord {
    pub source: Account,
    pub amount: Amount,
    pub epoch: Epoch,
}

pub trait PendingStore {
    fn put(
        &self,
        txn: &mut dyn WriteTransaction,
        key: &PendingKey,
        record: &PendingRecord,
    ) -> Result<(), StoreError>;

    fn get(&self, txn: &dyn ReadTransaction, key: &PendingKey) -> Result<Option<PendingRecord>, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, key: &PendingKey) -> Result<(), StoreError>;

    fn exists(&self, txn: &dyn ReadTransaction, key: &PendingKey) -> Result<bool, StoreError> {
        Ok(self.get(txn, key)?.is_some())
    }

    /// All pending entries for one destination account, ordered by send hash.
    fn for_account(
        &self,
        txn: &dyn ReadTransaction,
        destination: &Account,
    ) -> Result<Vec<(PendingKey, PendingRecord)>, StoreError>;

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError>;
}

//! Pruned set: hashes whose block bodies have been discarded but whose
//! existence must remain observable (`block_or_pruned_exists`).

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::BlockHash;

pub trait PrunedStore {
    fn put(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError>;

    fn exists(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError>;

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError>;
}

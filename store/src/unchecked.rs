//! Unchecked cache: blocks that failed validation with a gap verdict
//! (`gap_previous`, `gap_source`, `gap_epoch_open_pending`), held keyed by
//! the hash they are waiting on so the bootstrap/sync subsystem can retry
//! them once the dependency arrives. The core only stores and retrieves;
//! scheduling retries is the external subsystem's job.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::BlockHash;

pub trait UncheckedStore {
    /// Record `block_bytes` as waiting on `dependency`.
    fn put(
        &self,
        txn: &mut dyn WriteTransaction,
        dependency: &BlockHash,
        block_bytes: &[u8],
    ) -> Result<(), StoreError>;

    /// All blocks waiting on `dependency`.
    fn get(&self, txn: &dyn ReadTransaction, dependency: &BlockHash) -> Result<Vec<Vec<u8>>, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, dependency: &BlockHash) -> Result<(), StoreError>;

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError>;
}

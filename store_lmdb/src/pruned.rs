use lattice_store::{PrunedStore, ReadTransaction, StoreError, WriteTransaction};
use lattice_types::BlockHash;

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl PrunedStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.pruned.put(wtxn, hash.as_bytes(), &[]).map_err(LmdbError::from)?;
        Ok(())
    }

    fn exists(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, StoreError> {
        let rtxn = ro(txn);
        Ok(self.pruned.get(rtxn, hash.as_bytes()).map_err(LmdbError::from)?.is_some())
    }

    fn del(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.pruned.delete(wtxn, hash.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError> {
        let rtxn = ro(txn);
        Ok(self.pruned.len(rtxn).map_err(LmdbError::from)?)
    }
}

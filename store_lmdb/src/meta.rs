//! LMDB implementation of MetaStore: a plain key/value table for internal
//! bookkeeping. Schema versioning lives in `version.rs`, not here.

use lattice_store::{MetaStore, ReadTransaction, StoreError, WriteTransaction};

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl MetaStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.meta.put(wtxn, key.as_bytes(), value).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = ro(txn);
        Ok(self.meta.get(rtxn, key.as_bytes()).map_err(LmdbError::from)?.map(|v| v.to_vec()))
    }

    fn del(&self, txn: &mut dyn WriteTransaction, key: &str) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.meta.delete(wtxn, key.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }
}

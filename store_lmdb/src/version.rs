//! Schema version, stored as a reserved key in the `meta` table.

use lattice_store::{ReadTransaction, StoreError, VersionStore, WriteTransaction};

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

const VERSION_KEY: &[u8] = b"__schema_version";

impl VersionStore for LmdbStore {
    fn get(&self, txn: &dyn ReadTransaction) -> Result<Option<u32>, StoreError> {
        let rtxn = ro(txn);
        match self.meta.get(rtxn, VERSION_KEY).map_err(LmdbError::from)? {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| StoreError::Corruption("schema version".into()))?;
                Ok(Some(u32::from_be_bytes(arr)))
            }
            None => Ok(None),
        }
    }

    fn put(&self, txn: &mut dyn WriteTransaction, version: u32) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.meta.put(wtxn, VERSION_KEY, &version.to_be_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }
}

//! LMDB implementation of FrontierStore: legacy-frontier hash -> account.

use lattice_store::{FrontierStore, ReadTransaction, StoreError, WriteTransaction};
use lattice_types::{Account, BlockHash};

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl FrontierStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash, account: &Account) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.frontiers.put(wtxn, hash.as_bytes(), account.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<Account>, StoreError> {
        let rtxn = ro(txn);
        match self.frontiers.get(rtxn, hash.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => {
                let arr: [u8; 32] = bytes.try_into().map_err(|_| StoreError::Corruption("frontier value".into()))?;
                Ok(Some(Account::new(arr)))
            }
            None => Ok(None),
        }
    }

    fn del(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.frontiers.delete(wtxn, hash.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter(&self, txn: &dyn ReadTransaction) -> Result<Vec<(BlockHash, Account)>, StoreError> {
        let rtxn = ro(txn);
        let mut out = Vec::new();
        for entry in self.frontiers.iter(rtxn).map_err(LmdbError::from)? {
            let (key, value) = entry.map_err(LmdbError::from)?;
            let hash = BlockHash::from_slice(key).ok_or_else(|| StoreError::Corruption("frontier key".into()))?;
            let arr: [u8; 32] = value.try_into().map_err(|_| StoreError::Corruption("frontier value".into()))?;
            out.push((hash, Account::new(arr)));
        }
        Ok(out)
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError> {
        let rtxn = ro(txn);
        Ok(self.frontiers.len(rtxn).map_err(LmdbError::from)?)
    }
}

//! LMDB implementation of FinalVoteStore: `account -> finalized hash`.

use lattice_store::{FinalVoteStore, ReadTransaction, StoreError, WriteTransaction};
use lattice_types::{Account, BlockHash};

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl FinalVoteStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, account: &Account, hash: &BlockHash) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.final_votes.put(wtxn, account.as_bytes(), hash.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<BlockHash>, StoreError> {
        let rtxn = ro(txn);
        match self.final_votes.get(rtxn, account.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => Ok(Some(BlockHash::from_slice(bytes).ok_or_else(|| StoreError::Corruption("final vote hash".into()))?)),
            None => Ok(None),
        }
    }

    fn clear(&self, txn: &mut dyn WriteTransaction, account: &Account) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.final_votes.delete(wtxn, account.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }
}

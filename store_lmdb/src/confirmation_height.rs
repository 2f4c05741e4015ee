use lattice_store::{ConfirmationHeightInfo, ConfirmationHeightStore, ReadTransaction, StoreError, WriteTransaction};
use lattice_types::Account;

use crate::codec::{decode_confirmation_height, encode_confirmation_height};
use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl ConfirmationHeightStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, account: &Account, info: &ConfirmationHeightInfo) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.confirmation_height
            .put(wtxn, account.as_bytes(), &encode_confirmation_height(info))
            .map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<ConfirmationHeightInfo>, StoreError> {
        let rtxn = ro(txn);
        match self.confirmation_height.get(rtxn, account.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => Ok(Some(decode_confirmation_height(bytes)?)),
            None => Ok(None),
        }
    }

    fn del(&self, txn: &mut dyn WriteTransaction, account: &Account) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.confirmation_height.delete(wtxn, account.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError> {
        let rtxn = ro(txn);
        Ok(self.confirmation_height.len(rtxn).map_err(LmdbError::from)?)
    }
}

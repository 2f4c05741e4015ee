//! LMDB implementation of AccountStore — fixed-width binary records,
//! byte-keyed by account.

use lattice_store::{AccountInfo, AccountStore, ReadTransaction, StoreError, WriteTransaction};
use lattice_types::Account;

use crate::codec::{decode_account_info, encode_account_info};
use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl AccountStore for LmdbStore {
    fn get(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<AccountInfo>, StoreError> {
        let rtxn = ro(txn);
        match self.accounts.get(rtxn, account.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => Ok(Some(decode_account_info(bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, txn: &mut dyn WriteTransaction, account: &Account, info: &AccountInfo) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.accounts
            .put(wtxn, account.as_bytes(), &encode_account_info(info))
            .map_err(LmdbError::from)?;
        Ok(())
    }

    fn del(&self, txn: &mut dyn WriteTransaction, account: &Account) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.accounts.delete(wtxn, account.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError> {
        let rtxn = ro(txn);
        Ok(self.accounts.len(rtxn).map_err(LmdbError::from)?)
    }

    fn iter_from(&self, txn: &dyn ReadTransaction, start: &Account) -> Result<Vec<(Account, AccountInfo)>, StoreError> {
        let rtxn = ro(txn);
        let mut out = Vec::new();
        let lower = *start.as_bytes();
        let range = self.accounts.range(rtxn, &(lower.as_slice()..)).map_err(LmdbError::from)?;
        for entry in range {
            let (key, value) = entry.map_err(LmdbError::from)?;
            let account = Account::new(key.try_into().map_err(|_| StoreError::Corruption("account key".into()))?);
            out.push((account, decode_account_info(value)?));
        }
        Ok(out)
    }
}

//! Account-info table: one record per opened account.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::{Account, Amount, BlockHash, Epoch, Timestamp};

/// Per-account ledger state, keyed by account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInfo {
    /// Frontier (head) block hash.
    pub head: BlockHash,
    pub representative: Account,
    pub balance: Amount,
    pub modified: Timestamp,
    pub block_count: u64,
    pub epoch: Epoch,
}

pub trait AccountStore {
    fn get(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<AccountInfo>, StoreError>;

    fn put(
        &self,
        txn: &mut dyn WriteTransaction,
        account: &Account,
        info: &AccountInfo,
    ) -> Result<(), StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, account: &Account) -> Result<(), StoreError>;

    fn exists(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<bool, StoreError> {
        Ok(self.get(txn, account)?.is_some())
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError>;

    /// Ordered iteration of accounts with key >= `start`, ascending.
    fn iter_from(
        &self,
        txn: &dyn ReadTransaction,
        start: &Account,
    ) -> Result<Vec<(Account, AccountInfo)>, StoreError>;
}

//! Legacy-frontier index: `block hash -> owning account`.
//!
//! Only chains whose head is still a legacy block are indexed here; once an
//! account's head becomes a state block its entry is removed and its
//! frontier is resolved through the account-info table instead.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::{Account, BlockHash};

pub trait FrontierStore {
    fn put(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash, account: &Account) -> Result<(), StoreError>;

    fn get(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<Account>, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError>;

    fn iter(&self, txn: &dyn ReadTransaction) -> Result<Vec<(BlockHash, Account)>, StoreError>;

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError>;
}

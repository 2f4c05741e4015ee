//! Confirmation-height table: the highest chain index an account's blocks
//! have been declared final by the (external) election subsystem.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::{Account, BlockHash};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationHeightInfo {
    pub height: u64,
    pub frontier: BlockHash,
}

pub trait ConfirmationHeightStore {
    fn put(
        &self,
        txn: &mut dyn WriteTransaction,
        account: &Account,
        info: &ConfirmationHeightInfo,
    ) -> Result<(), StoreError>;

    fn get(
        &self,
        txn: &dyn ReadTransaction,
        account: &Account,
    ) -> Result<Option<ConfirmationHeightInfo>, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, account: &Account) -> Result<(), StoreError>;

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError>;
}

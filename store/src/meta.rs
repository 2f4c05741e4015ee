//! Generic key-value table for internal bookkeeping that doesn't belong to
//! any domain-specific table.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;

pub trait MetaStore {
    fn put(&self, txn: &mut dyn WriteTransaction, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get(&self, txn: &dyn ReadTransaction, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, key: &str) -> Result<(), StoreError>;
}

//! Representation table: `account -> weight delegated to it`.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::{Account, Amount};

pub trait RepresentationStore {
    fn put(&self, txn: &mut dyn WriteTransaction, rep: &Account, weight: Amount) -> Result<(), StoreError>;

    fn get(&self, txn: &dyn ReadTransaction, rep: &Account) -> Result<Amount, StoreError>;

    /// Add `amount` to `rep`'s weight, creating the entry at `amount` if absent.
    fn add(&self, txn: &mut dyn WriteTransaction, rep: &Account, amount: Amount) -> Result<(), StoreError>;

    /// Subtract `amount` from `rep`'s weight. The entry is kept (possibly at
    /// zero) rather than deleted — a zero-weight entry is just "no weight",
    /// not "no record".
    fn sub(&self, txn: &mut dyn WriteTransaction, rep: &Account, amount: Amount) -> Result<(), StoreError>;

    fn iter(&self, txn: &dyn ReadTransaction) -> Result<Vec<(Account, Amount)>, StoreError>;
}

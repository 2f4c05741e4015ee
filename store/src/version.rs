//! Store schema version. A one-entry table consulted on open; see
//! `StoreError::UnsupportedVersion` for the refusal path.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;

/// Oldest on-disk schema this crate can still read (and upgrade from).
pub const STORE_VERSION_MINIMUM: u32 = 1;
/// Schema version this crate writes.
pub const STORE_VERSION_CURRENT: u32 = 1;

pub trait VersionStore {
    fn get(&self, txn: &dyn ReadTransaction) -> Result<Option<u32>, StoreError>;

    fn put(&self, txn: &mut dyn WriteTransaction, version: u32) -> Result<(), StoreError>;
}

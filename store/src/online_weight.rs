//! Online-weight samples: periodic snapshots of total voting weight seen
//! online, used by the (external) election subsystem to size quorums.
//! The core only persists and trims the samples; it does not interpret them.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::Amount;

pub trait OnlineWeightStore {
    fn put(&self, txn: &mut dyn WriteTransaction, timestamp: u64, weight: Amount) -> Result<(), StoreError>;

    /// Most recent samples, newest first, capped at `limit`.
    fn recent(&self, txn: &dyn ReadTransaction, limit: usize) -> Result<Vec<(u64, Amount)>, StoreError>;

    /// Drop all but the most recent `keep` samples.
    fn trim(&self, txn: &mut dyn WriteTransaction, keep: usize) -> Result<usize, StoreError>;
}

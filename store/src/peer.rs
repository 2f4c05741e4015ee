//! Persistent peer cache: lets the node reconnect on restart without
//! relying solely on bootstrap peers. The core only persists and purges
//! entries; dialing and liveness tracking are the network layer's job.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;

pub trait PeerStore {
    fn put(&self, txn: &mut dyn WriteTransaction, addr: &str, last_seen: u64) -> Result<(), StoreError>;

    fn get(&self, txn: &dyn ReadTransaction, addr: &str) -> Result<Option<u64>, StoreError>;

    fn del(&self, txn: &mut dyn WriteTransaction, addr: &str) -> Result<(), StoreError>;

    fn iter(&self, txn: &dyn ReadTransaction) -> Result<Vec<(String, u64)>, StoreError>;

    fn clear(&self, txn: &mut dyn WriteTransaction) -> Result<(), StoreError>;
}

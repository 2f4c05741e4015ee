//! LMDB implementation of PendingStore.
//!
//! Key format: `destination(32) || send_hash(32)` (see `codec::pending_key`).
//! All keys share the 64-byte width, so a prefix scan for one destination is
//! a plain range query on its 32-byte prefix.

use lattice_store::{PendingKey, PendingRecord, PendingStore, ReadTransaction, StoreError, WriteTransaction};
use lattice_types::{Account, BlockHash};

use crate::codec::{decode_pending, encode_pending, pending_key};
use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl PendingStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, key: &PendingKey, record: &PendingRecord) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        let raw_key = pending_key(&key.destination, &key.send_hash);
        self.pending.put(wtxn, &raw_key, &encode_pending(record)).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, key: &PendingKey) -> Result<Option<PendingRecord>, StoreError> {
        let rtxn = ro(txn);
        let raw_key = pending_key(&key.destination, &key.send_hash);
        match self.pending.get(rtxn, &raw_key).map_err(LmdbError::from)? {
            Some(bytes) => Ok(Some(decode_pending(bytes)?)),
            None => Ok(None),
        }
    }

    fn del(&self, txn: &mut dyn WriteTransaction, key: &PendingKey) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        let raw_key = pending_key(&key.destination, &key.send_hash);
        self.pending.delete(wtxn, &raw_key).map_err(LmdbError::from)?;
        Ok(())
    }

    fn for_account(&self, txn: &dyn ReadTransaction, destination: &Account) -> Result<Vec<(PendingKey, PendingRecord)>, StoreError> {
        let rtxn = ro(txn);
        let mut out = Vec::new();
        let lower = pending_key(destination, &BlockHash::ZERO);
        let range = self.pending.range(rtxn, &(lower.as_slice()..)).map_err(LmdbError::from)?;
        for entry in range {
            let (key, value) = entry.map_err(LmdbError::from)?;
            if &key[0..32] != destination.as_bytes().as_slice() {
                break;
            }
            let send_hash = BlockHash::from_slice(&key[32..64]).ok_or_else(|| StoreError::Corruption("pending key".into()))?;
            out.push((PendingKey::new(*destination, send_hash), decode_pending(value)?));
        }
        Ok(out)
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError> {
        let rtxn = ro(txn);
        Ok(self.pending.len(rtxn).map_err(LmdbError::from)?)
    }
}

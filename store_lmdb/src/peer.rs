//! LMDB implementation of PeerStore.

use lattice_store::{PeerStore, ReadTransaction, StoreError, WriteTransaction};

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl PeerStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, addr: &str, last_seen: u64) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.peers.put(wtxn, addr.as_bytes(), &last_seen.to_be_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, addr: &str) -> Result<Option<u64>, StoreError> {
        let rtxn = ro(txn);
        match self.peers.get(rtxn, addr.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.try_into().map_err(|_| StoreError::Corruption("peer timestamp".into()))?;
                Ok(Some(u64::from_be_bytes(arr)))
            }
            None => Ok(None),
        }
    }

    fn del(&self, txn: &mut dyn WriteTransaction, addr: &str) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.peers.delete(wtxn, addr.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter(&self, txn: &dyn ReadTransaction) -> Result<Vec<(String, u64)>, StoreError> {
        let rtxn = ro(txn);
        let mut out = Vec::new();
        for entry in self.peers.iter(rtxn).map_err(LmdbError::from)? {
            let (key, val) = entry.map_err(LmdbError::from)?;
            let addr = std::str::from_utf8(key).map_err(|_| StoreError::Corruption("peer address".into()))?;
            let arr: [u8; 8] = val.try_into().map_err(|_| StoreError::Corruption("peer timestamp".into()))?;
            out.push((addr.to_string(), u64::from_be_bytes(arr)));
        }
        Ok(out)
    }

    fn clear(&self, txn: &mut dyn WriteTransaction) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.peers.clear(wtxn).map_err(LmdbError::from)?;
        Ok(())
    }
}

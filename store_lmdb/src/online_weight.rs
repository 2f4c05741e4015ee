use lattice_store::{OnlineWeightStore, ReadTransaction, StoreError, WriteTransaction};
use lattice_types::Amount;

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

fn key(timestamp: u64) -> [u8; 8] {
    timestamp.to_be_bytes()
}

impl OnlineWeightStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, timestamp: u64, weight: Amount) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.online_weight.put(wtxn, &key(timestamp), &weight.to_be_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn recent(&self, txn: &dyn ReadTransaction, limit: usize) -> Result<Vec<(u64, Amount)>, StoreError> {
        let rtxn = ro(txn);
        let mut out = Vec::new();
        for entry in self.online_weight.rev_iter(rtxn).map_err(LmdbError::from)? {
            if out.len() >= limit {
                break;
            }
            let (key, value) = entry.map_err(LmdbError::from)?;
            let ts = u64::from_be_bytes(key.try_into().map_err(|_| StoreError::Corruption("online-weight key".into()))?);
            let amount = Amount::from_be_bytes(value.try_into().map_err(|_| StoreError::Corruption("online-weight value".into()))?);
            out.push((ts, amount));
        }
        Ok(out)
    }

    fn trim(&self, txn: &mut dyn WriteTransaction, keep: usize) -> Result<usize, StoreError> {
        let wtxn = rw(txn);
        let mut keys: Vec<[u8; 8]> = Vec::new();
        for entry in self.online_weight.iter(wtxn).map_err(LmdbError::from)? {
            let (key, _) = entry.map_err(LmdbError::from)?;
            keys.push(key.try_into().map_err(|_| StoreError::Corruption("online-weight key".into()))?);
        }
        keys.sort();
        let drop_count = keys.len().saturating_sub(keep);
        for key in &keys[..drop_count] {
            self.online_weight.delete(wtxn, key).map_err(LmdbError::from)?;
        }
        Ok(drop_count)
    }
}

//! Unchecked cache, keyed by `dependency hash(32) || content hash(32)` so
//! several distinct blocks can wait on the same dependency without
//! colliding; `content hash` is just `blake2b_256` of the stored bytes, not a
//! block hash in the protocol sense.

use lattice_crypto::blake2b_256;
use lattice_store::{ReadTransaction, StoreError, UncheckedStore, WriteTransaction};
use lattice_types::BlockHash;

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

fn key(dependency: &BlockHash, block_bytes: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out[0..32].copy_from_slice(dependency.as_bytes());
    out[32..64].copy_from_slice(&blake2b_256(block_bytes));
    out
}

impl UncheckedStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, dependency: &BlockHash, block_bytes: &[u8]) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.unchecked.put(wtxn, &key(dependency, block_bytes), block_bytes).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, dependency: &BlockHash) -> Result<Vec<Vec<u8>>, StoreError> {
        let rtxn = ro(txn);
        let mut out = Vec::new();
        let lower = *dependency.as_bytes();
        let range = self.unchecked.range(rtxn, &(lower.as_slice()..)).map_err(LmdbError::from)?;
        for entry in range {
            let (key, value) = entry.map_err(LmdbError::from)?;
            if &key[0..32] != dependency.as_bytes().as_slice() {
                break;
            }
            out.push(value.to_vec());
        }
        Ok(out)
    }

    fn del(&self, txn: &mut dyn WriteTransaction, dependency: &BlockHash) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        let mut keys = Vec::new();
        for entry in self.unchecked.iter(wtxn).map_err(LmdbError::from)? {
            let (key, _) = entry.map_err(LmdbError::from)?;
            if &key[0..32] == dependency.as_bytes().as_slice() {
                keys.push(key.to_vec());
            }
        }
        for key in keys {
            self.unchecked.delete(wtxn, &key).map_err(LmdbError::from)?;
        }
        Ok(())
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError> {
        let rtxn = ro(txn);
        Ok(self.unchecked.len(rtxn).map_err(LmdbError::from)?)
    }
}

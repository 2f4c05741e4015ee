//! LMDB implementation of BlockStore. One record per block, self-describing
//! (`len-prefixed block bytes || sideband || successor`), keyed by hash.

use lattice_store::{BlockStore, ReadTransaction, Sideband, StoreError, WriteTransaction};
use lattice_types::{Account, BlockHash};

use crate::codec::{decode_block_record, encode_block_record};
use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl BlockStore for LmdbStore {
    fn put(
        &self,
        txn: &mut dyn WriteTransaction,
        hash: &BlockHash,
        block_bytes: &[u8],
        sideband: &Sideband,
    ) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        let record = encode_block_record(block_bytes, sideband, &BlockHash::ZERO);
        self.blocks.put(wtxn, hash.as_bytes(), &record).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<(Vec<u8>, Sideband)>, StoreError> {
        let rtxn = ro(txn);
        match self.blocks.get(rtxn, hash.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => {
                let (block_bytes, sideband, _successor) = decode_block_record(bytes)?;
                Ok(Some((block_bytes, sideband)))
            }
            None => Ok(None),
        }
    }

    fn del(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.blocks.delete(wtxn, hash.as_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn count(&self, txn: &dyn ReadTransaction) -> Result<u64, StoreError> {
        let rtxn = ro(txn);
        Ok(self.blocks.len(rtxn).map_err(LmdbError::from)?)
    }

    fn account_blocks(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Vec<BlockHash>, StoreError> {
        let rtxn = ro(txn);
        let mut hashes = Vec::new();
        for entry in self.blocks.iter(rtxn).map_err(LmdbError::from)? {
            let (key, value) = entry.map_err(LmdbError::from)?;
            let (_, sideband, _) = decode_block_record(value)?;
            if &sideband.account == account {
                let hash = BlockHash::from_slice(key).ok_or_else(|| StoreError::Corruption("block key".into()))?;
                hashes.push((sideband.height, hash));
            }
        }
        hashes.sort_by_key(|(height, _)| *height);
        Ok(hashes.into_iter().map(|(_, hash)| hash).collect())
    }

    fn successor(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<BlockHash>, StoreError> {
        let rtxn = ro(txn);
        match self.blocks.get(rtxn, hash.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => {
                let (_, _, successor) = decode_block_record(bytes)?;
                if successor.is_zero() {
                    Ok(None)
                } else {
                    Ok(Some(successor))
                }
            }
            None => Ok(None),
        }
    }

    fn successor_set(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash, successor: &BlockHash) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        let existing = self.blocks.get(wtxn, hash.as_bytes()).map_err(LmdbError::from)?;
        let Some(bytes) = existing else {
            return Err(StoreError::NotFound(hash.to_string()));
        };
        let (block_bytes, sideband, _) = decode_block_record(bytes)?;
        let record = encode_block_record(&block_bytes, &sideband, successor);
        self.blocks.put(wtxn, hash.as_bytes(), &record).map_err(LmdbError::from)?;
        Ok(())
    }

    fn successor_clear(&self, txn: &mut dyn WriteTransaction, hash: &BlockHash) -> Result<(), StoreError> {
        self.successor_set(txn, hash, &BlockHash::ZERO)
    }
}

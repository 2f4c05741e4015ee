use lattice_store::{ReadTransaction, RepresentationStore, StoreError, WriteTransaction};
use lattice_types::{Account, Amount};

use crate::transaction::{ro, rw};
use crate::{LmdbError, LmdbStore};

impl RepresentationStore for LmdbStore {
    fn put(&self, txn: &mut dyn WriteTransaction, rep: &Account, weight: Amount) -> Result<(), StoreError> {
        let wtxn = rw(txn);
        self.representation.put(wtxn, rep.as_bytes(), &weight.to_be_bytes()).map_err(LmdbError::from)?;
        Ok(())
    }

    fn get(&self, txn: &dyn ReadTransaction, rep: &Account) -> Result<Amount, StoreError> {
        let rtxn = ro(txn);
        match self.representation.get(rtxn, rep.as_bytes()).map_err(LmdbError::from)? {
            Some(bytes) => {
                let arr: [u8; 16] = bytes.try_into().map_err(|_| StoreError::Corruption("representation weight".into()))?;
                Ok(Amount::from_be_bytes(arr))
            }
            None => Ok(Amount::ZERO),
        }
    }

    fn add(&self, txn: &mut dyn WriteTransaction, rep: &Account, amount: Amount) -> Result<(), StoreError> {
        let current = RepresentationStore::get(self, txn.as_read(), rep)?;
        let updated = current.checked_add(amount).ok_or_else(|| StoreError::Corruption("representation weight overflow".into()))?;
        RepresentationStore::put(self, txn, rep, updated)
    }

    fn sub(&self, txn: &mut dyn WriteTransaction, rep: &Account, amount: Amount) -> Result<(), StoreError> {
        let current = RepresentationStore::get(self, txn.as_read(), rep)?;
        let updated = current.checked_sub(amount).ok_or_else(|| StoreError::Corruption("representation weight underflow".into()))?;
        RepresentationStore::put(self, txn, rep, updated)
    }

    fn iter(&self, txn: &dyn ReadTransaction) -> Result<Vec<(Account, Amount)>, StoreError> {
        let rtxn = ro(txn);
        let mut out = Vec::new();
        for entry in self.representation.iter(rtxn).map_err(LmdbError::from)? {
            let (key, value) = entry.map_err(LmdbError::from)?;
            let account = Account::new(key.try_into().map_err(|_| StoreError::Corruption("representation key".into()))?);
            let amount = Amount::from_be_bytes(value.try_into().map_err(|_| StoreError::Corruption("representation weight".into()))?);
            out.push((account, amount));
        }
        Ok(out)
    }
}

//! Transaction wrappers bridging `heed`'s lifetime-scoped transactions to
//! the lifetime-free `dyn Transaction` handles the abstract store crate
//! passes around.
//!
//! `heed::RoTxn<'env>`/`RwTxn<'env>` borrow the `Env` they were opened
//! against. We erase that borrow with `transmute` the same way rsnano's LMDB
//! backend erases `lmdb::RoTransaction`'s lifetime: the wrapper also owns a
//! cloned `heed::Env` handle (cheap — it's a reference-counted handle to the
//! same environment), and struct field drop order guarantees the erased
//! transaction is dropped before that clone, so the borrow never actually
//! outlives its target.

use std::any::Any;

use lattice_store::{ReadTransaction, Transaction, WriteTransaction};

pub struct LmdbReadTransaction {
    txn: heed::RoTxn<'static>,
    _env: heed::Env,
}

impl LmdbReadTransaction {
    pub(crate) fn new(env: heed::Env) -> Result<Self, heed::Error> {
        let txn = env.read_txn()?;
        // SAFETY: `_env` is dropped after `txn` (declaration order), and no
        // other reference to the erased lifetime escapes this module.
        let txn: heed::RoTxn<'static> = unsafe { std::mem::transmute(txn) };
        Ok(Self { txn, _env: env })
    }
}

impl Transaction for LmdbReadTransaction {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ReadTransaction for LmdbReadTransaction {}

pub struct LmdbWriteTransaction {
    txn: heed::RwTxn<'static>,
    _env: heed::Env,
}

impl LmdbWriteTransaction {
    pub(crate) fn new(env: heed::Env) -> Result<Self, heed::Error> {
        let txn = env.write_txn()?;
        // SAFETY: same argument as `LmdbReadTransaction::new`.
        let txn: heed::RwTxn<'static> = unsafe { std::mem::transmute(txn) };
        Ok(Self { txn, _env: env })
    }

    pub fn commit(self) -> Result<(), heed::Error> {
        self.txn.commit()
    }
}

impl Transaction for LmdbWriteTransaction {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ReadTransaction for LmdbWriteTransaction {}

impl WriteTransaction for LmdbWriteTransaction {
    fn as_read(&self) -> &dyn ReadTransaction {
        self
    }

    fn commit(self: Box<Self>) -> Result<(), lattice_store::StoreError> {
        self.txn.commit().map_err(|e| crate::LmdbError::from(e).into())
    }
}

/// Recover the underlying `heed::RoTxn` from a `dyn ReadTransaction`,
/// regardless of whether it came from a read or a write transaction.
pub(crate) fn ro<'a>(txn: &'a dyn ReadTransaction) -> &'a heed::RoTxn<'static> {
    if let Some(t) = txn.as_any().downcast_ref::<LmdbReadTransaction>() {
        return &t.txn;
    }
    if let Some(t) = txn.as_any().downcast_ref::<LmdbWriteTransaction>() {
        return &t.txn;
    }
    panic!("transaction handle did not originate from lattice-store-lmdb");
}

/// Recover the underlying `heed::RwTxn` from a `dyn WriteTransaction`.
pub(crate) fn rw<'a>(txn: &'a mut dyn WriteTransaction) -> &'a mut heed::RwTxn<'static> {
    txn.as_any_mut()
        .downcast_mut::<LmdbWriteTransaction>()
        .map(|t| &mut t.txn)
        .expect("transaction handle did not originate from lattice-store-lmdb")
}

//! Transaction handles.
//!
//! Every store operation takes an explicit transaction reference rather than
//! locking internally: callers acquire one transaction for the whole of an
//! engine `process` call (or a whole rollback, or a whole read-only query)
//! and thread it through every table access, so that a write transaction's
//! mutations are all-or-nothing and a read transaction's view is a single
//! consistent snapshot for its entire lifetime.

/// Marker implemented by both transaction kinds. `as_any` lets a concrete
/// backend (there is exactly one today: LMDB) recover its own transaction
/// type from the trait object handed around by the store-agnostic crates.
pub trait Transaction {
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// A read-only view of the store, fixed at acquisition time.
pub trait ReadTransaction: Transaction {}

/// A read-write view. Concrete stores permit only one live write
/// transaction at a time; acquiring a second blocks until the first commits
/// or aborts.
pub trait WriteTransaction: Transaction {
    /// Borrow this write transaction as a read transaction, for table
    /// methods that only need to read (a writer always sees its own
    /// uncommitted writes).
    fn as_read(&self) -> &dyn ReadTransaction;

    /// Commit every write made through this transaction. Dropping the
    /// transaction without calling this aborts it.
    fn commit(self: Box<Self>) -> Result<(), crate::StoreError>;
}

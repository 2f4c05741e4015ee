//! Ledger-level error type.
//!
//! `ProcessResult`/rollback/pruning verdicts that are ordinary, expected
//! outcomes of validating untrusted blocks live in [`crate::engine`], not
//! here — this type is for failures of the ledger's own bookkeeping
//! invariants (storage failure, a caller-supplied hash that does not exist,
//! calling `initialize` twice).

use thiserror::Error;

use lattice_store::StoreError;

use crate::block::BlockCodecError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("block codec error: {0}")]
    Codec(#[from] BlockCodecError),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("block not found: {0}")]
    BlockNotFound(String),

    #[error("ledger already initialized from genesis")]
    GenesisAlreadyInitialized,

    #[error("invalid confirmation height update")]
    InvalidConfirmationHeight,

    #[error("inconsistent pending state: {0}")]
    InconsistentPendingState(String),

    #[error("invalid block: {0}")]
    InvalidBlock(String),
}

//! Parse/construction errors for the primitive types in this crate.
//!
//! Store I/O errors and ledger verdicts live in their own crates; this error
//! only covers malformed primitive input (bad hex, wrong-length byte slices,
//! unknown network names).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("unknown network id: {0}")]
    InvalidNetworkId(String),
}

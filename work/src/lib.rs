//! Anti-spam proof-of-work validation.
//!
//! Not mining — a lightweight computational cost that makes flooding the
//! ledger prohibitively expensive while keeping legitimate use free.
//! Generating work is a node-level concern external to this crate; here we
//! only validate that a supplied nonce clears the required threshold.

pub mod error;
pub mod thresholds;
pub mod validator;

pub use error::WorkError;
pub use thresholds::{WorkBlockKind, WorkThresholds};
pub use validator::validate_work;

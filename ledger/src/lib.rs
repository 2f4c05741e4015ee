//! Block-lattice ledger core.
//!
//! Each account has its own chain; transactions are asynchronous and there
//! is no global ordering. This crate owns block validation and storage
//! mutation (`engine`), undoing committed blocks (`rollback`), discarding
//! confirmed history (`pruning`), and the read-only queries built on top
//! (`queries`). It does not run consensus — that's for conflict resolution
//! between competing forks, out of scope here.

pub mod block;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod genesis;
pub mod ledger;
pub mod pruning;
pub mod queries;
pub mod rollback;

pub use block::{Block, BlockKind};
pub use config::LedgerConfig;
pub use engine::{ProcessOutcome, ProcessResult, SignatureClass};
pub use error::LedgerError;
pub use genesis::NetworkParams;
pub use ledger::Ledger;
pub use rollback::RollbackOutcome;

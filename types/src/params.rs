//! Network-wide ledger parameters.
//!
//! Everything a node needs to know before it can validate a single block:
//! which account the genesis supply belongs to, which keys may sign epoch
//! upgrades, and the tunables named in the engine's config struct.

use crate::{Account, Epoch};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-network constants plus the engine's recognized tunables.
///
/// Corresponds to the config struct named in the design notes:
/// `{ pruning, bootstrap_weight_max_blocks, epoch_signer_keys,
/// max_work_generate_difficulty }`, with the network-identifying fields
/// (genesis account/representative) added since those vary per network too.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConstants {
    pub genesis_account: Account,
    pub genesis_representative: Account,
    /// Account whose signature authorizes an epoch-upgrade block for each epoch.
    pub epoch_signer_keys: HashMap<Epoch, Account>,
    pub pruning: bool,
    pub bootstrap_weight_max_blocks: u64,
    pub max_work_generate_difficulty: u64,
}

impl LedgerConstants {
    pub fn epoch_signer(&self, epoch: Epoch) -> Option<Account> {
        self.epoch_signer_keys.get(&epoch).copied()
    }
}

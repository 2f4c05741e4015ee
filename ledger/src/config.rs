//! Node-facing configuration, deserializable from the embedding binary's TOML.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use lattice_types::{Account, Epoch, NetworkId};

/// Everything the engine needs to know before it will validate a single
/// block, plus the tunables an operator is expected to adjust.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub pruning: bool,
    pub bootstrap_weight_max_blocks: u64,
    pub epoch_signer_keys: HashMap<Epoch, Account>,
    pub max_work_generate_difficulty: u64,
    pub network: NetworkId,
    pub data_path: PathBuf,
}

impl LedgerConfig {
    /// Start from a network's built-in constants, with `data_path` supplied
    /// by the embedding binary (the engine has no opinion on where data lives).
    pub fn for_network(network: NetworkId, data_path: PathBuf) -> Self {
        let params = crate::genesis::NetworkParams::for_network(network);
        Self {
            pruning: params.constants.pruning,
            bootstrap_weight_max_blocks: params.constants.bootstrap_weight_max_blocks,
            epoch_signer_keys: params.constants.epoch_signer_keys.clone(),
            max_work_generate_difficulty: params.constants.max_work_generate_difficulty,
            network,
            data_path,
        }
    }
}

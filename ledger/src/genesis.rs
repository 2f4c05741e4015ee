//! Per-network constants and the genesis block that seeds a fresh store.
//!
//! The genesis block is a protocol fact rather than a block anyone submits
//! for validation: it carries the entire initial supply, predates proof-of-
//! work and epoch signing, and is stamped in directly rather than run
//! through [`crate::engine::process`], which assumes a pending record
//! backs every open.

use std::collections::HashMap;
use std::sync::Arc;

use lattice_crypto::keypair_from_seed;
use lattice_store::{AccountInfo, AccountStore, BlockStore, RepresentationStore, Sideband, Store, WriteTransaction};
use lattice_types::{Account, Amount, BlockHash, Epoch, KeyPair, LedgerConstants, NetworkId, Signature, Timestamp, Work};
use lattice_work::WorkThresholds;

use crate::block::{Block, StateBlock};
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Everything [`Ledger::initialize`] needs for one network: its constants
/// and its proof-of-work difficulty schedule.
pub struct NetworkParams {
    pub network: NetworkId,
    pub constants: LedgerConstants,
    pub work_thresholds: WorkThresholds,
}

impl NetworkParams {
    pub fn for_network(network: NetworkId) -> Self {
        match network {
            NetworkId::Live => live_params(),
            NetworkId::Beta => beta_params(),
            NetworkId::Test => test_params(),
        }
    }
}

fn seed_bytes(tag: &[u8]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    let n = tag.len().min(32);
    bytes[..n].copy_from_slice(&tag[..n]);
    bytes
}

fn genesis_keypair(tag: &[u8]) -> KeyPair {
    keypair_from_seed(&seed_bytes(tag))
}

fn epoch_signer_keys(tag: &[u8]) -> HashMap<Epoch, Account> {
    let signer = genesis_keypair(tag);
    let account = Account::from(signer.public);
    let mut map = HashMap::new();
    map.insert(Epoch::Epoch1, account);
    map.insert(Epoch::Epoch2, account);
    map
}

fn live_params() -> NetworkParams {
    let genesis = genesis_keypair(b"lattice-live-genesis");
    let account = Account::from(genesis.public);
    NetworkParams {
        network: NetworkId::Live,
        constants: LedgerConstants {
            genesis_account: account,
            genesis_representative: account,
            epoch_signer_keys: epoch_signer_keys(b"lattice-live-epoch-signer"),
            pruning: false,
            bootstrap_weight_max_blocks: 32_768,
            max_work_generate_difficulty: 0xFFFF_FFC0_0000_0000,
        },
        work_thresholds: WorkThresholds::new(),
    }
}

fn beta_params() -> NetworkParams {
    let genesis = genesis_keypair(b"lattice-beta-genesis");
    let account = Account::from(genesis.public);
    NetworkParams {
        network: NetworkId::Beta,
        constants: LedgerConstants {
            genesis_account: account,
            genesis_representative: account,
            epoch_signer_keys: epoch_signer_keys(b"lattice-beta-epoch-signer"),
            pruning: false,
            bootstrap_weight_max_blocks: 4_096,
            max_work_generate_difficulty: 0xFFFF_FFC0_0000_0000,
        },
        work_thresholds: WorkThresholds::new(),
    }
}

fn test_params() -> NetworkParams {
    let genesis = genesis_keypair(b"lattice-test-genesis");
    let account = Account::from(genesis.public);
    NetworkParams {
        network: NetworkId::Test,
        constants: LedgerConstants {
            genesis_account: account,
            genesis_representative: account,
            epoch_signer_keys: epoch_signer_keys(b"lattice-test-epoch-signer"),
            pruning: false,
            bootstrap_weight_max_blocks: 1_024,
            max_work_generate_difficulty: 0,
        },
        work_thresholds: WorkThresholds::with_base(0),
    }
}

impl Ledger {
    /// Open a ledger for `params`'s network: if the store already has a
    /// genesis account, just rebuild the cache from what's there; otherwise
    /// stamp the genesis block in first.
    pub fn initialize(store: Arc<dyn Store>, params: NetworkParams) -> Result<Ledger, LedgerError> {
        let ledger = Ledger::new(store, params.constants, params.work_thresholds)?;
        let genesis_account = ledger.constants.genesis_account;
        let already_seeded = {
            let txn = ledger.store.begin_read();
            AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)?.is_some()
        };
        if !already_seeded {
            let mut txn = ledger.store.begin_write();
            let hash = stamp_genesis(&ledger, &mut *txn)?;
            txn.commit()?;
            ledger.confirmation_height_update(&genesis_account, 1, hash)?;
        }
        ledger.rebuild_cache()?;
        Ok(ledger)
    }
}

fn stamp_genesis(ledger: &Ledger, txn: &mut dyn WriteTransaction) -> Result<BlockHash, LedgerError> {
    let account = ledger.constants.genesis_account;
    let representative = ledger.constants.genesis_representative;

    let block = Block::State(StateBlock {
        account,
        previous: BlockHash::ZERO,
        representative,
        balance: Amount::MAX,
        link: BlockHash::ZERO,
        signature: Signature::ZERO,
        work: Work::ZERO,
    });
    let hash = block.hash();
    let sideband = Sideband {
        account,
        height: 1,
        balance: Amount::MAX,
        timestamp: Timestamp::EPOCH,
        is_send: false,
        is_receive: false,
        is_epoch: false,
        epoch: Epoch::Epoch0,
        source_epoch: Epoch::Unspecified,
    };

    BlockStore::put(ledger.store.as_ref(), txn, &hash, &block.to_wire_bytes(), &sideband)?;
    AccountStore::put(
        ledger.store.as_ref(),
        txn,
        &account,
        &AccountInfo {
            head: hash,
            representative,
            balance: Amount::MAX,
            modified: Timestamp::EPOCH,
            block_count: 1,
            epoch: Epoch::Epoch0,
        },
    )?;
    RepresentationStore::add(ledger.store.as_ref(), txn, &representative, Amount::MAX)?;

    tracing::info!(account = %account, hash = %hash, "genesis block stamped");
    Ok(hash)
}

/// The genesis keypair for a network, for tests that need to sign a block
/// spending out of the genesis account.
#[cfg(test)]
pub(crate) fn test_genesis_keypair(network: NetworkId) -> KeyPair {
    match network {
        NetworkId::Live => genesis_keypair(b"lattice-live-genesis"),
        NetworkId::Beta => genesis_keypair(b"lattice-beta-genesis"),
        NetworkId::Test => genesis_keypair(b"lattice-test-genesis"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_store_lmdb::LmdbStore;

    fn open_test_store() -> (tempfile::TempDir, Arc<LmdbStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LmdbStore::open(dir.path(), &lattice_store::StoreConfig::default()).unwrap());
        (dir, store)
    }

    #[test]
    fn genesis_account_is_deterministic_per_network() {
        let a = NetworkParams::for_network(NetworkId::Test).constants.genesis_account;
        let b = NetworkParams::for_network(NetworkId::Test).constants.genesis_account;
        assert_eq!(a, b);
    }

    #[test]
    fn networks_have_distinct_genesis_accounts() {
        let live = NetworkParams::for_network(NetworkId::Live).constants.genesis_account;
        let beta = NetworkParams::for_network(NetworkId::Beta).constants.genesis_account;
        let test = NetworkParams::for_network(NetworkId::Test).constants.genesis_account;
        assert_ne!(live, beta);
        assert_ne!(live, test);
        assert_ne!(beta, test);
    }

    #[test]
    fn initializing_twice_does_not_duplicate_the_genesis_supply() {
        let (_dir, store) = open_test_store();
        let params = NetworkParams::for_network(NetworkId::Test);
        let genesis_account = params.constants.genesis_account;
        let ledger = Ledger::initialize(store.clone(), params).unwrap();
        assert_eq!(ledger.weight(&genesis_account), Amount::MAX);

        let params_again = NetworkParams::for_network(NetworkId::Test);
        let ledger_again = Ledger::initialize(store, params_again).unwrap();
        assert_eq!(ledger_again.weight(&genesis_account), Amount::MAX);
    }
}

//! Discarding confirmed history the node no longer needs to keep in full.
//!
//! A pruned block keeps only a tombstone in [`PrunedStore`] — enough for
//! [`crate::Ledger::block_or_pruned_exists`] to tell a future gap check that
//! the hash is accounted for, just not a hash whose body can be read back.
//! Pruning a block destroys the information a later block extending it would
//! need to validate (its balance, its epoch, its account for legacy kinds),
//! so the walk never touches an account's current frontier: only blocks
//! strictly below the head are eligible.

use lattice_store::{AccountStore, BlockStore, PrunedStore, Store, WriteTransaction};
use lattice_types::BlockHash;

use crate::block::Block;
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Discard block bodies starting at `target` and walking backward through
/// its `previous` chain, stopping after `batch_max` blocks, at an already-
/// pruned predecessor, or at the chain's open block.
///
/// `target` itself must not be its account's current head — pruning the
/// frontier would leave nothing for the next block extending it to read.
pub fn prune(ledger: &Ledger, txn: &mut dyn WriteTransaction, target: &BlockHash, batch_max: u64) -> Result<u64, LedgerError> {
    let store = ledger.store.as_ref();

    let (bytes, sideband) = match BlockStore::get(store, txn.as_read(), target)? {
        Some(v) => v,
        None => return Ok(0), // already pruned, or never existed
    };
    let info = AccountStore::get(store, txn.as_read(), &sideband.account)?
        .ok_or_else(|| LedgerError::AccountNotFound(sideband.account.to_string()))?;
    if info.head == *target {
        return Err(LedgerError::InvalidBlock(format!("refusing to prune {target}, the current frontier of {}", sideband.account)));
    }

    let mut current = *target;
    let mut current_bytes = bytes;
    let mut pruned = 0u64;

    while pruned < batch_max {
        let block = Block::from_wire_bytes(&current_bytes)?;
        let previous = block.previous();
        let is_open = block.is_open();

        BlockStore::del(store, txn, &current)?;
        PrunedStore::put(store, txn, &current)?;
        pruned += 1;

        if is_open {
            break;
        }
        match BlockStore::get(store, txn.as_read(), &previous)? {
            Some((next_bytes, _)) => {
                current = previous;
                current_bytes = next_bytes;
            }
            None => break, // predecessor already pruned, or chain root
        }
    }

    tracing::info!(target = %target, account = %sideband.account, pruned, "pruned block range");
    Ok(pruned)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lattice_crypto::keypair_from_seed;
    use lattice_store_lmdb::LmdbStore;
    use lattice_types::{Account, Amount, NetworkId};

    use super::*;
    use crate::block::builders::StateBlockBuilder;
    use crate::genesis::{test_genesis_keypair, NetworkParams};

    fn open_test_ledger() -> (tempfile::TempDir, Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LmdbStore::open(dir.path(), &lattice_store::StoreConfig::default()).unwrap());
        let params = NetworkParams::for_network(NetworkId::Test);
        let ledger = Ledger::initialize(store, params).unwrap();
        (dir, ledger)
    }

    #[test]
    fn pruning_the_frontier_is_rejected() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let mut txn = ledger.store.begin_write();
        let result = prune(&ledger, &mut *txn, &genesis_head, 10);
        assert!(matches!(result, Err(LedgerError::InvalidBlock(_))));
    }

    #[test]
    fn pruning_a_non_frontier_block_replaces_it_with_a_tombstone() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let receiver = Account::from(keypair_from_seed(&[7u8; 32]).public.clone());
        let send = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::new(Amount::MAX.raw() - 1))
            .link(BlockHash::new(*receiver.as_bytes()))
            .build(&genesis_key.private, 0);
        ledger.process_block(&send).unwrap();

        let send_b = StateBlockBuilder::new(genesis_account)
            .previous(send.hash())
            .representative(genesis_account)
            .balance(Amount::new(Amount::MAX.raw() - 2))
            .link(BlockHash::new(*receiver.as_bytes()))
            .build(&genesis_key.private, 0);
        ledger.process_block(&send_b).unwrap();

        let mut txn = ledger.store.begin_write();
        let pruned = prune(&ledger, &mut *txn, &send.hash(), 10).unwrap();
        txn.commit().unwrap();
        assert_eq!(pruned, 1);

        let txn = ledger.store.begin_read();
        assert!(!ledger.block_exists(txn.as_ref(), &send.hash()).unwrap());
        assert!(ledger.block_or_pruned_exists(txn.as_ref(), &send.hash()).unwrap());
    }
}

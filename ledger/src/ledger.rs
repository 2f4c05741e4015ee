//! The concrete ledger: owns the store, the in-memory cache, and the
//! network's constants, and exposes the entry points a node calls to move
//! blocks in and out of the ledger.

use std::sync::{Arc, Mutex};

use lattice_store::{
    AccountStore, BlockStore, ConfirmationHeightInfo, ConfirmationHeightStore, PrunedStore, RepresentationStore, Store,
};
use lattice_types::{Account, Amount, BlockHash, LedgerConstants};
use lattice_work::WorkThresholds;

use crate::block::Block;
use crate::cache::LedgerCache;
use crate::engine::{self, ProcessOutcome, ProcessResult};
use crate::error::LedgerError;
use crate::pruning;
use crate::rollback::{self, RollbackOutcome};

pub struct Ledger {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) cache: LedgerCache,
    pub(crate) constants: LedgerConstants,
    pub(crate) work_thresholds: WorkThresholds,
    /// Serializes the mutate-store-then-update-cache sequence across
    /// `process_block`/`rollback_block`/`confirmation_height_update`/`prune`
    /// so the cache never observes a store state it hasn't caught up to yet.
    write_guard: Mutex<()>,
}

impl Ledger {
    /// Open a ledger over an already-initialized store, rebuilding the
    /// in-memory cache by scanning it. Does not create a genesis block —
    /// use [`Ledger::initialize`] for that.
    pub fn new(store: Arc<dyn Store>, constants: LedgerConstants, work_thresholds: WorkThresholds) -> Result<Self, LedgerError> {
        let ledger = Self {
            store,
            cache: LedgerCache::new(),
            constants,
            work_thresholds,
            write_guard: Mutex::new(()),
        };
        ledger.rebuild_cache()?;
        Ok(ledger)
    }

    /// Recompute every cached counter and the representative-weight map
    /// from the store's current contents.
    pub fn rebuild_cache(&self) -> Result<(), LedgerError> {
        let txn = self.store.begin_read();
        let accounts = AccountStore::count(self.store.as_ref(), txn.as_ref())?;
        let blocks = BlockStore::count(self.store.as_ref(), txn.as_ref())?;
        let cemented = ConfirmationHeightStore::count(self.store.as_ref(), txn.as_ref())?;
        let pruned = PrunedStore::count(self.store.as_ref(), txn.as_ref())?;
        let representation = RepresentationStore::iter(self.store.as_ref(), txn.as_ref())?;
        self.cache.rebuild(accounts, blocks, cemented, pruned, representation);
        Ok(())
    }

    pub fn account_count(&self) -> u64 {
        self.cache.account_count()
    }

    pub fn block_count(&self) -> u64 {
        self.cache.block_count()
    }

    pub fn cemented_count(&self) -> u64 {
        self.cache.cemented_count()
    }

    pub fn pruned_count(&self) -> u64 {
        self.cache.pruned_count()
    }

    pub fn weight(&self, rep: &Account) -> Amount {
        self.cache.weight(rep)
    }

    pub fn constants(&self) -> &LedgerConstants {
        &self.constants
    }

    pub fn work_thresholds(&self) -> &WorkThresholds {
        &self.work_thresholds
    }

    /// Validate and, if it passes, apply `block`. Runs in its own
    /// transaction: any non-`Progress` result leaves the store untouched.
    pub fn process_block(&self, block: &Block) -> Result<ProcessOutcome, LedgerError> {
        let _guard = self.write_guard.lock().unwrap();
        let mut txn = self.store.begin_write();
        let outcome = engine::process(self, &mut *txn, block)?;
        if outcome.result == ProcessResult::Progress {
            txn.commit()?;
            self.cache.apply_block_added(outcome.account_created);
            for (rep, weight) in &outcome.weight_updates {
                self.cache.set_weight(*rep, *weight);
            }
        }
        Ok(outcome)
    }

    /// Roll `target` and everything built on it out of the ledger.
    ///
    /// A cascade can touch an unknown number of accounts and blocks, so
    /// rather than patch every counter incrementally, the cache is simply
    /// rebuilt from the store afterward.
    pub fn rollback_block(&self, target: &BlockHash) -> Result<RollbackOutcome, LedgerError> {
        let _guard = self.write_guard.lock().unwrap();
        let mut txn = self.store.begin_write();
        let outcome = rollback::rollback(self, &mut *txn, target)?;
        txn.commit()?;
        self.rebuild_cache()?;
        Ok(outcome)
    }

    /// Record that `account`'s chain is confirmed final up to `height`
    /// (at block `frontier`). Heights only move forward and can never
    /// exceed the account's actual chain length.
    pub fn confirmation_height_update(&self, account: &Account, height: u64, frontier: BlockHash) -> Result<(), LedgerError> {
        let _guard = self.write_guard.lock().unwrap();
        let mut txn = self.store.begin_write();
        let current_height = ConfirmationHeightStore::get(self.store.as_ref(), txn.as_read(), account)?
            .map(|i| i.height)
            .unwrap_or(0);
        if height <= current_height {
            return Err(LedgerError::InvalidConfirmationHeight);
        }
        let info = AccountStore::get(self.store.as_ref(), txn.as_read(), account)?
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?;
        if height > info.block_count {
            return Err(LedgerError::InvalidConfirmationHeight);
        }
        ConfirmationHeightStore::put(self.store.as_ref(), &mut *txn, account, &ConfirmationHeightInfo { height, frontier })?;
        txn.commit()?;
        self.cache.bump_cemented(height - current_height);
        Ok(())
    }

    /// Discard block bodies at and below `target` on its account chain,
    /// down to (but never including) the account's confirmed frontier,
    /// stopping after `batch_max` blocks.
    pub fn prune(&self, target: &BlockHash, batch_max: u64) -> Result<u64, LedgerError> {
        let _guard = self.write_guard.lock().unwrap();
        let mut txn = self.store.begin_write();
        let pruned = pruning::prune(self, &mut *txn, target, batch_max)?;
        txn.commit()?;
        self.cache.bump_pruned(pruned);
        Ok(pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::builders::{legacy_change, legacy_open, StateBlockBuilder};
    use crate::engine::{epoch_link, ProcessResult};
    use crate::genesis::{test_genesis_keypair, NetworkParams};
    use lattice_crypto::keypair_from_seed;
    use lattice_store::{FrontierStore, PendingKey, PendingStore};
    use lattice_store_lmdb::LmdbStore;
    use lattice_types::{Epoch, NetworkId};

    fn open_test_ledger() -> (tempfile::TempDir, Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LmdbStore::open(dir.path(), &lattice_store::StoreConfig::default()).unwrap());
        let params = NetworkParams::for_network(NetworkId::Test);
        let ledger = Ledger::initialize(store, params).unwrap();
        (dir, ledger)
    }

    #[test]
    fn genesis_account_holds_the_entire_supply() {
        let (_dir, ledger) = open_test_ledger();
        assert_eq!(ledger.weight(&ledger.constants.genesis_account), Amount::MAX);
        assert_eq!(ledger.account_count(), 1);
        assert_eq!(ledger.block_count(), 1);
    }

    #[test]
    fn send_then_open_moves_the_sent_amount_and_rolling_back_the_open_restores_it() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let receiver_key = keypair_from_seed(&[42u8; 32]);
        let receiver_account = Account::from(receiver_key.public.clone());
        let sent_amount = Amount::new(1_000);
        let send = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::MAX.checked_sub(sent_amount).unwrap())
            .link(BlockHash::new(*receiver_account.as_bytes()))
            .build(&genesis_key.private, 0);
        let send_outcome = ledger.process_block(&send).unwrap();
        assert_eq!(send_outcome.result, ProcessResult::Progress);
        assert_eq!(ledger.weight(&genesis_account), Amount::MAX.checked_sub(sent_amount).unwrap());

        let open = StateBlockBuilder::new(receiver_account)
            .representative(receiver_account)
            .balance(sent_amount)
            .link(send.hash())
            .build(&receiver_key.private, 0);
        let open_outcome = ledger.process_block(&open).unwrap();
        assert_eq!(open_outcome.result, ProcessResult::Progress);
        assert_eq!(ledger.weight(&receiver_account), sent_amount);
        assert_eq!(ledger.account_count(), 2);

        ledger.rollback_block(&open.hash()).unwrap();
        assert_eq!(ledger.weight(&receiver_account), Amount::ZERO);
        assert_eq!(ledger.weight(&genesis_account), Amount::MAX.checked_sub(sent_amount).unwrap());
        assert_eq!(ledger.account_count(), 1);
    }

    #[test]
    fn a_second_block_on_the_same_root_is_rejected_as_a_fork() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let receiver = Account::from(keypair_from_seed(&[1u8; 32]).public.clone());
        let other = Account::from(keypair_from_seed(&[2u8; 32]).public.clone());

        let send_a = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::new(Amount::MAX.raw() - 1))
            .link(BlockHash::new(*receiver.as_bytes()))
            .build(&genesis_key.private, 0);
        let send_b = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::new(Amount::MAX.raw() - 2))
            .link(BlockHash::new(*other.as_bytes()))
            .build(&genesis_key.private, 0);

        assert_eq!(ledger.process_block(&send_a).unwrap().result, ProcessResult::Progress);
        assert_eq!(ledger.process_block(&send_b).unwrap().result, ProcessResult::Fork);
    }

    /// Scenario 4: rolling back a send whose pending record was already
    /// claimed must cascade into the claiming receive, then leave no
    /// dangling pending record behind once the send itself is deleted.
    #[test]
    fn rolling_back_a_claimed_send_cascades_and_leaves_no_dangling_pending_record() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let receiver_key = keypair_from_seed(&[99u8; 32]);
        let receiver_account = Account::from(receiver_key.public.clone());
        let sent_amount = Amount::new(500);
        let send = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::MAX.checked_sub(sent_amount).unwrap())
            .link(BlockHash::new(*receiver_account.as_bytes()))
            .build(&genesis_key.private, 0);
        assert_eq!(ledger.process_block(&send).unwrap().result, ProcessResult::Progress);

        let open = StateBlockBuilder::new(receiver_account)
            .representative(receiver_account)
            .balance(sent_amount)
            .link(send.hash())
            .build(&receiver_key.private, 0);
        assert_eq!(ledger.process_block(&open).unwrap().result, ProcessResult::Progress);

        ledger.rollback_block(&send.hash()).unwrap();

        let txn = ledger.store.begin_read();
        assert!(AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &receiver_account).unwrap().is_none());
        assert!(!ledger.block_exists(txn.as_ref(), &send.hash()).unwrap());
        assert!(!ledger.block_exists(txn.as_ref(), &open.hash()).unwrap());
        assert!(PendingStore::get(ledger.store.as_ref(), txn.as_ref(), &PendingKey::new(receiver_account, send.hash()))
            .unwrap()
            .is_none());
        drop(txn);

        assert_eq!(ledger.weight(&genesis_account), Amount::MAX);
        assert_eq!(ledger.account_count(), 1);
    }

    /// Scenario 5: an account opened via a legacy open block (epoch
    /// `Unspecified`) can still upgrade to epoch 1 through `process`, the
    /// same as an explicit epoch-0 account would.
    #[test]
    fn a_legacy_opened_account_upgrades_to_epoch_one_through_process() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let receiver_key = keypair_from_seed(&[13u8; 32]);
        let receiver_account = Account::from(receiver_key.public.clone());
        let sent_amount = Amount::new(750);
        let send = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::MAX.checked_sub(sent_amount).unwrap())
            .link(BlockHash::new(*receiver_account.as_bytes()))
            .build(&genesis_key.private, 0);
        assert_eq!(ledger.process_block(&send).unwrap().result, ProcessResult::Progress);

        let open = legacy_open(send.hash(), receiver_account, receiver_account, &receiver_key.private, 0);
        assert_eq!(ledger.process_block(&open).unwrap().result, ProcessResult::Progress);

        let txn = ledger.store.begin_read();
        let opened_info = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &receiver_account).unwrap().unwrap();
        drop(txn);
        assert_eq!(opened_info.epoch, Epoch::Unspecified);

        let epoch1 = StateBlockBuilder::new(receiver_account)
            .previous(open.hash())
            .representative(receiver_account)
            .balance(sent_amount)
            .link(epoch_link(Epoch::Epoch1))
            .build(&receiver_key.private, 0);
        let outcome = ledger.process_block(&epoch1).unwrap();
        assert_eq!(outcome.result, ProcessResult::Progress);

        let txn = ledger.store.begin_read();
        let upgraded_info = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &receiver_account).unwrap().unwrap();
        assert_eq!(upgraded_info.epoch, Epoch::Epoch1);
    }

    /// Scenario 6: a receive naming a source whose pending record was
    /// already claimed (or never existed) is rejected as unreceivable.
    #[test]
    fn receiving_an_already_claimed_source_is_unreceivable() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let receiver_key = keypair_from_seed(&[21u8; 32]);
        let receiver_account = Account::from(receiver_key.public.clone());
        let sent_amount = Amount::new(300);
        let send = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::MAX.checked_sub(sent_amount).unwrap())
            .link(BlockHash::new(*receiver_account.as_bytes()))
            .build(&genesis_key.private, 0);
        assert_eq!(ledger.process_block(&send).unwrap().result, ProcessResult::Progress);

        let open = StateBlockBuilder::new(receiver_account)
            .representative(receiver_account)
            .balance(sent_amount)
            .link(send.hash())
            .build(&receiver_key.private, 0);
        assert_eq!(ledger.process_block(&open).unwrap().result, ProcessResult::Progress);

        let replay = StateBlockBuilder::new(receiver_account)
            .previous(open.hash())
            .representative(receiver_account)
            .balance(sent_amount.checked_add(Amount::new(1)).unwrap())
            .link(send.hash())
            .build(&receiver_key.private, 0);
        assert_eq!(ledger.process_block(&replay).unwrap().result, ProcessResult::Unreceivable);
    }

    /// Legacy open/change blocks process and maintain the frontier index the
    /// same as their state-block equivalents, and a legacy block can never
    /// follow a state head.
    #[test]
    fn legacy_blocks_process_and_a_legacy_block_cannot_follow_a_state_head() {
        let (_dir, ledger) = open_test_ledger();
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = AccountStore::get(ledger.store.as_ref(), txn.as_ref(), &genesis_account)
            .unwrap()
            .unwrap()
            .head;
        drop(txn);

        let key = keypair_from_seed(&[31u8; 32]);
        let account = Account::from(key.public.clone());
        let other_rep = keypair_from_seed(&[32u8; 32]);
        let other_rep_account = Account::from(other_rep.public.clone());
        let sent_amount = Amount::new(900);
        let send = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::MAX.checked_sub(sent_amount).unwrap())
            .link(BlockHash::new(*account.as_bytes()))
            .build(&genesis_key.private, 0);
        assert_eq!(ledger.process_block(&send).unwrap().result, ProcessResult::Progress);

        let open = legacy_open(send.hash(), account, account, &key.private, 0);
        assert_eq!(ledger.process_block(&open).unwrap().result, ProcessResult::Progress);

        let txn = ledger.store.begin_read();
        assert_eq!(FrontierStore::get(ledger.store.as_ref(), txn.as_ref(), &open.hash()).unwrap(), Some(account));
        drop(txn);

        let change = legacy_change(open.hash(), other_rep_account, &key.private, 0);
        assert_eq!(ledger.process_block(&change).unwrap().result, ProcessResult::Progress);

        let txn = ledger.store.begin_read();
        assert_eq!(FrontierStore::get(ledger.store.as_ref(), txn.as_ref(), &open.hash()).unwrap(), None);
        assert_eq!(FrontierStore::get(ledger.store.as_ref(), txn.as_ref(), &change.hash()).unwrap(), Some(account));
        drop(txn);

        let state_change = StateBlockBuilder::new(account)
            .previous(change.hash())
            .representative(other_rep_account)
            .balance(sent_amount)
            .build(&key.private, 0);
        assert_eq!(ledger.process_block(&state_change).unwrap().result, ProcessResult::Progress);

        let legacy_follow = legacy_change(state_change.hash(), account, &key.private, 0);
        assert_eq!(ledger.process_block(&legacy_follow).unwrap().result, ProcessResult::BlockPosition);
    }
}

//! Read-only derived queries over ledger state.
//!
//! None of these take a write transaction: every answer here is a
//! projection of what `process`, `rollback`, and `prune` have already
//! committed.

use lattice_store::{
    AccountInfo, AccountStore, BlockStore, ConfirmationHeightInfo, ConfirmationHeightStore, PendingKey,
    PendingRecord, PendingStore, PrunedStore, ReadTransaction,
};
use lattice_types::{Account, Amount, BlockHash};

use crate::block::Block;
use crate::error::LedgerError;
use crate::ledger::Ledger;

impl Ledger {
    pub fn account_info(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<AccountInfo>, LedgerError> {
        Ok(AccountStore::get(self.store.as_ref(), txn, account)?)
    }

    pub fn balance(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Amount, LedgerError> {
        Ok(self.account_info(txn, account)?.map(|i| i.balance).unwrap_or(Amount::ZERO))
    }

    /// The weight currently delegated to `rep`, from the in-memory cache
    /// rather than a store read.
    pub fn weight(&self, rep: &Account) -> Amount {
        self.cache.weight(rep)
    }

    pub fn latest(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<BlockHash>, LedgerError> {
        Ok(self.account_info(txn, account)?.map(|i| i.head))
    }

    /// The root a block extending `account` must target: the account's
    /// current head, or the account itself (reinterpreted as a hash) if it
    /// has never been opened.
    pub fn latest_root(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<BlockHash, LedgerError> {
        match self.latest(txn, account)? {
            Some(head) => Ok(head),
            None => Ok(BlockHash::new(*account.as_bytes())),
        }
    }

    pub fn block_exists(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, LedgerError> {
        Ok(BlockStore::exists(self.store.as_ref(), txn, hash)?)
    }

    pub fn block_or_pruned_exists(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, LedgerError> {
        Ok(BlockStore::exists(self.store.as_ref(), txn, hash)? || PrunedStore::exists(self.store.as_ref(), txn, hash)?)
    }

    pub fn get_block(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<Block>, LedgerError> {
        match BlockStore::get(self.store.as_ref(), txn, hash)? {
            Some((bytes, _)) => Ok(Some(Block::from_wire_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn block_account(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<Account>, LedgerError> {
        Ok(BlockStore::get(self.store.as_ref(), txn, hash)?.map(|(_, sb)| sb.account))
    }

    pub fn successor(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<BlockHash>, LedgerError> {
        Ok(BlockStore::successor(self.store.as_ref(), txn, hash)?)
    }

    pub fn pending(&self, txn: &dyn ReadTransaction, destination: &Account) -> Result<Vec<(PendingKey, PendingRecord)>, LedgerError> {
        Ok(PendingStore::for_account(self.store.as_ref(), txn, destination)?)
    }

    pub fn confirmation_height(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<ConfirmationHeightInfo>, LedgerError> {
        Ok(ConfirmationHeightStore::get(self.store.as_ref(), txn, account)?)
    }

    /// The amount `hash` moved: the balance decrease for a send, the balance
    /// increase for a receive. `None` for blocks that don't move value
    /// (change, epoch), for a hash that doesn't exist, or when the previous
    /// block's balance is no longer available (pruned).
    pub fn amount(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Option<Amount>, LedgerError> {
        let (bytes, sideband) = match BlockStore::get(self.store.as_ref(), txn, hash)? {
            Some(v) => v,
            None => return Ok(None),
        };
        if !sideband.is_send && !sideband.is_receive {
            return Ok(None);
        }
        let block = Block::from_wire_bytes(&bytes)?;
        let prev_balance = if block.is_open() {
            Amount::ZERO
        } else {
            match BlockStore::get(self.store.as_ref(), txn, &block.previous())? {
                Some((_, prev_sideband)) => prev_sideband.balance,
                None => return Ok(None),
            }
        };
        if sideband.is_send {
            Ok(prev_balance.checked_sub(sideband.balance))
        } else {
            Ok(sideband.balance.checked_sub(prev_balance))
        }
    }

    /// Whether `hash` sits at or below its account's confirmed height. An
    /// account with no confirmation-height record has confirmed nothing.
    pub fn block_confirmed(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, LedgerError> {
        let sideband = match BlockStore::get(self.store.as_ref(), txn, hash)? {
            Some((_, sb)) => sb,
            None => return Ok(false),
        };
        let confirmed_height = ConfirmationHeightStore::get(self.store.as_ref(), txn, &sideband.account)?
            .map(|i| i.height)
            .unwrap_or(0);
        Ok(sideband.height <= confirmed_height)
    }

    /// Whether every block `hash`'s processing depended on — its previous,
    /// and for a receive, its source — is itself confirmed.
    pub fn dependents_confirmed(&self, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, LedgerError> {
        let block = match self.get_block(txn, hash)? {
            Some(b) => b,
            None => return Ok(false),
        };
        if !block.is_open() && !self.block_confirmed(txn, &block.previous())? {
            return Ok(false);
        }
        let (_, sideband) = BlockStore::get(self.store.as_ref(), txn, hash)?.expect("resolved above via get_block");
        if sideband.is_receive {
            let source_hash = match &block {
                Block::Receive(b) => b.source,
                Block::Open(b) => b.source,
                Block::State(b) => b.link,
                _ => unreachable!("sideband.is_receive only set for receive/open/state blocks"),
            };
            if !self.block_confirmed(txn, &source_hash)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether a block naming `previous` could validly extend `account`
    /// right now: for an open, the account must not yet exist; otherwise
    /// `previous` must exist and have no successor yet.
    pub fn could_fit(&self, txn: &dyn ReadTransaction, account: &Account, previous: &BlockHash) -> Result<bool, LedgerError> {
        if previous.is_zero() {
            return Ok(self.account_info(txn, account)?.is_none());
        }
        if !self.block_exists(txn, previous)? {
            return Ok(false);
        }
        Ok(BlockStore::successor(self.store.as_ref(), txn, previous)?.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::builders::StateBlockBuilder;
    use crate::genesis::{test_genesis_keypair, NetworkParams};
    use lattice_crypto::keypair_from_seed;
    use lattice_store_lmdb::LmdbStore;
    use lattice_types::NetworkId;
    use std::sync::Arc;

    fn open_test_store() -> (tempfile::TempDir, Arc<LmdbStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LmdbStore::open(dir.path(), &lattice_store::StoreConfig::default()).unwrap());
        (dir, store)
    }

    #[test]
    fn could_fit_accepts_the_genesis_open_and_rejects_a_second_one() {
        let (_dir, store) = open_test_store();
        let params = NetworkParams::for_network(NetworkId::Test);
        let ledger = Ledger::initialize(store, params).unwrap();
        let txn = ledger.store.begin_read();
        assert!(!ledger.could_fit(txn.as_ref(), &ledger.constants.genesis_account, &BlockHash::ZERO).unwrap());
    }

    #[test]
    fn unopened_account_has_zero_balance_and_no_latest() {
        let (_dir, store) = open_test_store();
        let params = NetworkParams::for_network(NetworkId::Test);
        let ledger = Ledger::initialize(store, params).unwrap();
        let txn = ledger.store.begin_read();
        let stranger = Account::new([9u8; 32]);
        assert_eq!(ledger.balance(txn.as_ref(), &stranger).unwrap(), Amount::ZERO);
        assert_eq!(ledger.latest(txn.as_ref(), &stranger).unwrap(), None);
        assert_eq!(ledger.latest_root(txn.as_ref(), &stranger).unwrap(), BlockHash::new(*stranger.as_bytes()));
    }

    #[test]
    fn amount_reports_the_send_and_receive_deltas() {
        let (_dir, store) = open_test_store();
        let params = NetworkParams::for_network(NetworkId::Test);
        let genesis_key = test_genesis_keypair(NetworkId::Test);
        let ledger = Ledger::initialize(store, params).unwrap();
        let genesis_account = ledger.constants.genesis_account;
        let txn = ledger.store.begin_read();
        let genesis_head = ledger.latest(txn.as_ref(), &genesis_account).unwrap().unwrap();
        drop(txn);

        let receiver_key = keypair_from_seed(&[11u8; 32]);
        let receiver_account = Account::from(receiver_key.public.clone());
        let sent_amount = Amount::new(2_500);
        let send = StateBlockBuilder::new(genesis_account)
            .previous(genesis_head)
            .representative(genesis_account)
            .balance(Amount::MAX.checked_sub(sent_amount).unwrap())
            .link(BlockHash::new(*receiver_account.as_bytes()))
            .build(&genesis_key.private, 0);
        ledger.process_block(&send).unwrap();

        let open = StateBlockBuilder::new(receiver_account)
            .representative(receiver_account)
            .balance(sent_amount)
            .link(send.hash())
            .build(&receiver_key.private, 0);
        ledger.process_block(&open).unwrap();

        let txn = ledger.store.begin_read();
        assert_eq!(ledger.amount(txn.as_ref(), &send.hash()).unwrap(), Some(sent_amount));
        assert_eq!(ledger.amount(txn.as_ref(), &open.hash()).unwrap(), Some(sent_amount));
    }
}

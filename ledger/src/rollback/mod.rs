//! Reverse state machine: undoes a block and everything built on top of it.
//!
//! Rolling back `target` first rolls back every block above `target` on its
//! own account chain (newest first), then undoes `target` itself. Undoing a
//! send whose pending record has already been claimed requires first
//! cascading into the claiming account and undoing its receive (and
//! whatever is built on top of that), since the pending record cannot be
//! restored out from under a block that already consumed it.

use lattice_store::{
    AccountInfo, AccountStore, BlockStore, FrontierStore, PendingKey, PendingRecord, PendingStore,
    ReadTransaction, RepresentationStore, Store, WriteTransaction,
};
use lattice_types::{Account, Amount, BlockHash, Epoch, Timestamp};

use crate::block::{Block, BlockKind};
use crate::error::LedgerError;
use crate::ledger::Ledger;

pub struct RollbackOutcome {
    /// Every hash undone, in the order it was undone (newest first overall,
    /// though a cascade interleaves a different account's blocks ahead of
    /// the send that required it).
    pub rolled_back: Vec<BlockHash>,
    pub(crate) weight_updates: Vec<(Account, Amount)>,
}

/// Roll `target` and everything built on it out of the ledger.
pub fn rollback(ledger: &Ledger, txn: &mut dyn WriteTransaction, target: &BlockHash) -> Result<RollbackOutcome, LedgerError> {
    let store = ledger.store.as_ref();
    let mut rolled_back = Vec::new();
    let mut weight_updates = Vec::new();
    rollback_inner(store, txn, target, &mut rolled_back, &mut weight_updates)?;
    Ok(RollbackOutcome { rolled_back, weight_updates })
}

fn rollback_inner(
    store: &dyn Store,
    txn: &mut dyn WriteTransaction,
    target: &BlockHash,
    rolled_back: &mut Vec<BlockHash>,
    weight_updates: &mut Vec<(Account, Amount)>,
) -> Result<(), LedgerError> {
    rollback_chain_above(store, txn, target, rolled_back, weight_updates)?;
    pop_one(store, txn, target, rolled_back, weight_updates)
}

/// Undo every block strictly above `target` on `target`'s account chain,
/// leaving `target` itself as the chain's head.
fn rollback_chain_above(
    store: &dyn Store,
    txn: &mut dyn WriteTransaction,
    target: &BlockHash,
    rolled_back: &mut Vec<BlockHash>,
    weight_updates: &mut Vec<(Account, Amount)>,
) -> Result<(), LedgerError> {
    loop {
        let (_, sideband) = BlockStore::get(store, txn.as_read(), target)?
            .ok_or_else(|| LedgerError::BlockNotFound(target.to_string()))?;
        let info = AccountStore::get(store, txn.as_read(), &sideband.account)?
            .ok_or_else(|| LedgerError::AccountNotFound(sideband.account.to_string()))?;
        if info.head == *target {
            return Ok(());
        }
        pop_one(store, txn, &info.head, rolled_back, weight_updates)?;
    }
}

/// Undo exactly one block, which must currently be the head of its account.
fn pop_one(
    store: &dyn Store,
    txn: &mut dyn WriteTransaction,
    hash: &BlockHash,
    rolled_back: &mut Vec<BlockHash>,
    weight_updates: &mut Vec<(Account, Amount)>,
) -> Result<(), LedgerError> {
    let (bytes, sideband) = BlockStore::get(store, txn.as_read(), hash)?.ok_or_else(|| LedgerError::BlockNotFound(hash.to_string()))?;
    let block = Block::from_wire_bytes(&bytes)?;
    let account = sideband.account;
    let info = AccountStore::get(store, txn.as_read(), &account)?.ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?;

    let is_open = block.is_open();
    let prev_hash = block.previous();
    let (prev_balance, prev_epoch, prev_representative) = if is_open {
        (Amount::ZERO, Epoch::Unspecified, Account::ZERO)
    } else {
        let prev_sideband = BlockStore::get(store, txn.as_read(), &prev_hash)?
            .map(|(_, sb)| sb)
            .ok_or_else(|| LedgerError::BlockNotFound(prev_hash.to_string()))?;
        (prev_sideband.balance, prev_sideband.epoch, representative_after(store, txn.as_read(), &prev_hash)?)
    };

    if sideband.is_send {
        let destination = match &block {
            Block::Send(b) => b.destination,
            Block::State(b) => Account::new(*b.link.as_bytes()),
            _ => unreachable!("sideband.is_send only set for send/state-send blocks"),
        };
        let key = PendingKey::new(destination, *hash);
        if PendingStore::get(store, txn.as_read(), &key)?.is_none() {
            let receiving = find_receiving_block(store, txn.as_read(), &destination, hash)?
                .ok_or_else(|| LedgerError::InconsistentPendingState(format!("send {hash} has no pending record and no receiving block")))?;
            rollback_inner(store, txn, &receiving, rolled_back, weight_updates)?;
            // the receive's own rollback just re-created this pending record;
            // it cannot survive the send it references being deleted below.
            PendingStore::del(store, txn, &key)?;
        } else {
            PendingStore::del(store, txn, &key)?;
        }
        let amount_sent = prev_balance
            .checked_sub(sideband.balance)
            .expect("a send's post-balance is always below its pre-balance");
        RepresentationStore::add(store, txn, &info.representative, amount_sent)?;
        weight_updates.push((info.representative, RepresentationStore::get(store, txn.as_read(), &info.representative)?));
    } else if sideband.is_receive {
        let source_hash = match &block {
            Block::Receive(b) => b.source,
            Block::Open(b) => b.source,
            Block::State(b) => b.link,
            _ => unreachable!("sideband.is_receive only set for receive/open/state blocks"),
        };
        let amount_received = sideband
            .balance
            .checked_sub(prev_balance)
            .expect("a receive's post-balance is always at or above its pre-balance");
        let source_account = resolve_source_account(store, txn.as_read(), &source_hash)?;
        PendingStore::put(
            store,
            txn,
            &PendingKey::new(account, source_hash),
            &PendingRecord { source: source_account, amount: amount_received, epoch: sideband.source_epoch },
        )?;
        RepresentationStore::sub(store, txn, &info.representative, info.balance)?;
        RepresentationStore::add(store, txn, &prev_representative, prev_balance)?;
        weight_updates.push((info.representative, RepresentationStore::get(store, txn.as_read(), &info.representative)?));
        weight_updates.push((prev_representative, RepresentationStore::get(store, txn.as_read(), &prev_representative)?));
    } else if !sideband.is_epoch {
        // change: only the representative moved.
        RepresentationStore::sub(store, txn, &info.representative, prev_balance)?;
        RepresentationStore::add(store, txn, &prev_representative, prev_balance)?;
        weight_updates.push((info.representative, RepresentationStore::get(store, txn.as_read(), &info.representative)?));
        weight_updates.push((prev_representative, RepresentationStore::get(store, txn.as_read(), &prev_representative)?));
    }
    // epoch: representative and balance never moved, nothing to undo there.

    if is_open {
        AccountStore::del(store, txn, &account)?;
    } else {
        AccountStore::put(
            store,
            txn,
            &account,
            &AccountInfo {
                head: prev_hash,
                representative: prev_representative,
                balance: prev_balance,
                modified: Timestamp::now(),
                block_count: info.block_count - 1,
                epoch: prev_epoch,
            },
        )?;
    }

    BlockStore::del(store, txn, hash)?;
    if !is_open {
        BlockStore::successor_clear(store, txn, &prev_hash)?;
    }

    if matches!(block.kind(), BlockKind::Send | BlockKind::Receive | BlockKind::Open | BlockKind::Change) {
        FrontierStore::del(store, txn, hash)?;
        if !is_open {
            // a legacy chain's predecessor is always itself legacy: a state
            // head is never followed by a legacy block.
            FrontierStore::put(store, txn, &prev_hash, &account)?;
        }
    }

    tracing::debug!(hash = %hash, account = %account, "block rolled back");
    rolled_back.push(*hash);
    Ok(())
}

/// Walk back from `hash` to the nearest block that explicitly carries a
/// representative. Legacy send/receive blocks don't, since only open/change
/// blocks (and every state block) can move the representative.
fn representative_after(store: &dyn Store, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<Account, LedgerError> {
    let (bytes, _) = BlockStore::get(store, txn, hash)?.ok_or_else(|| LedgerError::BlockNotFound(hash.to_string()))?;
    let block = Block::from_wire_bytes(&bytes)?;
    match block.explicit_representative() {
        Some(rep) => Ok(rep),
        None => representative_after(store, txn, &block.previous()),
    }
}

/// The account that originated a send, or `Account::ZERO` if that send has
/// since been pruned and its sideband is no longer available.
fn resolve_source_account(store: &dyn Store, txn: &dyn ReadTransaction, source_hash: &BlockHash) -> Result<Account, LedgerError> {
    match BlockStore::get(store, txn, source_hash)? {
        Some((_, sideband)) => Ok(sideband.account),
        None => Ok(Account::ZERO),
    }
}

/// Linear scan for the receive (if any) that already claimed `send_hash`'s
/// pending record. The store keeps no reverse index from a send to its
/// receive, so this costs a full chain scan — acceptable since rollback is
/// not a hot path.
fn find_receiving_block(
    store: &dyn Store,
    txn: &dyn ReadTransaction,
    destination: &Account,
    send_hash: &BlockHash,
) -> Result<Option<BlockHash>, LedgerError> {
    for candidate in BlockStore::account_blocks(store, txn, destination)? {
        let (bytes, sideband) = BlockStore::get(store, txn, &candidate)?.expect("account_blocks only returns existing hashes");
        if !sideband.is_receive {
            continue;
        }
        let block = Block::from_wire_bytes(&bytes)?;
        let matches = match &block {
            Block::Receive(b) => b.source == *send_hash,
            Block::Open(b) => b.source == *send_hash,
            Block::State(b) => b.link == *send_hash,
            _ => false,
        };
        if matches {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

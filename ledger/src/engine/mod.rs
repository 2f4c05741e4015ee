//! The block-processing engine: the single path by which an untrusted block
//! becomes (or is rejected from becoming) part of the ledger.
//!
//! `process` runs a fixed sequence of checks — existence, structural
//! position, proof-of-work, signature, source/pending, arithmetic, then
//! fork — stopping at the first one that fails. Only a block that clears
//! every check mutates the store, and the mutation bundle for each subtype
//! (send/receive/change/epoch) is applied atomically within the caller's
//! transaction.

use lattice_crypto::{blake2b_256_multi, verify_signature};
use lattice_store::{
    AccountStore, BlockStore, FrontierStore, PendingKey, PendingRecord, PendingStore, PrunedStore,
    ReadTransaction, RepresentationStore, Sideband, Store, WriteTransaction,
};
use lattice_types::{Account, Amount, BlockHash, Epoch, PublicKey, Timestamp};
use lattice_work::WorkBlockKind;

use crate::block::{Block, BlockKind};
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// The fourteen rejection verdicts plus the one acceptance verdict a call to
/// `process` can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Accepted and applied.
    Progress,
    /// This exact block (by hash) is already in the ledger or pruned set.
    Old,
    /// `previous` is neither a known block nor a pruned hash.
    GapPrevious,
    /// The referenced source/link block is neither known nor pruned.
    GapSource,
    /// Epoch-open for an account with no pending receivable yet.
    GapEpochOpenPending,
    /// A different block already occupies this block's root.
    Fork,
    /// Signature does not verify against the expected signer.
    BadSignature,
    /// A send whose declared post-balance is not strictly less than the
    /// pre-balance.
    NegativeSpend,
    /// No pending record exists for the referenced source.
    Unreceivable,
    /// Crediting the pending amount would overflow the account's balance.
    Overspend,
    /// Declared balance does not match the arithmetic the subtype requires.
    BalanceMismatch,
    /// An epoch block changed the representative, or didn't zero it when
    /// opening an account.
    RepresentativeMismatch,
    /// A legacy block follows a state block, or an epoch target is not the
    /// account's current epoch successor.
    BlockPosition,
    /// Work does not clear the threshold for this block's kind and epoch.
    InsufficientWork,
    /// An open (legacy or state) names the burn account as its owner.
    OpenedBurnAccount,
}

/// Which key verified the block's signature, if it verified at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureClass {
    /// Signature did not verify, or verification was never reached.
    None,
    /// Verified against the block's own account.
    Valid,
    /// Verified against the protocol epoch-signer account for the target epoch.
    ValidEpoch,
}

/// The full result of a `process` call.
pub struct ProcessOutcome {
    pub result: ProcessResult,
    pub signature_class: SignatureClass,
    /// Present only when `result == Progress`.
    pub sideband: Option<Sideband>,
    /// The block's resolved owning account, present whenever resolution
    /// succeeded (i.e. for every result except `Old` and the gap results
    /// that precede account resolution).
    pub account: Option<Account>,
    pub(crate) account_created: bool,
    pub(crate) weight_updates: Vec<(Account, Amount)>,
}

impl ProcessOutcome {
    fn terminal(result: ProcessResult) -> Self {
        Self {
            result,
            signature_class: SignatureClass::None,
            sideband: None,
            account: None,
            account_created: false,
            weight_updates: Vec::new(),
        }
    }

    fn terminal_with_account(result: ProcessResult, signature_class: SignatureClass, account: Account) -> Self {
        Self {
            result,
            signature_class,
            sideband: None,
            account: Some(account),
            account_created: false,
            weight_updates: Vec::new(),
        }
    }
}

/// What an account-chain-level comparison says this block is doing. Legacy
/// blocks carry their subtype in their wire format; a state block's subtype
/// is inferred by the engine from how its balance compares to the account's
/// current balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Subtype {
    Send,
    Receive,
    Change,
    Epoch(Epoch),
}

fn classify_subtype(block: &Block, prev_balance: Amount) -> Subtype {
    match block {
        Block::Send(_) => Subtype::Send,
        Block::Receive(_) => Subtype::Receive,
        Block::Open(_) => Subtype::Receive,
        Block::Change(_) => Subtype::Change,
        Block::State(b) => {
            if b.balance < prev_balance {
                Subtype::Send
            } else if b.balance > prev_balance {
                Subtype::Receive
            } else if let Some(e) = epoch_for_link(&b.link) {
                Subtype::Epoch(e)
            } else {
                Subtype::Change
            }
        }
    }
}

/// Declared post-balance, for the two variants that carry one. Legacy
/// receive/open/change have no balance field: their post-balance is implied
/// (by the pending amount, or unchanged), never asserted.
fn declared_balance(block: &Block) -> Option<Amount> {
    match block {
        Block::Send(b) => Some(b.balance),
        Block::State(b) => Some(b.balance),
        _ => None,
    }
}

/// The protocol-level marker `link` must equal for a state block to be
/// read as an epoch-upgrade block targeting `epoch`. Derived from a fixed
/// string and the epoch index, not from any account — every epoch-E block
/// network-wide shares the same link value.
pub fn epoch_link(epoch: Epoch) -> BlockHash {
    BlockHash::new(blake2b_256_multi(&[b"epoch link v1", &[epoch.as_u8()]]))
}

fn epoch_for_link(link: &BlockHash) -> Option<Epoch> {
    for e in [Epoch::Epoch1, Epoch::Epoch2] {
        if epoch_link(e) == *link {
            return Some(e);
        }
    }
    None
}

fn block_or_pruned_exists(store: &dyn Store, txn: &dyn ReadTransaction, hash: &BlockHash) -> Result<bool, LedgerError> {
    Ok(BlockStore::exists(store, txn, hash)? || PrunedStore::exists(store, txn, hash)?)
}

/// Whether the block currently at the head of an account's chain is a state
/// block. A legacy chain may switch to state blocks, never back.
fn head_is_state(store: &dyn Store, txn: &dyn ReadTransaction, head: &BlockHash) -> Result<bool, LedgerError> {
    match BlockStore::get(store, txn, head)? {
        Some((bytes, _)) => Ok(matches!(Block::from_wire_bytes(&bytes)?, Block::State(_))),
        None => Err(LedgerError::BlockNotFound(head.to_string())),
    }
}

/// Validate `block` against the current store state and, if it passes every
/// check, apply its mutation bundle within `txn`. The caller commits (or,
/// on a non-`Progress` result, simply drops) the transaction.
pub fn process(ledger: &Ledger, txn: &mut dyn WriteTransaction, block: &Block) -> Result<ProcessOutcome, LedgerError> {
    let store = ledger.store.as_ref();
    let hash = block.hash();

    // 1. old
    if BlockStore::exists(store, txn.as_read(), &hash)? || PrunedStore::exists(store, txn.as_read(), &hash)? {
        return Ok(ProcessOutcome::terminal(ProcessResult::Old));
    }

    // 2. gap_previous
    let previous = if block.is_open() { None } else { Some(block.previous()) };
    if let Some(prev) = previous {
        if !block_or_pruned_exists(store, txn.as_read(), &prev)? {
            return Ok(ProcessOutcome::terminal(ProcessResult::GapPrevious));
        }
    }

    // Resolve the owning account. State and legacy-open blocks carry it
    // explicitly; legacy send/receive/change inherit it from the previous
    // block's sideband.
    let account = match block.explicit_account() {
        Some(a) => a,
        None => {
            let prev = previous.expect("non-open legacy block always has a previous");
            match BlockStore::get(store, txn.as_read(), &prev)? {
                Some((_, sideband)) => sideband.account,
                None => return Ok(ProcessOutcome::terminal(ProcessResult::GapPrevious)),
            }
        }
    };

    let account_info = AccountStore::get(store, txn.as_read(), &account)?;
    let prev_sideband = match previous {
        Some(p) => BlockStore::get(store, txn.as_read(), &p)?.map(|(_, sb)| sb),
        None => None,
    };
    let prev_balance = prev_sideband.as_ref().map(|sb| sb.balance).unwrap_or(Amount::ZERO);
    let prev_epoch = prev_sideband.as_ref().map(|sb| sb.epoch).unwrap_or(Epoch::Unspecified);

    let subtype = classify_subtype(block, prev_balance);

    // 3. insufficient_work
    let work_kind = match subtype {
        Subtype::Epoch(_) => WorkBlockKind::Epoch,
        Subtype::Receive => WorkBlockKind::ReceiveOrOpen,
        Subtype::Send | Subtype::Change => WorkBlockKind::Base,
    };
    let threshold = ledger.work_thresholds.threshold_for(work_kind, prev_epoch);
    if !lattice_work::validate_work(block.work(), &block.root(), threshold) {
        return Ok(ProcessOutcome::terminal(ProcessResult::InsufficientWork));
    }

    // 4. bad_signature
    let (signature_ok, signature_class) = if let Subtype::Epoch(e) = subtype {
        match ledger.constants.epoch_signer(e) {
            Some(signer) => {
                let pk: PublicKey = signer.into();
                let ok = verify_signature(hash.as_bytes(), block.signature(), &pk);
                (ok, if ok { SignatureClass::ValidEpoch } else { SignatureClass::None })
            }
            None => (false, SignatureClass::None),
        }
    } else {
        let pk: PublicKey = account.into();
        let ok = verify_signature(hash.as_bytes(), block.signature(), &pk);
        (ok, if ok { SignatureClass::Valid } else { SignatureClass::None })
    };
    if !signature_ok {
        return Ok(ProcessOutcome::terminal_with_account(ProcessResult::BadSignature, signature_class, account));
    }

    // 5. structural: block_position, representative_mismatch
    if matches!(block.kind(), BlockKind::Send | BlockKind::Receive | BlockKind::Open | BlockKind::Change) {
        if let Some(info) = &account_info {
            if head_is_state(store, txn.as_read(), &info.head)? {
                return Ok(ProcessOutcome::terminal_with_account(ProcessResult::BlockPosition, signature_class, account));
            }
        }
    }

    if let Subtype::Epoch(target) = subtype {
        match &account_info {
            Some(info) => {
                if info.epoch.successor() != Some(target) {
                    return Ok(ProcessOutcome::terminal_with_account(ProcessResult::BlockPosition, signature_class, account));
                }
                if block.explicit_representative() != Some(info.representative) {
                    return Ok(ProcessOutcome::terminal_with_account(
                        ProcessResult::RepresentativeMismatch,
                        signature_class,
                        account,
                    ));
                }
            }
            None => {
                if block.explicit_representative() != Some(Account::ZERO) {
                    return Ok(ProcessOutcome::terminal_with_account(
                        ProcessResult::RepresentativeMismatch,
                        signature_class,
                        account,
                    ));
                }
                if block.is_open() {
                    let has_pending = !PendingStore::for_account(store, txn.as_read(), &account)?.is_empty();
                    if !has_pending {
                        return Ok(ProcessOutcome::terminal_with_account(
                            ProcessResult::GapEpochOpenPending,
                            signature_class,
                            account,
                        ));
                    }
                }
            }
        }
    }

    // 6. gap_source, unreceivable, opened_burn_account
    let mut pending_lookup: Option<(PendingKey, PendingRecord)> = None;
    if matches!(subtype, Subtype::Receive) {
        if block.is_open() && account.is_burn() {
            return Ok(ProcessOutcome::terminal_with_account(ProcessResult::OpenedBurnAccount, signature_class, account));
        }
        let source_hash = match block {
            Block::Receive(b) => b.source,
            Block::Open(b) => b.source,
            Block::State(b) => b.link,
            _ => unreachable!("Subtype::Receive only arises for receive/open/state blocks"),
        };
        if !block_or_pruned_exists(store, txn.as_read(), &source_hash)? {
            return Ok(ProcessOutcome::terminal_with_account(ProcessResult::GapSource, signature_class, account));
        }
        let key = PendingKey::new(account, source_hash);
        match PendingStore::get(store, txn.as_read(), &key)? {
            Some(record) => pending_lookup = Some((key, record)),
            None => {
                return Ok(ProcessOutcome::terminal_with_account(ProcessResult::Unreceivable, signature_class, account));
            }
        }
    }

    // 7. negative_spend, overspend, balance_mismatch
    let new_balance = match subtype {
        Subtype::Send => {
            let declared = declared_balance(block).expect("Subtype::Send always carries a declared balance");
            if declared >= prev_balance {
                return Ok(ProcessOutcome::terminal_with_account(ProcessResult::NegativeSpend, signature_class, account));
            }
            declared
        }
        Subtype::Receive => {
            let (_, record) = pending_lookup.as_ref().expect("Subtype::Receive always resolves a pending record by step 6");
            let expected = match prev_balance.checked_add(record.amount) {
                Some(v) => v,
                None => {
                    return Ok(ProcessOutcome::terminal_with_account(ProcessResult::Overspend, signature_class, account));
                }
            };
            if let Some(declared) = declared_balance(block) {
                if declared != expected {
                    return Ok(ProcessOutcome::terminal_with_account(ProcessResult::BalanceMismatch, signature_class, account));
                }
            }
            expected
        }
        Subtype::Change | Subtype::Epoch(_) => prev_balance,
    };

    // 8. fork
    if block.is_open() {
        if account_info.is_some() {
            return Ok(ProcessOutcome::terminal_with_account(ProcessResult::Fork, signature_class, account));
        }
    } else {
        let prev = previous.expect("non-open block always has a previous");
        if let Some(existing_successor) = BlockStore::successor(store, txn.as_read(), &prev)? {
            if existing_successor != hash {
                return Ok(ProcessOutcome::terminal_with_account(ProcessResult::Fork, signature_class, account));
            }
        }
    }

    // Progress: apply the mutation bundle.
    let now = Timestamp::now();
    let height = account_info.as_ref().map(|i| i.block_count + 1).unwrap_or(1);
    let account_created = account_info.is_none();

    let (representative, epoch, sideband, weight_updates) = match subtype {
        Subtype::Send => {
            // NegativeSpend above guarantees declared >= prev_balance only
            // fails when prev_balance > 0, which requires an existing account.
            let info = account_info.as_ref().expect("a send that passed negative_spend implies an opened account");
            let rep = info.representative;
            let amount_sent = prev_balance
                .checked_sub(new_balance)
                .expect("negative_spend already guarantees new_balance < prev_balance");
            RepresentationStore::sub(store, txn, &rep, amount_sent)?;
            let weight_after = RepresentationStore::get(store, txn.as_read(), &rep)?;
            let destination = match block {
                Block::Send(b) => b.destination,
                Block::State(b) => Account::new(*b.link.as_bytes()),
                _ => unreachable!("Subtype::Send only arises for send/state blocks"),
            };
            PendingStore::put(
                store,
                txn,
                &PendingKey::new(destination, hash),
                &PendingRecord { source: account, amount: amount_sent, epoch: prev_epoch },
            )?;
            let sb = Sideband {
                account,
                height,
                balance: new_balance,
                timestamp: now,
                is_send: true,
                is_receive: false,
                is_epoch: false,
                epoch: prev_epoch,
                source_epoch: Epoch::Unspecified,
            };
            (rep, prev_epoch, sb, vec![(rep, weight_after)])
        }
        Subtype::Receive => {
            let (key, record) = pending_lookup.as_ref().expect("resolved in step 6");
            let rep = block
                .explicit_representative()
                .unwrap_or_else(|| account_info.as_ref().expect("non-open receive always has an existing account").representative);
            let epoch = std::cmp::max(prev_epoch, record.epoch);
            let mut updates = Vec::new();
            match &account_info {
                Some(info) if rep != info.representative => {
                    RepresentationStore::sub(store, txn, &info.representative, info.balance)?;
                    RepresentationStore::add(store, txn, &rep, new_balance)?;
                    updates.push((info.representative, RepresentationStore::get(store, txn.as_read(), &info.representative)?));
                    updates.push((rep, RepresentationStore::get(store, txn.as_read(), &rep)?));
                }
                Some(_) => {
                    RepresentationStore::add(store, txn, &rep, record.amount)?;
                    updates.push((rep, RepresentationStore::get(store, txn.as_read(), &rep)?));
                }
                None => {
                    RepresentationStore::add(store, txn, &rep, new_balance)?;
                    updates.push((rep, RepresentationStore::get(store, txn.as_read(), &rep)?));
                }
            }
            PendingStore::del(store, txn, key)?;
            let sb = Sideband {
                account,
                height,
                balance: new_balance,
                timestamp: now,
                is_send: false,
                is_receive: true,
                is_epoch: false,
                epoch,
                source_epoch: record.epoch,
            };
            (rep, epoch, sb, updates)
        }
        Subtype::Change => {
            let info = account_info.as_ref().expect("a change block always extends an existing chain");
            let rep = block.explicit_representative().expect("Subtype::Change always carries a representative field");
            let old_rep = info.representative;
            RepresentationStore::sub(store, txn, &old_rep, prev_balance)?;
            RepresentationStore::add(store, txn, &rep, new_balance)?;
            let w_old = RepresentationStore::get(store, txn.as_read(), &old_rep)?;
            let w_new = RepresentationStore::get(store, txn.as_read(), &rep)?;
            let sb = Sideband {
                account,
                height,
                balance: new_balance,
                timestamp: now,
                is_send: false,
                is_receive: false,
                is_epoch: false,
                epoch: prev_epoch,
                source_epoch: Epoch::Unspecified,
            };
            (rep, prev_epoch, sb, vec![(old_rep, w_old), (rep, w_new)])
        }
        Subtype::Epoch(e) => {
            let rep = account_info.as_ref().map(|i| i.representative).unwrap_or(Account::ZERO);
            let sb = Sideband {
                account,
                height,
                balance: new_balance,
                timestamp: now,
                is_send: false,
                is_receive: false,
                is_epoch: true,
                epoch: e,
                source_epoch: Epoch::Unspecified,
            };
            (rep, e, sb, Vec::new())
        }
    };

    AccountStore::put(
        store,
        txn,
        &account,
        &lattice_store::AccountInfo {
            head: hash,
            representative,
            balance: new_balance,
            modified: now,
            block_count: height,
            epoch,
        },
    )?;
    BlockStore::put(store, txn, &hash, &block.to_wire_bytes(), &sideband)?;
    if let Some(prev) = previous {
        BlockStore::successor_set(store, txn, &prev, &hash)?;
    }
    if matches!(block.kind(), BlockKind::Send | BlockKind::Receive | BlockKind::Open | BlockKind::Change) {
        if let Some(prev) = previous {
            FrontierStore::del(store, txn, &prev)?;
        }
        FrontierStore::put(store, txn, &hash, &account)?;
    }

    tracing::debug!(hash = %hash, account = %account, ?subtype, "block processed");

    Ok(ProcessOutcome {
        result: ProcessResult::Progress,
        signature_class,
        sideband: Some(sideband),
        account: Some(account),
        account_created,
        weight_updates,
    })
}

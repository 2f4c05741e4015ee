//! In-memory counters and the representative-weight map.
//!
//! Kept in lockstep with store commits: every mutation here happens only
//! after the write transaction that produced it has committed, and always
//! under this module's own lock — never the write-transaction guard, so
//! read-only queries never block on a writer holding the long-lived guard.

use std::collections::HashMap;
use std::sync::Mutex;

use lattice_types::{Account, Amount};

#[derive(Default)]
struct CacheState {
    account_count: u64,
    block_count: u64,
    cemented_count: u64,
    pruned_count: u64,
    representation: HashMap<Account, Amount>,
}

pub struct LedgerCache {
    state: Mutex<CacheState>,
}

impl LedgerCache {
    pub fn new() -> Self {
        Self { state: Mutex::new(CacheState::default()) }
    }

    pub fn account_count(&self) -> u64 {
        self.state.lock().unwrap().account_count
    }

    pub fn block_count(&self) -> u64 {
        self.state.lock().unwrap().block_count
    }

    pub fn cemented_count(&self) -> u64 {
        self.state.lock().unwrap().cemented_count
    }

    pub fn pruned_count(&self) -> u64 {
        self.state.lock().unwrap().pruned_count
    }

    pub fn weight(&self, rep: &Account) -> Amount {
        self.state.lock().unwrap().representation.get(rep).copied().unwrap_or(Amount::ZERO)
    }

    /// Replace every counter wholesale. Called once, at `Ledger` construction,
    /// after scanning the freshly opened store.
    pub(crate) fn rebuild(
        &self,
        accounts: u64,
        blocks: u64,
        cemented: u64,
        pruned: u64,
        representation: Vec<(Account, Amount)>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.account_count = accounts;
        state.block_count = blocks;
        state.cemented_count = cemented;
        state.pruned_count = pruned;
        state.representation = representation.into_iter().filter(|(_, w)| !w.is_zero()).collect();
    }

    pub(crate) fn apply_block_added(&self, new_account: bool) {
        let mut state = self.state.lock().unwrap();
        state.block_count += 1;
        if new_account {
            state.account_count += 1;
        }
    }

    pub(crate) fn apply_block_removed(&self, account_removed: bool) {
        let mut state = self.state.lock().unwrap();
        state.block_count = state.block_count.saturating_sub(1);
        if account_removed {
            state.account_count = state.account_count.saturating_sub(1);
        }
    }

    /// Mirror a representative's authoritative post-mutation weight, as read
    /// back from `RepresentationStore` inside the same transaction that
    /// changed it.
    pub(crate) fn set_weight(&self, rep: Account, weight: Amount) {
        let mut state = self.state.lock().unwrap();
        if weight.is_zero() {
            state.representation.remove(&rep);
        } else {
            state.representation.insert(rep, weight);
        }
    }

    pub(crate) fn bump_cemented(&self, delta: u64) {
        self.state.lock().unwrap().cemented_count += delta;
    }

    pub(crate) fn bump_pruned(&self, delta: u64) {
        self.state.lock().unwrap().pruned_count += delta;
    }
}

impl Default for LedgerCache {
    fn default() -> Self {
        Self::new()
    }
}

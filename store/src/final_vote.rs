//! Final-vote table: one hash per account per voting round, recording the
//! block the (external) election subsystem has finalized a vote for. The
//! core persists these so a restarted node cannot be tricked into voting
//! for a conflicting block in the same round; it does not interpret votes.

use crate::transaction::{ReadTransaction, WriteTransaction};
use crate::StoreError;
use lattice_types::{Account, BlockHash};

pub trait FinalVoteStore {
    fn put(&self, txn: &mut dyn WriteTransaction, account: &Account, hash: &BlockHash) -> Result<(), StoreError>;

    fn get(&self, txn: &dyn ReadTransaction, account: &Account) -> Result<Option<BlockHash>, StoreError>;

    fn clear(&self, txn: &mut dyn WriteTransaction, account: &Account) -> Result<(), StoreError>;
}

//! Test fixture builders for constructing signed, work-stamped blocks
//! without repeating the full field list at every call site.

use lattice_crypto::sign_message;
use lattice_types::{Account, Amount, BlockHash, PrivateKey, Signature, Work};
use lattice_work::validate_work;

use super::{Block, StateBlock};

/// Builds and signs a state block, searching for work that clears the given
/// threshold against the block's root. Only meant for tests: production
/// work generation is a node-level concern outside this crate.
pub struct StateBlockBuilder {
    account: Account,
    previous: BlockHash,
    representative: Account,
    balance: Amount,
    link: BlockHash,
}

impl StateBlockBuilder {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            previous: BlockHash::ZERO,
            representative: account,
            balance: Amount::ZERO,
            link: BlockHash::ZERO,
        }
    }

    pub fn previous(mut self, previous: BlockHash) -> Self {
        self.previous = previous;
        self
    }

    pub fn representative(mut self, representative: Account) -> Self {
        self.representative = representative;
        self
    }

    pub fn balance(mut self, balance: Amount) -> Self {
        self.balance = balance;
        self
    }

    pub fn link(mut self, link: BlockHash) -> Self {
        self.link = link;
        self
    }

    pub fn build(self, key: &PrivateKey, threshold: u64) -> Block {
        let unsigned = StateBlock {
            account: self.account,
            previous: self.previous,
            representative: self.representative,
            balance: self.balance,
            link: self.link,
            signature: Signature([0u8; 64]),
            work: Work(0),
        };
        let hash = Block::State(unsigned.clone()).hash();
        let signature = sign_message(hash.as_bytes(), key);
        let root = if self.previous.is_zero() {
            BlockHash::new(*self.account.as_bytes())
        } else {
            self.previous
        };
        let work = find_work(&root, threshold);
        Block::State(StateBlock { signature, work, ..unsigned })
    }
}

fn find_work(root: &BlockHash, threshold: u64) -> Work {
    (0u64..)
        .map(Work)
        .find(|w| validate_work(*w, root, threshold))
        .expect("a satisfying nonce exists within range for a test-scale threshold")
}

/// Sign and work-stamp a legacy send block. Test-only, like [`StateBlockBuilder`].
pub fn legacy_send(previous: BlockHash, destination: Account, balance: Amount, key: &PrivateKey, threshold: u64) -> Block {
    let unsigned = super::SendBlock { previous, destination, balance, signature: Signature([0u8; 64]), work: Work(0) };
    let hash = Block::Send(unsigned.clone()).hash();
    let signature = sign_message(hash.as_bytes(), key);
    let work = find_work(&previous, threshold);
    Block::Send(super::SendBlock { signature, work, ..unsigned })
}

/// Sign and work-stamp a legacy open block. Test-only, like [`StateBlockBuilder`].
pub fn legacy_open(source: BlockHash, representative: Account, account: Account, key: &PrivateKey, threshold: u64) -> Block {
    let unsigned = super::OpenBlock { source, representative, account, signature: Signature([0u8; 64]), work: Work(0) };
    let hash = Block::Open(unsigned.clone()).hash();
    let signature = sign_message(hash.as_bytes(), key);
    let root = BlockHash::new(*account.as_bytes());
    let work = find_work(&root, threshold);
    Block::Open(super::OpenBlock { signature, work, ..unsigned })
}

/// Sign and work-stamp a legacy receive block. Test-only, like [`StateBlockBuilder`].
pub fn legacy_receive(previous: BlockHash, source: BlockHash, key: &PrivateKey, threshold: u64) -> Block {
    let unsigned = super::ReceiveBlock { previous, source, signature: Signature([0u8; 64]), work: Work(0) };
    let hash = Block::Receive(unsigned.clone()).hash();
    let signature = sign_message(hash.as_bytes(), key);
    let work = find_work(&previous, threshold);
    Block::Receive(super::ReceiveBlock { signature, work, ..unsigned })
}

/// Sign and work-stamp a legacy change block. Test-only, like [`StateBlockBuilder`].
pub fn legacy_change(previous: BlockHash, representative: Account, key: &PrivateKey, threshold: u64) -> Block {
    let unsigned = super::ChangeBlock { previous, representative, signature: Signature([0u8; 64]), work: Work(0) };
    let hash = Block::Change(unsigned.clone()).hash();
    let signature = sign_message(hash.as_bytes(), key);
    let work = find_work(&previous, threshold);
    Block::Change(super::ChangeBlock { signature, work, ..unsigned })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_crypto::keypair_from_seed;

    #[test]
    fn builder_produces_a_block_whose_work_and_signature_both_validate() {
        let kp = keypair_from_seed(&[7u8; 32]);
        let account = Account::from(kp.public.clone());
        let block = StateBlockBuilder::new(account).balance(Amount::new(100)).build(&kp.private, 1);
        assert!(lattice_crypto::verify_signature(block.hash().as_bytes(), block.signature(), &kp.public));
        assert!(validate_work(block.work(), &block.root(), 1));
    }
}

//! Block variants and their canonical hashable/wire/JSON encodings.
//!
//! Five variants, matching the five historical block formats of a
//! block-lattice ledger: four legacy single-purpose blocks (send, receive,
//! open, change) and the universal state block that superseded them. Every
//! variant hashes over a type-specific tuple of fields — never the
//! signature, the work nonce, or the sideband — so the hash is stable
//! regardless of where a block sits in the store.

pub mod builders;
pub mod codec;

use serde::{Deserialize, Serialize};

use lattice_types::{Account, Amount, BlockHash, Signature, Work};

pub use codec::BlockCodecError;

/// Legacy send: moves `balance` (the balance *after* the send) out of the
/// account, identified by pairing with a pending record at `(destination, hash)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendBlock {
    pub previous: BlockHash,
    pub destination: Account,
    pub balance: Amount,
    pub signature: Signature,
    pub work: Work,
}

/// Legacy receive: claims the pending record created by the send at `source`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveBlock {
    pub previous: BlockHash,
    pub source: BlockHash,
    pub signature: Signature,
    pub work: Work,
}

/// Legacy open: the first block on a chain. Claims `source`'s pending record
/// and sets the account's initial representative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenBlock {
    pub source: BlockHash,
    pub representative: Account,
    pub account: Account,
    pub signature: Signature,
    pub work: Work,
}

/// Legacy change: updates the account's representative only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBlock {
    pub previous: BlockHash,
    pub representative: Account,
    pub signature: Signature,
    pub work: Work,
}

/// The universal state block. `link` is polymorphic: a destination account
/// on a send, a source block hash on a receive or open, the epoch marker on
/// an epoch-upgrade block, and ignored (expected zero) on a pure change.
/// Which interpretation applies can only be decided by the engine, by
/// comparing `balance` against the account's current balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlock {
    pub account: Account,
    pub previous: BlockHash,
    pub representative: Account,
    pub balance: Amount,
    pub link: BlockHash,
    pub signature: Signature,
    pub work: Work,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Send(SendBlock),
    Receive(ReceiveBlock),
    Open(OpenBlock),
    Change(ChangeBlock),
    State(StateBlock),
}

/// Which of the five wire formats a block is, irrespective of what the
/// engine later decides its *subtype* (send/receive/change/epoch) is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Send,
    Receive,
    Open,
    Change,
    State,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Send(_) => BlockKind::Send,
            Block::Receive(_) => BlockKind::Receive,
            Block::Open(_) => BlockKind::Open,
            Block::Change(_) => BlockKind::Change,
            Block::State(_) => BlockKind::State,
        }
    }

    /// Hash of the previous block in this chain, or `BlockHash::ZERO` for an
    /// open block (legacy or state-open).
    pub fn previous(&self) -> BlockHash {
        match self {
            Block::Send(b) => b.previous,
            Block::Receive(b) => b.previous,
            Block::Open(_) => BlockHash::ZERO,
            Block::Change(b) => b.previous,
            Block::State(b) => b.previous,
        }
    }

    /// True for a legacy open, or a state block whose `previous` is zero.
    pub fn is_open(&self) -> bool {
        matches!(self, Block::Open(_)) || matches!(self, Block::State(b) if b.previous.is_zero())
    }

    /// The slot this block occupies for fork detection: `previous` for
    /// non-opens, `account` for opens.
    pub fn root(&self) -> BlockHash {
        match self {
            Block::Open(b) => BlockHash::new(*b.account.as_bytes()),
            Block::State(b) if b.previous.is_zero() => BlockHash::new(*b.account.as_bytes()),
            other => other.previous(),
        }
    }

    /// The account field explicit in the block body, if this variant carries
    /// one. Legacy send/receive/change do not; their owning account is
    /// resolved by the engine from the previous block's sideband.
    pub fn explicit_account(&self) -> Option<Account> {
        match self {
            Block::Open(b) => Some(b.account),
            Block::State(b) => Some(b.account),
            _ => None,
        }
    }

    /// The representative this block sets, for variants that carry one.
    /// Legacy send/receive do not change the representative.
    pub fn explicit_representative(&self) -> Option<Account> {
        match self {
            Block::Open(b) => Some(b.representative),
            Block::Change(b) => Some(b.representative),
            Block::State(b) => Some(b.representative),
            _ => None,
        }
    }

    pub fn signature(&self) -> &Signature {
        match self {
            Block::Send(b) => &b.signature,
            Block::Receive(b) => &b.signature,
            Block::Open(b) => &b.signature,
            Block::Change(b) => &b.signature,
            Block::State(b) => &b.signature,
        }
    }

    pub fn work(&self) -> Work {
        match self {
            Block::Send(b) => b.work,
            Block::Receive(b) => b.work,
            Block::Open(b) => b.work,
            Block::Change(b) => b.work,
            Block::State(b) => b.work,
        }
    }

    pub fn hashable_bytes(&self) -> Vec<u8> {
        codec::hashable_bytes(self)
    }

    pub fn hash(&self) -> BlockHash {
        codec::hash(self)
    }

    /// `tag(1) ∥ hashable-tuple ∥ signature(64) ∥ work(8, little-endian)`.
    /// The tag is not part of the hashable tuple; it exists purely so a
    /// stored blob can be decoded without external context.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        codec::encode_wire(self)
    }

    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Block, BlockCodecError> {
        codec::decode_wire(bytes)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Block> {
        serde_json::from_str(s)
    }
}

//! Per-block-details proof-of-work thresholds.
//!
//! The validator consults a threshold that depends on the block's subtype
//! and epoch: receive/open blocks are held to a higher bar than send/change
//! (open-account spam is cheaper to attempt than sending), and epoch-2 state
//! blocks are held to the highest bar of all, as specified by the engine.

use lattice_types::Epoch;

/// Which subtype of block is requesting a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkBlockKind {
    /// Send or change — the baseline threshold.
    Base,
    /// Receive or open.
    ReceiveOrOpen,
    /// Epoch-upgrade block.
    Epoch,
}

const BASE_THRESHOLD: u64 = 0xFFFF_FE00_0000_0000;
const RECEIVE_MULTIPLIER: f64 = 8.0;
const EPOCH_MULTIPLIER: f64 = 64.0;
const EPOCH2_MULTIPLIER: f64 = 2.0;

/// Per-block-details PoW thresholds.
///
/// Higher threshold values mean harder work is required. `multiply` scales
/// difficulty by shrinking the "inverse gap" (`u64::MAX - threshold`), which
/// raises the bar the work nonce's digest must clear.
pub struct WorkThresholds {
    pub base: u64,
    pub receive_multiplier: f64,
    pub epoch_multiplier: f64,
    pub epoch2_multiplier: f64,
}

impl WorkThresholds {
    pub fn new() -> Self {
        Self {
            base: BASE_THRESHOLD,
            receive_multiplier: RECEIVE_MULTIPLIER,
            epoch_multiplier: EPOCH_MULTIPLIER,
            epoch2_multiplier: EPOCH2_MULTIPLIER,
        }
    }

    /// Construct with a custom base (useful in tests or low-difficulty devnets).
    pub fn with_base(base: u64) -> Self {
        Self { base, ..Self::new() }
    }

    /// Required threshold for a block of the given kind and epoch.
    pub fn threshold_for(&self, kind: WorkBlockKind, epoch: Epoch) -> u64 {
        let subtype_threshold = match kind {
            WorkBlockKind::Base => self.base,
            WorkBlockKind::ReceiveOrOpen => self.multiply(self.base, self.receive_multiplier),
            WorkBlockKind::Epoch => self.multiply(self.base, self.epoch_multiplier),
        };
        if epoch == Epoch::Epoch2 {
            self.multiply(subtype_threshold, self.epoch2_multiplier)
        } else {
            subtype_threshold
        }
    }

    fn multiply(&self, base: u64, multiplier: f64) -> u64 {
        if base == 0 {
            return 0;
        }
        let difficulty_inv = u64::MAX - base;
        let scaled_inv = (difficulty_inv as f64 / multiplier) as u64;
        u64::MAX - scaled_inv
    }
}

impl Default for WorkThresholds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_harder_than_send() {
        let thresholds = WorkThresholds::new();
        let send = thresholds.threshold_for(WorkBlockKind::Base, Epoch::Epoch0);
        let receive = thresholds.threshold_for(WorkBlockKind::ReceiveOrOpen, Epoch::Epoch0);
        assert!(receive > send);
    }

    #[test]
    fn epoch_hardest_within_same_protocol_epoch() {
        let thresholds = WorkThresholds::new();
        let epoch_block = thresholds.threshold_for(WorkBlockKind::Epoch, Epoch::Epoch0);
        let receive = thresholds.threshold_for(WorkBlockKind::ReceiveOrOpen, Epoch::Epoch0);
        assert!(epoch_block > receive);
    }

    #[test]
    fn epoch2_state_blocks_are_harder_than_epoch0() {
        let thresholds = WorkThresholds::new();
        let e0 = thresholds.threshold_for(WorkBlockKind::Base, Epoch::Epoch0);
        let e2 = thresholds.threshold_for(WorkBlockKind::Base, Epoch::Epoch2);
        assert!(e2 > e0);
    }

    #[test]
    fn base_is_unchanged_at_epoch0() {
        let thresholds = WorkThresholds::new();
        assert_eq!(
            thresholds.threshold_for(WorkBlockKind::Base, Epoch::Epoch0),
            BASE_THRESHOLD
        );
    }

    #[test]
    fn zero_base_stays_zero() {
        let thresholds = WorkThresholds::with_base(0);
        assert_eq!(thresholds.threshold_for(WorkBlockKind::Base, Epoch::Epoch2), 0);
    }
}

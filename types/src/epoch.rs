//! Epoch: a protocol-version marker advanced only by a specially-signed epoch block.

use serde::{Deserialize, Serialize};

/// Totally ordered protocol-version marker on an account.
///
/// `Unspecified` is the epoch of a legacy block that predates epoch tracking;
/// it sorts below `Epoch0` so the monotonicity check in the engine treats a
/// legacy-only chain as eligible for an epoch-1 upgrade exactly like an
/// explicit `Epoch0` chain would be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Epoch {
    Invalid,
    Unspecified,
    Epoch0,
    Epoch1,
    Epoch2,
}

impl Epoch {
    /// The epoch one step above this one, if any.
    pub fn successor(self) -> Option<Epoch> {
        match self {
            Epoch::Invalid => None,
            Epoch::Unspecified => Some(Epoch::Epoch1),
            Epoch::Epoch0 => Some(Epoch::Epoch1),
            Epoch::Epoch1 => Some(Epoch::Epoch2),
            Epoch::Epoch2 => None,
        }
    }

    /// Numeric epoch index used in epoch-marker links and the on-disk byte layout.
    pub fn as_u8(self) -> u8 {
        match self {
            Epoch::Invalid => 0,
            Epoch::Unspecified => 1,
            Epoch::Epoch0 => 2,
            Epoch::Epoch1 => 3,
            Epoch::Epoch2 => 4,
        }
    }

    pub fn from_u8(v: u8) -> Option<Epoch> {
        match v {
            0 => Some(Epoch::Invalid),
            1 => Some(Epoch::Unspecified),
            2 => Some(Epoch::Epoch0),
            3 => Some(Epoch::Epoch1),
            4 => Some(Epoch::Epoch2),
            _ => None,
        }
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Epoch::Unspecified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_upgrade_path() {
        assert!(Epoch::Invalid < Epoch::Unspecified);
        assert!(Epoch::Unspecified < Epoch::Epoch0);
        assert!(Epoch::Epoch0 < Epoch::Epoch1);
        assert!(Epoch::Epoch1 < Epoch::Epoch2);
    }

    #[test]
    fn byte_roundtrip() {
        for e in [
            Epoch::Invalid,
            Epoch::Unspecified,
            Epoch::Epoch0,
            Epoch::Epoch1,
            Epoch::Epoch2,
        ] {
            assert_eq!(Epoch::from_u8(e.as_u8()), Some(e));
        }
    }

    #[test]
    fn successor_chain_ends_at_epoch2() {
        assert_eq!(Epoch::Epoch0.successor(), Some(Epoch::Epoch1));
        assert_eq!(Epoch::Epoch2.successor(), None);
    }

    #[test]
    fn unspecified_is_eligible_for_epoch1_like_epoch0_is() {
        assert_eq!(Epoch::Unspecified.successor(), Some(Epoch::Epoch1));
    }
}

//! Balance/amount type: a 128-bit unsigned integer, exact, no floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A 128-bit unsigned amount, the unit of every balance and transfer in the ledger.
///
/// The genesis amount is `Amount::MAX` (`2^128 - 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u128::MAX);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_amount_is_u128_max() {
        assert_eq!(Amount::MAX.raw(), u128::MAX);
    }

    #[test]
    fn checked_sub_detects_underflow() {
        assert_eq!(Amount::new(5).checked_sub(Amount::new(10)), None);
        assert_eq!(Amount::new(10).checked_sub(Amount::new(5)), Some(Amount::new(5)));
    }

    #[test]
    fn be_bytes_roundtrip() {
        let a = Amount::new(0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10);
        assert_eq!(Amount::from_be_bytes(a.to_be_bytes()), a);
    }
}

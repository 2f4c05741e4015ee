//! Account identifier: a 256-bit public key naming a chain.

use crate::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 256-bit account identifier on a twisted-Edwards curve.
///
/// The zero account is the sentinel "unopened/absent" value and is also the
/// bit pattern of the distinguished burn account; the engine is the one that
/// forbids using it as an opener (see `opened_burn_account`), since the type
/// itself cannot distinguish "no account" from "the burn account".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Account([u8; 32]);

impl Account {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The burn account shares the zero bit pattern; named separately so call
    /// sites that mean "the burn account" read that way rather than "absent".
    pub fn burn() -> Self {
        Self::ZERO
    }

    pub fn is_burn(&self) -> bool {
        self.is_zero()
    }
}

impl From<PublicKey> for Account {
    fn from(key: PublicKey) -> Self {
        Self(key.0)
    }
}

impl From<Account> for PublicKey {
    fn from(account: Account) -> Self {
        PublicKey(account.0)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account(")?;
        for b in &self.0[..4] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "..)")
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_burn_share_representation() {
        assert!(Account::zero().is_zero());
        assert!(Account::burn().is_burn());
        assert_eq!(Account::zero(), Account::burn());
    }

    #[test]
    fn roundtrips_through_public_key() {
        let key = PublicKey([7u8; 32]);
        let account: Account = key.clone().into();
        let back: PublicKey = account.into();
        assert_eq!(key, back);
    }
}

//! Ed25519 key generation.

use ed25519_dalek::SigningKey;
use lattice_types::{KeyPair, PrivateKey, PublicKey};
use rand::rngs::OsRng;

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Deterministically derive a key pair from a 32-byte seed.
///
/// Used by the genesis bootstrap and by tests that need a reproducible
/// account across runs; never used for a wallet a real user controls.
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(private.as_bytes());
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_derivation_is_deterministic() {
        let a = keypair_from_seed(&[9u8; 32]);
        let b = keypair_from_seed(&[9u8; 32]);
        assert_eq!(a.public.as_bytes(), b.public.as_bytes());
    }

    #[test]
    fn different_seeds_differ() {
        let a = keypair_from_seed(&[1u8; 32]);
        let b = keypair_from_seed(&[2u8; 32]);
        assert_ne!(a.public.as_bytes(), b.public.as_bytes());
    }

    #[test]
    fn public_from_private_matches_generated_pair() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let derived = public_from_private(&kp.private);
        assert_eq!(derived.as_bytes(), kp.public.as_bytes());
    }
}

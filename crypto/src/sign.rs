//! Ed25519 message signing and verification.
//!
//! Signs over the raw block hash (or any other 32-byte digest); this crate
//! does not know about block structure, only about bytes and signatures.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use lattice_types::{PrivateKey, PublicKey, Signature};

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(private_key.as_bytes());
    let sig = signing_key.sign(message);
    Signature(sig.to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Returns `false` (never panics) on a malformed public key or signature,
/// since a bad-signature verdict is an ordinary validation outcome, not a
/// programmer error.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn sign_and_verify_round_trip() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let msg = b"some 32 byte block hash/........";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn verification_fails_for_wrong_key() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let other = keypair_from_seed(&[4u8; 32]);
        let msg = b"message";
        let sig = sign_message(msg, &kp.private);
        assert!(!verify_signature(msg, &sig, &other.public));
    }

    #[test]
    fn verification_fails_for_tampered_message() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let sig = sign_message(b"original", &kp.private);
        assert!(!verify_signature(b"tampered", &sig, &kp.public));
    }

    #[test]
    fn malformed_public_key_rejected_not_panicking() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let sig = sign_message(b"hi", &kp.private);
        let bad_key = PublicKey([0xffu8; 32]);
        assert!(!verify_signature(b"hi", &sig, &bad_key));
    }
}

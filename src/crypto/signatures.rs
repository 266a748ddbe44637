//! # Digital Signatures
//!
//! Free-function façade over [`WalletKeypair`] signing, for call sites that
//! read better with `sign_hash(&keypair, &hash)` than a method chain —
//! mainly the signature strategy in the transfer module.
//!
//! Wrapping the operations gives us a single place to audit all signing,
//! and a natural extension point if a second signature scheme ever shows up
//! in a wallet generation (it hasn't in five of them; we're not holding our
//! breath).

use super::keys::{WalletKeypair, WalletPublicKey, SIGNATURE_LENGTH};

/// Sign a 32-byte payload hash with a wallet keypair.
///
/// Produces the 64-byte Ed25519 signature the wallet contract expects to
/// find spliced into the transfer body.
pub fn sign_hash(keypair: &WalletKeypair, hash: &[u8; 32]) -> [u8; SIGNATURE_LENGTH] {
    keypair.sign_hash(hash)
}

/// Verify a 64-byte signature over a 32-byte payload hash.
///
/// Returns `true` if the signature is valid, `false` otherwise. No detail
/// about *why* verification failed — both bad signatures and bad keys are
/// just "nope".
pub fn verify_hash(
    public_key: &WalletPublicKey,
    hash: &[u8; 32],
    signature: &[u8; SIGNATURE_LENGTH],
) -> bool {
    public_key.verify_hash(hash, signature)
}

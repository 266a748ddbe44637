//! # Key Management
//!
//! Ed25519 keypair generation and serialization for wallet owners.
//!
//! Every wallet contract stores the 32-byte public key of its owner; every
//! outgoing transfer carries a 64-byte signature that key must verify. This
//! module handles creation, loading, and the hash-signing operation the
//! transfer assemblers need.
//!
//! ## Security considerations
//!
//! - Secret keys are used then discarded by this crate — nothing here
//!   retains key material beyond the call.
//! - Key generation uses the OS CSPRNG (`OsRng`). If that's broken, your
//!   wallet keys are the least of your worries.
//! - Key bytes are never logged. If you add logging to this module, you
//!   will be asked to leave.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

/// Ed25519 signature length. Always 64 bytes. If yours isn't, something
/// has gone terribly wrong.
pub const SIGNATURE_LENGTH: usize = 64;

/// Errors during key operations.
///
/// Intentionally vague about *why* something failed — leaking details about
/// key material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not valid hex")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// A wallet owner's Ed25519 keypair.
///
/// This is the local-secret authorization credential: holding it means being
/// able to move the wallet's funds. The transfer assemblers borrow it for
/// the duration of one signing call and never retain it.
///
/// `WalletKeypair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Serializing private keys should be a deliberate, conscious act, not
/// something that happens because someone shoved a keypair into a JSON
/// response. Use [`secret_key_bytes`](Self::secret_key_bytes) explicitly.
pub struct WalletKeypair {
    signing_key: SigningKey,
}

/// The public half of a wallet identity, safe to share with the world.
///
/// This is what the wallet contract stores on-chain and checks signatures
/// against.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WalletPublicKey {
    bytes: [u8; 32],
}

impl WalletKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    ///
    /// In Ed25519 the 32-byte secret key *is* the seed. Useful for deriving
    /// keypairs from mnemonics or KDF output.
    ///
    /// **Warning**: a weak seed gives a weak key. Use a proper CSPRNG or
    /// KDF to produce the seed bytes.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstructs a keypair from a hex-encoded secret key.
    ///
    /// Convenience for loading keys in tests and tooling. Please don't put
    /// raw hex keys in config files in production.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// Returns the public key associated with this keypair.
    pub fn public_key(&self) -> WalletPublicKey {
        WalletPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Raw public key bytes (32 bytes) — the identity stored on-chain.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Signs a 32-byte payload hash, producing a 64-byte signature.
    ///
    /// Ed25519 is deterministic — the same (key, hash) pair always produces
    /// the same signature. No nonce management, no RNG at signing time.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(hash).to_bytes()
    }

    /// Verify a signature over a payload hash against this keypair's public
    /// key. Convenience for tests and round-trip checks.
    pub fn verify_hash(&self, hash: &[u8; 32], signature: &[u8; SIGNATURE_LENGTH]) -> bool {
        self.public_key().verify_hash(hash, signature)
    }

    /// Exports the raw 32-byte secret key material.
    ///
    /// **Handle with extreme care.** This is the only secret standing
    /// between an attacker and the wallet's funds.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for WalletKeypair {
    // Never prints key material.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletKeypair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish()
    }
}

impl WalletPublicKey {
    /// Wraps raw public key bytes.
    ///
    /// Validity is checked at verification time — an invalid point simply
    /// verifies nothing.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Verify a 64-byte signature over a 32-byte payload hash.
    ///
    /// Returns `false` for an invalid signature *or* an invalid key — both
    /// are just "nope". Giving attackers a detailed error oracle is a bad
    /// idea.
    pub fn verify_hash(&self, hash: &[u8; 32], signature: &[u8; SIGNATURE_LENGTH]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let signature = DalekSignature::from_bytes(signature);
        verifying_key.verify(hash, &signature).is_ok()
    }

    /// Public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Debug for WalletPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletPublicKey({})", self.to_hex())
    }
}

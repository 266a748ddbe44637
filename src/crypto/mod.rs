//! # Cryptographic Primitives
//!
//! Ed25519 keypairs and signatures — the only cryptography a wallet transfer
//! needs. Everything here is a thin, type-safe wrapper around `ed25519-dalek`;
//! there is no hand-rolled math and there never will be.
//!
//! Wallet contracts verify a 64-byte Ed25519 signature over the 32-byte
//! content hash of the signing message, so the signing surface of this
//! module is deliberately hash-shaped: [`WalletKeypair::sign_hash`] takes
//! `&[u8; 32]`, not an arbitrary message. You can't accidentally sign the
//! wrong representation.

pub mod keys;
pub mod signatures;

pub use keys::{KeyError, WalletKeypair, WalletPublicKey, SIGNATURE_LENGTH};
pub use signatures::{sign_hash, verify_hash};

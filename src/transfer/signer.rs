//! Signature strategy: local secrets and external signers.
//!
//! Every signed generation funnels through one of two operations here:
//!
//! - [`sign_local`] — the caller holds the Ed25519 secret. The signing
//!   message is sealed, its hash signed on the spot, and the signature
//!   spliced into the final body per the generation's [`SplicePolicy`].
//!   Synchronous; the result comes back on the same call stack.
//! - [`sign_external`] — the secret lives elsewhere (HSM, co-signing
//!   service, hardware wallet). The sealed *unsigned* cell — not just its
//!   hash, the signer may need full payload context — is handed to the
//!   [`ExternalSigner`] and whatever it resolves to is returned unmodified.
//!   No retry, no validation of the returned signature; trust is delegated
//!   entirely.
//!
//! These are deliberately two concrete functions rather than one generic
//! entry point: which call path suspends is part of the API surface, not
//! something to discover at runtime.

use async_trait::async_trait;
use tracing::debug;

use super::TransferError;
use crate::cell::{Cell, CellBuilder, CellError};
use crate::crypto::{keys::SIGNATURE_LENGTH, sign_hash, WalletKeypair};

/// Error type external signers report. Opaque to this crate — it is
/// propagated to the caller without inspection.
pub type SignerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Where the signature bytes land relative to the signed field sequence.
///
/// This is baked into each generation's contract bytecode; callers never
/// choose it. v1–v4 read the signature first, v5 reads it last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplicePolicy {
    /// Signature bytes precede all payload fields (v1–v4).
    Front,
    /// Signature bytes follow all payload fields (v5 signed-auth).
    Tail,
}

/// An asynchronous signer holding the wallet secret somewhere else.
///
/// Receives the sealed unsigned payload and must return the complete
/// *signed* body — signature placement included, since only the signer's
/// side knows nothing further will be appended. Invoked at most once per
/// transfer call.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Signs the sealed unsigned payload, returning the final signed body.
    async fn sign(&self, payload: Cell) -> Result<Cell, SignerError>;
}

/// Signs a signing message with a local secret and splices the signature
/// into the final body per `policy`.
pub fn sign_local(
    message: &CellBuilder,
    keypair: &WalletKeypair,
    policy: SplicePolicy,
) -> Result<Cell, TransferError> {
    let unsigned = message.build();
    let signature = sign_hash(keypair, &unsigned.hash());
    debug!(
        payload_hash = %unsigned.hash_hex(),
        ?policy,
        "signed transfer payload with local secret"
    );
    Ok(splice(&signature, message, policy)?)
}

/// Hands the sealed unsigned payload to an external signer and returns its
/// result untouched.
///
/// The only suspension point in the crate. Failure is propagated unchanged
/// as [`TransferError::Signer`]; abandoning the future leaks nothing — the
/// unsigned builder is simply dropped.
pub async fn sign_external<S: ExternalSigner + ?Sized>(
    message: &CellBuilder,
    signer: &S,
) -> Result<Cell, TransferError> {
    let unsigned = message.build();
    debug!(
        payload_hash = %unsigned.hash_hex(),
        "delegating transfer payload to external signer"
    );
    signer.sign(unsigned).await.map_err(TransferError::Signer)
}

/// Builds the final body from a signature and the unsigned signing message.
fn splice(
    signature: &[u8; SIGNATURE_LENGTH],
    message: &CellBuilder,
    policy: SplicePolicy,
) -> Result<Cell, CellError> {
    let mut body = CellBuilder::new();
    match policy {
        SplicePolicy::Front => {
            body.store_bytes(signature)?;
            body.store_builder(message)?;
        }
        SplicePolicy::Tail => {
            body.store_builder(message)?;
            body.store_bytes(signature)?;
        }
    }
    Ok(body.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn sample_message() -> CellBuilder {
        let mut b = CellBuilder::new();
        b.store_uint(32, 0xCAFE_BABE).unwrap();
        b.store_uint(32, 17).unwrap();
        b.store_ref(CellBuilder::new().build()).unwrap();
        b
    }

    #[test]
    fn front_splice_puts_signature_first() {
        let kp = WalletKeypair::from_seed(&[1u8; 32]);
        let message = sample_message();
        let unsigned = message.build();

        let body = sign_local(&message, &kp, SplicePolicy::Front).unwrap();
        let signature = kp.sign_hash(&unsigned.hash());

        assert_eq!(&body.data()[..64], &signature);
        assert_eq!(&body.data()[64..], unsigned.data());
        assert_eq!(body.bit_len(), 64 * 8 + unsigned.bit_len());
        assert_eq!(body.references().len(), 1);
    }

    #[test]
    fn tail_splice_puts_signature_last() {
        let kp = WalletKeypair::from_seed(&[2u8; 32]);
        let message = sample_message();
        let unsigned = message.build();

        let body = sign_local(&message, &kp, SplicePolicy::Tail).unwrap();
        let signature = kp.sign_hash(&unsigned.hash());

        let split = unsigned.data().len();
        assert_eq!(&body.data()[..split], unsigned.data());
        assert_eq!(&body.data()[split..], &signature);
    }

    #[test]
    fn signature_covers_the_unsigned_hash() {
        let kp = WalletKeypair::from_seed(&[3u8; 32]);
        let message = sample_message();
        let unsigned = message.build();

        let body = sign_local(&message, &kp, SplicePolicy::Front).unwrap();
        let signature: [u8; 64] = body.data()[..64].try_into().unwrap();
        assert!(kp.verify_hash(&unsigned.hash(), &signature));

        // Tampering one payload bit must break verification.
        let mut tampered = CellBuilder::new();
        tampered.store_uint(32, 0xCAFE_BABF).unwrap();
        tampered.store_uint(32, 17).unwrap();
        tampered.store_ref(CellBuilder::new().build()).unwrap();
        assert!(!kp.verify_hash(&tampered.build().hash(), &signature));
    }

    struct RecordingSigner {
        received: Mutex<Vec<Cell>>,
        response: Cell,
    }

    #[async_trait]
    impl ExternalSigner for RecordingSigner {
        async fn sign(&self, payload: Cell) -> Result<Cell, SignerError> {
            self.received.lock().unwrap().push(payload);
            Ok(self.response.clone())
        }
    }

    struct FailingSigner;

    #[async_trait]
    impl ExternalSigner for FailingSigner {
        async fn sign(&self, _payload: Cell) -> Result<Cell, SignerError> {
            Err("hsm offline".into())
        }
    }

    #[tokio::test]
    async fn external_signer_receives_sealed_unsigned_cell() {
        let message = sample_message();
        let response = {
            let mut b = CellBuilder::new();
            b.store_uint(8, 0x5A).unwrap();
            b.build()
        };
        let signer = RecordingSigner {
            received: Mutex::new(Vec::new()),
            response: response.clone(),
        };

        let body = sign_external(&message, &signer).await.unwrap();

        let received = signer.received.lock().unwrap();
        assert_eq!(received.len(), 1, "signer must be invoked exactly once");
        assert_eq!(received[0].hash(), message.build().hash());
        assert_eq!(
            body.hash(),
            response.hash(),
            "signer result must be returned unmodified"
        );
    }

    #[tokio::test]
    async fn external_signer_failure_propagates() {
        let message = sample_message();
        let err = sign_external(&message, &FailingSigner).await.unwrap_err();
        match err {
            TransferError::Signer(source) => {
                assert_eq!(source.to_string(), "hsm offline");
            }
            other => panic!("expected Signer error, got {other:?}"),
        }
    }
}

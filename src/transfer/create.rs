//! The per-generation entry points.
//!
//! One function per wallet generation (plus the `_external` variants for
//! the generations whose contracts support delegated signing). Each one:
//! guards the structural limits, assembles the signing message in the
//! generation's exact field order, and signs — or, for v5 extension-auth,
//! returns the sealed payload unsigned.
//!
//! The `*_signing_message` helpers take a [`Clock`] so tests can pin the
//! derived default deadline; the public functions always use
//! [`SystemClock`].

use super::expiry::{valid_until, Clock, SystemClock};
use super::layout::{self, LayoutInputs};
use super::limits;
use super::signer::{sign_external, sign_local, ExternalSigner, SplicePolicy};
use super::types::{
    ActionList, V1TransferArgs, V2TransferArgs, V3TransferArgs, V4TransferArgs, V5TransferArgs,
    OP_AUTH_EXTENSION,
};
use super::TransferError;
use crate::cell::{Cell, CellBuilder};
use crate::crypto::WalletKeypair;

// ---------------------------------------------------------------------------
// v1
// ---------------------------------------------------------------------------

/// Builds and signs a v1 wallet transfer.
///
/// Layout: `seqno(32)` then, if a message is present, `sendMode(8)` and the
/// message reference. No expiry field, no wallet id. v1 predates the
/// external-signer abstraction and its contract has no such path — local
/// secret only, signature spliced in front.
pub fn create_wallet_transfer_v1(
    args: &V1TransferArgs,
    keypair: &WalletKeypair,
) -> Result<Cell, TransferError> {
    let messages = match &args.message {
        Some(message) => std::slice::from_ref(message),
        None => &[],
    };
    limits::check_message_count(messages.len())?;

    let message = layout::write_signing_message(
        layout::V1_FIELDS,
        &LayoutInputs {
            wallet_id: 0,
            seqno: args.seqno,
            timeout: None,
            send_mode: args.send_mode,
            messages,
        },
        &SystemClock,
    )?;
    sign_local(&message, keypair, SplicePolicy::Front)
}

// ---------------------------------------------------------------------------
// v2
// ---------------------------------------------------------------------------

/// Builds and signs a v2 wallet transfer.
///
/// Layout: `seqno(32) · validUntil(32) · {sendMode(8) · message-ref} × N`,
/// N ≤ 4. Like v1, local secret only — the v2 contract has no
/// external-signer story.
pub fn create_wallet_transfer_v2(
    args: &V2TransferArgs,
    keypair: &WalletKeypair,
) -> Result<Cell, TransferError> {
    let message = v2_signing_message(args, &SystemClock)?;
    sign_local(&message, keypair, SplicePolicy::Front)
}

pub(crate) fn v2_signing_message(
    args: &V2TransferArgs,
    clock: &dyn Clock,
) -> Result<CellBuilder, TransferError> {
    limits::check_message_count(args.messages.len())?;
    layout::write_signing_message(
        layout::V2_FIELDS,
        &LayoutInputs {
            wallet_id: 0,
            seqno: args.seqno,
            timeout: args.timeout,
            send_mode: args.send_mode,
            messages: &args.messages,
        },
        clock,
    )
}

// ---------------------------------------------------------------------------
// v3
// ---------------------------------------------------------------------------

/// Builds and signs a v3 wallet transfer with a local secret.
///
/// Layout: `walletId(32) · validUntil(32) · seqno(32) ·
/// {sendMode(8) · message-ref} × N`, N ≤ 4. Signature spliced in front.
pub fn create_wallet_transfer_v3(
    args: &V3TransferArgs,
    keypair: &WalletKeypair,
) -> Result<Cell, TransferError> {
    let message = v3_signing_message(args, &SystemClock)?;
    sign_local(&message, keypair, SplicePolicy::Front)
}

/// Builds a v3 wallet transfer and delegates signing to an external signer.
///
/// The sealed unsigned payload is handed to `signer`; its result is
/// returned unmodified. Awaiting the signer is the only suspension point.
pub async fn create_wallet_transfer_v3_external<S: ExternalSigner + ?Sized>(
    args: &V3TransferArgs,
    signer: &S,
) -> Result<Cell, TransferError> {
    let message = v3_signing_message(args, &SystemClock)?;
    sign_external(&message, signer).await
}

pub(crate) fn v3_signing_message(
    args: &V3TransferArgs,
    clock: &dyn Clock,
) -> Result<CellBuilder, TransferError> {
    limits::check_message_count(args.messages.len())?;
    layout::write_signing_message(
        layout::V3_FIELDS,
        &LayoutInputs {
            wallet_id: args.wallet_id,
            seqno: args.seqno,
            timeout: args.timeout,
            send_mode: args.send_mode,
            messages: &args.messages,
        },
        clock,
    )
}

// ---------------------------------------------------------------------------
// v4
// ---------------------------------------------------------------------------

/// Builds and signs a v4 wallet transfer with a local secret.
///
/// Layout is v3's plus a reserved `order(8)` byte — always 0 for plain
/// transfers — between seqno and the messages. Signature spliced in front.
pub fn create_wallet_transfer_v4(
    args: &V4TransferArgs,
    keypair: &WalletKeypair,
) -> Result<Cell, TransferError> {
    let message = v4_signing_message(args, &SystemClock)?;
    sign_local(&message, keypair, SplicePolicy::Front)
}

/// Builds a v4 wallet transfer and delegates signing to an external signer.
pub async fn create_wallet_transfer_v4_external<S: ExternalSigner + ?Sized>(
    args: &V4TransferArgs,
    signer: &S,
) -> Result<Cell, TransferError> {
    let message = v4_signing_message(args, &SystemClock)?;
    sign_external(&message, signer).await
}

pub(crate) fn v4_signing_message(
    args: &V4TransferArgs,
    clock: &dyn Clock,
) -> Result<CellBuilder, TransferError> {
    limits::check_message_count(args.messages.len())?;
    layout::write_signing_message(
        layout::V4_FIELDS,
        &LayoutInputs {
            wallet_id: args.wallet_id,
            seqno: args.seqno,
            timeout: args.timeout,
            send_mode: args.send_mode,
            messages: &args.messages,
        },
        clock,
    )
}

// ---------------------------------------------------------------------------
// v5
// ---------------------------------------------------------------------------

/// Builds a v5 extension-auth request.
///
/// Layout: `opcode(32, auth_extension)` followed by the encoded action
/// list, inline. Never signed — authorization comes from the fact that an
/// installed extension delivers the message, so the sealed payload is
/// returned as-is.
pub fn create_wallet_transfer_v5_extension(actions: &ActionList) -> Result<Cell, TransferError> {
    limits::check_action_count(actions.count())?;
    let mut builder = CellBuilder::new();
    builder.store_uint(32, u64::from(OP_AUTH_EXTENSION))?;
    builder.store_cell(actions.cell())?;
    Ok(builder.build())
}

/// Builds and signs a v5 signed-auth transfer with a local secret.
///
/// Layout: `opcode(32, per authType) · walletId(opaque) · validUntil(32) ·
/// seqno(32)` followed by the encoded action list, inline. v5 is the one
/// generation whose contract reads the signature *after* the fields —
/// tail splice.
pub fn create_wallet_transfer_v5_signed(
    args: &V5TransferArgs,
    keypair: &WalletKeypair,
) -> Result<Cell, TransferError> {
    let message = v5_signing_message(args, &SystemClock)?;
    sign_local(&message, keypair, SplicePolicy::Tail)
}

/// Builds a v5 signed-auth transfer and delegates signing to an external
/// signer.
pub async fn create_wallet_transfer_v5_signed_external<S: ExternalSigner + ?Sized>(
    args: &V5TransferArgs,
    signer: &S,
) -> Result<Cell, TransferError> {
    let message = v5_signing_message(args, &SystemClock)?;
    sign_external(&message, signer).await
}

pub(crate) fn v5_signing_message(
    args: &V5TransferArgs,
    clock: &dyn Clock,
) -> Result<CellBuilder, TransferError> {
    limits::check_action_count(args.actions.count())?;
    let mut builder = CellBuilder::new();
    builder.store_uint(32, u64::from(args.auth_type.opcode()))?;
    builder.store_cell(&args.wallet_id)?;
    let deadline = valid_until(args.seqno, args.timeout, clock);
    builder.store_uint(32, u64::from(deadline))?;
    builder.store_uint(32, u64::from(args.seqno))?;
    builder.store_cell(args.actions.cell())?;
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::expiry::FixedClock;
    use crate::transfer::types::{AuthType, SendMode};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const CLOCK: FixedClock = FixedClock(1_700_000_000);

    fn keypair() -> WalletKeypair {
        WalletKeypair::from_seed(&[0x55u8; 32])
    }

    fn message_cell(tag: u8) -> Cell {
        let mut b = CellBuilder::new();
        b.store_uint(8, u64::from(tag)).unwrap();
        b.build()
    }

    fn wallet_id_cell() -> Cell {
        let mut b = CellBuilder::new();
        b.store_uint(32, 0x7FFF_FF11).unwrap();
        b.build()
    }

    fn v3_args(seqno: u32, message_count: usize) -> V3TransferArgs {
        V3TransferArgs {
            wallet_id: 698_983_191,
            seqno,
            send_mode: SendMode::PAY_FEES_SEPARATELY,
            messages: (0..message_count).map(|i| message_cell(i as u8)).collect(),
            timeout: Some(1_700_000_300),
        }
    }

    fn v5_args(seqno: u32) -> V5TransferArgs {
        V5TransferArgs {
            wallet_id: wallet_id_cell(),
            auth_type: AuthType::External,
            seqno,
            actions: ActionList::new(1, message_cell(0xAC)),
            timeout: Some(1_700_000_300),
        }
    }

    // -- determinism --------------------------------------------------------

    #[test]
    fn same_intent_same_unsigned_payload() {
        let a = v3_signing_message(&v3_args(3, 2), &CLOCK).unwrap().build();
        let b = v3_signing_message(&v3_args(3, 2), &CLOCK).unwrap().build();
        assert_eq!(a.data(), b.data());
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn signed_body_is_deterministic_for_fixed_inputs() {
        let kp = keypair();
        let a = create_wallet_transfer_v3(&v3_args(3, 1), &kp).unwrap();
        let b = create_wallet_transfer_v3(&v3_args(3, 1), &kp).unwrap();
        // Explicit timeout pins the only clock-dependent field; Ed25519 is
        // deterministic, so the whole body reproduces byte for byte.
        assert_eq!(a.data(), b.data());
        assert_eq!(a.hash(), b.hash());
    }

    // -- expiry -------------------------------------------------------------

    #[test]
    fn seqno_zero_writes_sentinel_even_with_timeout() {
        let message = v2_signing_message(
            &V2TransferArgs {
                seqno: 0,
                send_mode: SendMode::NONE,
                messages: vec![],
                timeout: Some(1_700_000_300),
            },
            &CLOCK,
        )
        .unwrap()
        .build();
        assert_eq!(&message.data()[4..8], &[0xFF; 4]);
    }

    #[test]
    fn missing_timeout_defaults_to_now_plus_sixty() {
        let mut args = v3_args(5, 0);
        args.timeout = None;
        let message = v3_signing_message(&args, &CLOCK).unwrap().build();
        let expected = (1_700_000_000u32 + 60).to_be_bytes();
        assert_eq!(&message.data()[4..8], &expected);
    }

    #[test]
    fn v5_uses_the_same_expiry_rule() {
        let mut args = v5_args(0);
        args.timeout = Some(42);
        let message = v5_signing_message(&args, &CLOCK).unwrap().build();
        // opcode(4) + wallet id(4) then valid-until.
        assert_eq!(&message.data()[8..12], &[0xFF; 4]);
    }

    // -- structural limits --------------------------------------------------

    #[test]
    fn five_messages_rejected_for_v2_v3_v4() {
        let kp = keypair();
        let messages: Vec<Cell> = (0..5).map(|i| message_cell(i as u8)).collect();

        let v2 = create_wallet_transfer_v2(
            &V2TransferArgs {
                seqno: 1,
                send_mode: SendMode::NONE,
                messages: messages.clone(),
                timeout: None,
            },
            &kp,
        );
        assert!(matches!(
            v2,
            Err(TransferError::TooManyMessages { count: 5, max: 4 })
        ));

        let mut args3 = v3_args(1, 0);
        args3.messages = messages.clone();
        assert!(matches!(
            create_wallet_transfer_v3(&args3, &kp),
            Err(TransferError::TooManyMessages { count: 5, max: 4 })
        ));

        let args4 = V4TransferArgs {
            wallet_id: 1,
            seqno: 1,
            send_mode: SendMode::NONE,
            messages,
            timeout: None,
        };
        assert!(matches!(
            create_wallet_transfer_v4(&args4, &kp),
            Err(TransferError::TooManyMessages { count: 5, max: 4 })
        ));
    }

    #[test]
    fn too_many_actions_rejected_for_v5() {
        let kp = keypair();
        let oversized = ActionList::new(256, message_cell(0));

        assert!(matches!(
            create_wallet_transfer_v5_extension(&oversized),
            Err(TransferError::TooManyActions {
                count: 256,
                max: 255
            })
        ));

        let mut args = v5_args(1);
        args.actions = oversized;
        assert!(matches!(
            create_wallet_transfer_v5_signed(&args, &kp),
            Err(TransferError::TooManyActions {
                count: 256,
                max: 255
            })
        ));
    }

    // -- v1 -----------------------------------------------------------------

    #[test]
    fn v1_with_message_is_seqno_mode_ref() {
        let kp = keypair();
        let body = create_wallet_transfer_v1(
            &V1TransferArgs {
                seqno: 7,
                send_mode: SendMode::new(3),
                message: Some(message_cell(0xAA)),
            },
            &kp,
        )
        .unwrap();

        // signature(64) ++ seqno(4) ++ sendMode(1)
        assert_eq!(body.data().len(), 69);
        assert_eq!(&body.data()[64..68], &[0, 0, 0, 7]);
        assert_eq!(body.data()[68], 3);
        assert_eq!(body.references().len(), 1);
        assert_eq!(body.references()[0].data(), &[0xAA]);
    }

    #[test]
    fn v1_without_message_is_just_signed_seqno() {
        let kp = keypair();
        let body = create_wallet_transfer_v1(
            &V1TransferArgs {
                seqno: 7,
                send_mode: SendMode::new(3),
                message: None,
            },
            &kp,
        )
        .unwrap();

        assert_eq!(body.data().len(), 68);
        assert_eq!(body.references().len(), 0);
    }

    // -- front splice (v1–v4) ----------------------------------------------

    #[test]
    fn v3_signature_precedes_untouched_fields() {
        let kp = keypair();
        let args = v3_args(3, 2);
        let unsigned = v3_signing_message(&args, &SystemClock);
        // Timeout is explicit, so SystemClock is never consulted and the
        // unsigned payload matches the entry point's exactly.
        let unsigned = unsigned.unwrap().build();

        let body = create_wallet_transfer_v3(&args, &kp).unwrap();
        let signature: [u8; 64] = body.data()[..64].try_into().unwrap();

        assert_eq!(&body.data()[64..], unsigned.data());
        assert!(kp.verify_hash(&unsigned.hash(), &signature));
        assert_eq!(body.references().len(), 2);
    }

    #[test]
    fn v4_signature_precedes_untouched_fields_with_order_byte() {
        let kp = keypair();
        let args = V4TransferArgs {
            wallet_id: 698_983_191,
            seqno: 2,
            send_mode: SendMode::new(128),
            messages: vec![message_cell(1)],
            timeout: Some(1_700_000_300),
        };
        let unsigned = v4_signing_message(&args, &SystemClock).unwrap().build();
        let body = create_wallet_transfer_v4(&args, &kp).unwrap();

        assert_eq!(&body.data()[64..], unsigned.data());
        // wallet id(4) + valid until(4) + seqno(4), then the order byte.
        assert_eq!(body.data()[64 + 12], 0);
        let signature: [u8; 64] = body.data()[..64].try_into().unwrap();
        assert!(kp.verify_hash(&unsigned.hash(), &signature));
    }

    // -- v5 -----------------------------------------------------------------

    #[test]
    fn v5_extension_is_opcode_plus_actions_and_unsigned() {
        let actions = ActionList::new(2, message_cell(0xEE));
        let body = create_wallet_transfer_v5_extension(&actions).unwrap();

        assert_eq!(&body.data()[..4], b"extn");
        assert_eq!(&body.data()[4..], &[0xEE]);
        // No signature anywhere: the body is exactly opcode + action list.
        assert_eq!(body.bit_len(), 40);
    }

    #[test]
    fn v5_signed_signature_follows_untouched_fields() {
        let kp = keypair();
        let args = v5_args(9);
        let unsigned = v5_signing_message(&args, &SystemClock).unwrap().build();
        let body = create_wallet_transfer_v5_signed(&args, &kp).unwrap();

        let split = unsigned.data().len();
        assert_eq!(&body.data()[..split], unsigned.data());
        let signature: [u8; 64] = body.data()[split..].try_into().unwrap();
        assert!(kp.verify_hash(&unsigned.hash(), &signature));
    }

    #[test]
    fn v5_opcode_tracks_auth_type() {
        let internal = v5_signing_message(
            &V5TransferArgs {
                auth_type: AuthType::Internal,
                ..v5_args(1)
            },
            &CLOCK,
        )
        .unwrap()
        .build();
        assert_eq!(&internal.data()[..4], b"sint");

        let external = v5_signing_message(&v5_args(1), &CLOCK).unwrap().build();
        assert_eq!(&external.data()[..4], b"sign");
    }

    #[test]
    fn v5_wallet_id_is_stored_verbatim_after_opcode() {
        let message = v5_signing_message(&v5_args(1), &CLOCK).unwrap().build();
        assert_eq!(&message.data()[4..8], &[0x7F, 0xFF, 0xFF, 0x11]);
    }

    // -- external signing ---------------------------------------------------

    struct RecordingSigner {
        received: Mutex<Vec<Cell>>,
        response: Cell,
    }

    #[async_trait]
    impl ExternalSigner for RecordingSigner {
        async fn sign(&self, payload: Cell) -> Result<Cell, crate::transfer::SignerError> {
            self.received.lock().unwrap().push(payload);
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn v3_external_hands_over_unsigned_payload_once() {
        let args = v3_args(3, 1);
        let expected_unsigned = v3_signing_message(&args, &SystemClock).unwrap().build();
        let response = message_cell(0x99);
        let signer = RecordingSigner {
            received: Mutex::new(Vec::new()),
            response: response.clone(),
        };

        let body = create_wallet_transfer_v3_external(&args, &signer)
            .await
            .unwrap();

        let received = signer.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].hash(), expected_unsigned.hash());
        assert_eq!(body.hash(), response.hash());
    }

    #[tokio::test]
    async fn v5_external_returns_signer_result_unmodified() {
        let args = v5_args(4);
        let response = message_cell(0x42);
        let signer = RecordingSigner {
            received: Mutex::new(Vec::new()),
            response: response.clone(),
        };

        let body = create_wallet_transfer_v5_signed_external(&args, &signer)
            .await
            .unwrap();
        assert_eq!(body.data(), response.data());
        assert_eq!(body.hash(), response.hash());
    }

    #[tokio::test]
    async fn external_guard_fires_before_signer_is_invoked() {
        let signer = RecordingSigner {
            received: Mutex::new(Vec::new()),
            response: message_cell(0),
        };
        let mut args = v3_args(1, 0);
        args.messages = (0..5).map(|i| message_cell(i as u8)).collect();

        let result = create_wallet_transfer_v3_external(&args, &signer).await;
        assert!(matches!(
            result,
            Err(TransferError::TooManyMessages { count: 5, max: 4 })
        ));
        assert!(signer.received.lock().unwrap().is_empty());
    }
}

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # TON Wallet Transfer — Payload Assembly & Signing
//!
//! This crate builds the exact binary payload a TON-style wallet smart
//! contract expects as proof of authorization for an outgoing transfer, and
//! produces (or delegates) the signature over it.
//!
//! Six wallet contract generations are supported — v1 through v5, with v5
//! split into two authorization modes. Each generation defines a fixed,
//! non-negotiable field layout; the contract on-chain rejects anything whose
//! field order, width, or signature placement deviates by a single bit. The
//! job of this crate is to reproduce those layouts bit-for-bit, every time.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns:
//!
//! - **cell** — The bit-precision tree builder the payloads are written into.
//! - **crypto** — Ed25519 keypairs and signatures. Don't roll your own.
//! - **transfer** — Per-generation payload assembly, structural guards,
//!   expiry policy, and the local/external signature strategy.
//!
//! ## Signing strategies
//!
//! A transfer is authorized either by a local secret key (synchronous — the
//! signature comes back on the same call stack) or by an external signer
//! such as an HSM or a remote co-signing service (asynchronous — the sealed
//! unsigned payload is handed over and the signed container comes back as a
//! future). The two are separate entry points with separate return shapes;
//! which one suspends is visible in the signature, not hidden behind a
//! runtime branch.
//!
//! ## Quick start
//!
//! ```
//! use ton_wallet_transfer::crypto::WalletKeypair;
//! use ton_wallet_transfer::transfer::{create_wallet_transfer_v3, SendMode, V3TransferArgs};
//!
//! let keypair = WalletKeypair::generate();
//! let body = create_wallet_transfer_v3(
//!     &V3TransferArgs {
//!         wallet_id: 698983191,
//!         seqno: 1,
//!         send_mode: SendMode::PAY_FEES_SEPARATELY,
//!         messages: vec![],
//!         timeout: Some(1_700_000_060),
//!     },
//!     &keypair,
//! )
//! .unwrap();
//! assert_eq!(body.bit_len(), 64 * 8 + 96);
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Layouts are data, not code paths — one writer walks a per-generation
//!    field table, so the seqno-0 sentinel rule exists in exactly one place.
//! 2. Structural limits are checked before any builder or crypto work.
//! 3. No local recovery: every failure is a pre-flight rejection or a
//!    pass-through from a collaborator. Nothing is silently swallowed.

pub mod cell;
pub mod crypto;
pub mod transfer;

pub use cell::{Cell, CellBuilder, CellError};
pub use crypto::WalletKeypair;
pub use transfer::{
    create_wallet_transfer_v1, create_wallet_transfer_v2, create_wallet_transfer_v3,
    create_wallet_transfer_v3_external, create_wallet_transfer_v4,
    create_wallet_transfer_v4_external, create_wallet_transfer_v5_extension,
    create_wallet_transfer_v5_signed, create_wallet_transfer_v5_signed_external, ExternalSigner,
    TransferError,
};

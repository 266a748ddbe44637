//! # Transfer Module
//!
//! Per-generation payload assembly and signing for wallet contract
//! transfers. This is the core of the crate: given a structured transfer
//! intent, it produces the sealed, signed cell the wallet contract will
//! accept — or a precise error before any work was done.
//!
//! ## Architecture
//!
//! ```text
//! types.rs  — SendMode, AuthType, v5 opcodes, ActionList, per-version args
//! limits.rs — Structural guards (max 4 messages, max 255 actions)
//! expiry.rs — Clock trait and the valid-until / seqno-0 sentinel rule
//! layout.rs — Per-generation field-order tables and the single layout writer
//! signer.rs — Splice policy, ExternalSigner trait, local/external signing
//! create.rs — The six entry points, one per wallet generation
//! ```
//!
//! ## Assembly pipeline
//!
//! 1. **Guard** — message/action counts are checked against the
//!    generation's hard cap before any builder or crypto work.
//! 2. **Assemble** — the generation's field table drives a single writer
//!    that packs the signing message into a fresh [`CellBuilder`].
//! 3. **Sign** — the local-secret path signs the message hash and splices
//!    the signature per the generation's policy (front for v1–v4, tail for
//!    v5); the external path hands the sealed unsigned cell to the signer
//!    and returns whatever comes back, untouched.
//!
//! ## Which generations sign how
//!
//! - v1, v2 — local secret only, inline, front splice. These generations
//!   predate the shared signer and their contracts have no external-signer
//!   story; that asymmetry is on-chain reality, not an oversight.
//! - v3, v4 — local or external, front splice.
//! - v5 signed-auth — local or external, tail splice.
//! - v5 extension-auth — never signs; authorization comes from the
//!   extension mechanism itself.
//!
//! [`CellBuilder`]: crate::cell::CellBuilder

pub mod create;
pub mod expiry;
pub mod layout;
pub mod limits;
pub mod signer;
pub mod types;

pub use create::{
    create_wallet_transfer_v1, create_wallet_transfer_v2, create_wallet_transfer_v3,
    create_wallet_transfer_v3_external, create_wallet_transfer_v4,
    create_wallet_transfer_v4_external, create_wallet_transfer_v5_extension,
    create_wallet_transfer_v5_signed, create_wallet_transfer_v5_signed_external,
};
pub use expiry::{Clock, SystemClock, DEFAULT_TIMEOUT_SECS};
pub use limits::{MAX_OUT_ACTIONS, MAX_TRANSFER_MESSAGES};
pub use signer::{ExternalSigner, SignerError, SplicePolicy};
pub use types::{
    ActionList, AuthType, SendMode, V1TransferArgs, V2TransferArgs, V3TransferArgs,
    V4TransferArgs, V5TransferArgs, OP_AUTH_EXTENSION, OP_AUTH_SIGNED_EXTERNAL,
    OP_AUTH_SIGNED_INTERNAL,
};

use crate::cell::CellError;
use thiserror::Error;

/// Errors from transfer assembly and signing.
///
/// There is no local recovery anywhere in this module: every variant is
/// either a pre-flight rejection (the structural limits) or a pass-through
/// from a collaborator (the cell builder, the external signer). Nothing is
/// retried, substituted, or swallowed.
#[derive(Debug, Error)]
pub enum TransferError {
    /// More outgoing messages than the generation's contract can process.
    /// Raised before any builder or cryptographic work.
    #[error("too many outgoing messages in a single transfer: {count} (maximum is {max})")]
    TooManyMessages { count: usize, max: usize },

    /// More out-actions than a v5 request can carry.
    /// Raised before any builder or cryptographic work.
    #[error("too many out actions in a single request: {count} (maximum is {max})")]
    TooManyActions { count: usize, max: usize },

    /// The cell builder rejected a write (capacity overflow, oversized
    /// value). Propagated unchanged.
    #[error("cell build failed")]
    Cell(#[from] CellError),

    /// The external signer failed or rejected the request. Propagated
    /// unchanged — this crate neither retries nor substitutes a fallback.
    #[error("external signer failed")]
    Signer(#[source] SignerError),
}

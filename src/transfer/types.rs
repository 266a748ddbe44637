//! Core type definitions for wallet transfers.
//!
//! These types form the vocabulary of every transfer this crate assembles.
//! They are intentionally small and `Copy`-friendly where possible; the
//! args structs own their cells and are created per call, never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

use crate::cell::{Cell, CellBuilder};

// ---------------------------------------------------------------------------
// SendMode
// ---------------------------------------------------------------------------

/// 8-bit flag set controlling how an outgoing message's value and fees are
/// handled by the wallet contract.
///
/// Flags combine with `|`. The numeric values are contract ABI, not crate
/// convention — do not invent new ones here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SendMode(u8);

impl SendMode {
    /// Ordinary message, fees deducted from the transferred amount.
    pub const NONE: SendMode = SendMode(0);
    /// Sender pays transfer fees separately from the message value.
    pub const PAY_FEES_SEPARATELY: SendMode = SendMode(1);
    /// Ignore errors during the action phase instead of bouncing.
    pub const IGNORE_ERRORS: SendMode = SendMode(2);
    /// Destroy the sender account if its balance reaches zero.
    pub const DESTROY_ACCOUNT: SendMode = SendMode(32);
    /// Carry the entire remaining value of the inbound message.
    pub const CARRY_ALL_REMAINING_INCOMING_VALUE: SendMode = SendMode(64);
    /// Carry the entire remaining balance of the wallet.
    pub const CARRY_ALL_REMAINING_BALANCE: SendMode = SendMode(128);

    /// Wraps a raw flag byte.
    pub const fn new(flags: u8) -> Self {
        SendMode(flags)
    }

    /// The raw flag byte as written into the payload.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for SendMode {
    type Output = SendMode;

    fn bitor(self, rhs: SendMode) -> SendMode {
        SendMode(self.0 | rhs.0)
    }
}

impl fmt::Display for SendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SendMode({:#010b})", self.0)
    }
}

// ---------------------------------------------------------------------------
// v5 authorization
// ---------------------------------------------------------------------------

/// Opcode for a v5 request authorized by an installed extension. Never
/// signed. ASCII "extn".
pub const OP_AUTH_EXTENSION: u32 = 0x6578_746E;

/// Opcode for a v5 signed request arriving as an internal message.
/// ASCII "sint".
pub const OP_AUTH_SIGNED_INTERNAL: u32 = 0x7369_6E74;

/// Opcode for a v5 signed request arriving as an external message.
/// ASCII "sign".
pub const OP_AUTH_SIGNED_EXTERNAL: u32 = 0x7369_676E;

/// How a v5 signed request reaches the contract.
///
/// The choice selects the opcode written at the head of the payload; the
/// rest of the layout is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    /// Request delivered as an internal message (wallet-to-wallet).
    Internal,
    /// Request delivered as an external message (straight from the caller).
    External,
}

impl AuthType {
    /// The 32-bit opcode the contract dispatches on.
    pub const fn opcode(self) -> u32 {
        match self {
            AuthType::Internal => OP_AUTH_SIGNED_INTERNAL,
            AuthType::External => OP_AUTH_SIGNED_EXTERNAL,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::External => write!(f, "external"),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionList
// ---------------------------------------------------------------------------

/// A pre-encoded v5 out-action list.
///
/// The action encoding itself (send-message actions, extension management,
/// the linked-list cell structure) belongs to the caller's encoding layer;
/// this crate only needs the sealed cell to splice inline and the declared
/// action count to enforce the 255-action cap. The count is trusted — it is
/// a structural declaration by the encoder, not something recoverable from
/// the opaque cell.
#[derive(Debug, Clone)]
pub struct ActionList {
    count: usize,
    encoded: Cell,
}

impl ActionList {
    /// Wraps an encoded action list with its declared action count.
    pub fn new(count: usize, encoded: Cell) -> Self {
        Self { count, encoded }
    }

    /// An empty action list (zero actions, empty cell).
    pub fn empty() -> Self {
        Self {
            count: 0,
            encoded: CellBuilder::new().build(),
        }
    }

    /// Number of actions the encoder declared.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The encoded list, stored inline into the payload.
    pub fn cell(&self) -> &Cell {
        &self.encoded
    }
}

// ---------------------------------------------------------------------------
// Per-generation transfer args
// ---------------------------------------------------------------------------

/// Transfer intent for a v1 wallet.
///
/// v1 is the oldest and simplest generation: a sequence number and at most
/// one outgoing message. No wallet id, no expiry field, no external-signer
/// support.
#[derive(Debug, Clone)]
pub struct V1TransferArgs {
    /// Per-wallet replay counter. 0 means the wallet's first-ever transfer.
    pub seqno: u32,
    /// Send mode applied to the message, if any.
    pub send_mode: SendMode,
    /// The single outgoing message, pre-encoded, stored as a child
    /// reference.
    pub message: Option<Cell>,
}

/// Transfer intent for a v2 wallet.
///
/// v2 added the expiry field and multiple messages (up to 4). Still
/// local-secret only.
#[derive(Debug, Clone)]
pub struct V2TransferArgs {
    /// Per-wallet replay counter. 0 means the wallet's first-ever transfer.
    pub seqno: u32,
    /// Send mode applied to every message in this transfer.
    pub send_mode: SendMode,
    /// Pre-encoded outgoing messages, at most 4, stored as child references
    /// in order.
    pub messages: Vec<Cell>,
    /// Absolute unix deadline for the transfer. `None` means "now + 60s".
    /// Ignored entirely when `seqno` is 0 (the sentinel wins).
    pub timeout: Option<u32>,
}

/// Transfer intent for a v3 wallet.
///
/// v3 added the wallet id (so one keypair can control several contracts)
/// and reordered the header: wallet id first, then expiry, then seqno.
#[derive(Debug, Clone)]
pub struct V3TransferArgs {
    /// 32-bit wallet identifier baked into the contract at deployment.
    pub wallet_id: u32,
    /// Per-wallet replay counter. 0 means the wallet's first-ever transfer.
    pub seqno: u32,
    /// Send mode applied to every message in this transfer.
    pub send_mode: SendMode,
    /// Pre-encoded outgoing messages, at most 4.
    pub messages: Vec<Cell>,
    /// Absolute unix deadline for the transfer. `None` means "now + 60s".
    pub timeout: Option<u32>,
}

/// Transfer intent for a v4 wallet.
///
/// v4 is v3 plus a reserved 8-bit order field between seqno and the
/// messages, fixed to 0 ("simple order") for plain transfers.
#[derive(Debug, Clone)]
pub struct V4TransferArgs {
    /// 32-bit wallet identifier baked into the contract at deployment.
    pub wallet_id: u32,
    /// Per-wallet replay counter. 0 means the wallet's first-ever transfer.
    pub seqno: u32,
    /// Send mode applied to every message in this transfer.
    pub send_mode: SendMode,
    /// Pre-encoded outgoing messages, at most 4.
    pub messages: Vec<Cell>,
    /// Absolute unix deadline for the transfer. `None` means "now + 60s".
    pub timeout: Option<u32>,
}

/// Transfer intent for a v5 wallet's signed-auth path.
///
/// v5 replaced the message list with a generic out-action list (up to 255
/// actions) and made the wallet id an opaque pre-encoded value with its own
/// serialization, owned by the caller.
#[derive(Debug, Clone)]
pub struct V5TransferArgs {
    /// Opaque pre-encoded wallet identifier, stored inline after the opcode.
    pub wallet_id: Cell,
    /// Selects the signed-internal or signed-external opcode.
    pub auth_type: AuthType,
    /// Per-wallet replay counter. 0 means the wallet's first-ever transfer.
    pub seqno: u32,
    /// Pre-encoded out-action list, at most 255 actions.
    pub actions: ActionList,
    /// Absolute unix deadline for the transfer. `None` means "now + 60s".
    pub timeout: Option<u32>,
}

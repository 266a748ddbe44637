//! Per-generation field layouts for the message-list wallets (v1–v4).
//!
//! The four generations share their vocabulary — seqno, valid-until,
//! wallet id, a send-mode-prefixed message list — but each contract reads
//! the fields in its own fixed order. Rather than four hand-rolled writers
//! that each re-implement the seqno-0 sentinel, the order is data: a
//! [`Field`] step table per generation, walked by one writer. Adding a
//! hypothetical v4r3 with a reshuffled header would be a new table, not new
//! code.
//!
//! v5 does not fit the table (opcode dispatch, opaque wallet id, inline
//! action list instead of message refs) and is assembled directly in
//! [`super::create`], reusing the same [`valid_until`] rule.

use tracing::trace;

use super::expiry::{valid_until, Clock};
use super::types::SendMode;
use super::TransferError;
use crate::cell::{Cell, CellBuilder};

/// One field-write step in a generation's signing-message layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    /// 32-bit wallet identifier.
    WalletId,
    /// 32-bit valid-until (or the seqno-0 all-ones sentinel).
    ValidUntil,
    /// 32-bit sequence number.
    Seqno,
    /// Reserved 8-bit order field, fixed to 0 (simple order).
    Order,
    /// The message list: 8-bit send mode + child reference, per message.
    Messages,
}

/// v1: seqno, then the (optional) message.
pub(crate) const V1_FIELDS: &[Field] = &[Field::Seqno, Field::Messages];

/// v2: seqno, valid-until, messages.
pub(crate) const V2_FIELDS: &[Field] = &[Field::Seqno, Field::ValidUntil, Field::Messages];

/// v3: wallet id first, then valid-until, then seqno.
pub(crate) const V3_FIELDS: &[Field] = &[
    Field::WalletId,
    Field::ValidUntil,
    Field::Seqno,
    Field::Messages,
];

/// v4: v3 plus the reserved order byte before the messages.
pub(crate) const V4_FIELDS: &[Field] = &[
    Field::WalletId,
    Field::ValidUntil,
    Field::Seqno,
    Field::Order,
    Field::Messages,
];

/// Inputs for one walk of a layout table.
///
/// Fields a generation's table doesn't name are simply never read — v1 and
/// v2 leave `wallet_id` at 0, v1 leaves `timeout` at `None`.
pub(crate) struct LayoutInputs<'a> {
    pub wallet_id: u32,
    pub seqno: u32,
    pub timeout: Option<u32>,
    pub send_mode: SendMode,
    pub messages: &'a [Cell],
}

/// Writes a generation's signing message into a fresh builder by walking
/// its field table.
///
/// Callers have already applied the structural guards; this function only
/// packs bits.
pub(crate) fn write_signing_message(
    fields: &[Field],
    inputs: &LayoutInputs<'_>,
    clock: &dyn Clock,
) -> Result<CellBuilder, TransferError> {
    let mut builder = CellBuilder::new();
    for field in fields {
        match field {
            Field::WalletId => {
                builder.store_uint(32, u64::from(inputs.wallet_id))?;
            }
            Field::ValidUntil => {
                let deadline = valid_until(inputs.seqno, inputs.timeout, clock);
                builder.store_uint(32, u64::from(deadline))?;
            }
            Field::Seqno => {
                builder.store_uint(32, u64::from(inputs.seqno))?;
            }
            Field::Order => {
                // Simple order. v4 reserves the byte; plain transfers
                // always write 0.
                builder.store_uint(8, 0)?;
            }
            Field::Messages => {
                for message in inputs.messages {
                    builder.store_uint(8, u64::from(inputs.send_mode.bits()))?;
                    builder.store_ref(message.clone())?;
                }
            }
        }
    }
    trace!(
        bits = builder.bit_len(),
        messages = inputs.messages.len(),
        "assembled signing message"
    );
    Ok(builder)
}

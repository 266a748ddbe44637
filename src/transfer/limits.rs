//! Structural limits, enforced before any builder or cryptographic work.
//!
//! These caps are contract ABI: a v1–v4 wallet processes at most 4 outgoing
//! messages per transfer, a v5 wallet at most 255 out-actions per request.
//! A payload exceeding them would be rejected on-chain after fees were
//! already spent, so the guards here fail the call before a single bit is
//! written or a single hash computed. A rejected call produces no partial
//! payload — there is nothing to leak and nothing to clean up.

use super::TransferError;

/// Maximum outgoing messages in a single v1–v4 transfer.
pub const MAX_TRANSFER_MESSAGES: usize = 4;

/// Maximum out-actions in a single v5 request.
pub const MAX_OUT_ACTIONS: usize = 255;

/// Rejects a v1–v4 transfer carrying more than [`MAX_TRANSFER_MESSAGES`]
/// messages.
pub(crate) fn check_message_count(count: usize) -> Result<(), TransferError> {
    if count > MAX_TRANSFER_MESSAGES {
        return Err(TransferError::TooManyMessages {
            count,
            max: MAX_TRANSFER_MESSAGES,
        });
    }
    Ok(())
}

/// Rejects a v5 request carrying more than [`MAX_OUT_ACTIONS`] actions.
pub(crate) fn check_action_count(count: usize) -> Result<(), TransferError> {
    if count > MAX_OUT_ACTIONS {
        return Err(TransferError::TooManyActions {
            count,
            max: MAX_OUT_ACTIONS,
        });
    }
    Ok(())
}

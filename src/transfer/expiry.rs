//! Transfer expiry: the valid-until field and the seqno-0 sentinel.
//!
//! Every seqno-aware generation writes a 32-bit valid-until field next to
//! the sequence number. The rule lives here, in exactly one place:
//!
//! - `seqno == 0` — the field is all 32 bits set. The wallet's first-ever
//!   transfer has no prior transfer to bound a replay window against, so
//!   the contract accepts an unconditional "valid forever" sentinel.
//! - otherwise — the caller's absolute unix deadline, or `now + 60s` when
//!   the caller didn't supply one. Sixty seconds reflects expected network
//!   propagation delay and is not configurable at this layer.
//!
//! The sentinel always wins at seqno 0, even over an explicit caller
//! timeout. That is contract behavior, not a convenience.

use chrono::Utc;

/// Default transfer lifetime in seconds when the caller supplies no
/// deadline.
pub const DEFAULT_TIMEOUT_SECS: u32 = 60;

/// Source of the current unix time.
///
/// The assemblers take a clock so the derived default deadline — the only
/// non-deterministic input in the whole pipeline — can be pinned in tests.
/// Production callers never see this: the public entry points use
/// [`SystemClock`].
pub trait Clock {
    /// Current unix time in seconds.
    fn now_unix(&self) -> u32;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u32 {
        Utc::now().timestamp() as u32
    }
}

/// Computes the 32-bit valid-until field for a transfer.
///
/// Returns `u32::MAX` (all bits set) for seqno 0, the caller deadline when
/// present, and `clock.now_unix() + 60` otherwise.
pub fn valid_until(seqno: u32, timeout: Option<u32>, clock: &dyn Clock) -> u32 {
    if seqno == 0 {
        // First-ever transfer: no replay window exists to bound.
        return u32::MAX;
    }
    timeout.unwrap_or_else(|| clock.now_unix() + DEFAULT_TIMEOUT_SECS)
}

/// Test clock frozen at a fixed unix time. Shared by the layout and
/// assembler tests to pin the derived default deadline.
#[cfg(test)]
pub(crate) struct FixedClock(pub u32);

#[cfg(test)]
impl Clock for FixedClock {
    fn now_unix(&self) -> u32 {
        self.0
    }
}

//! Clock to slot conversion
//!
//! A slot is a 10ms bucket counted from the generator's epoch

use chrono::{DateTime, Utc};

use super::SlotID;
use crate::error::SlotIDError;

/// Slot index of `now` relative to an epoch given in Unix milliseconds
#[inline]
pub fn slot_at(epoch_ms: i64, now: DateTime<Utc>) -> Result<u64, SlotIDError> {
    let elapsed = now.timestamp_millis() - epoch_ms;
    if elapsed < 0 {
        return Err(SlotIDError::SlotBeforeEpoch { millis: -elapsed });
    }
    let slot = (elapsed / SlotID::SLOT_MILLIS) as u64;
    if slot > SlotID::MAX_SLOT {
        return Err(SlotIDError::SlotOverflow {
            slot,
            max: SlotID::MAX_SLOT,
        });
    }
    Ok(slot)
}

/// Total span of the slot field in milliseconds
#[inline(always)]
pub const fn max_span_millis() -> i64 {
    (SlotID::MAX_SLOT as i64 + 1) * SlotID::SLOT_MILLIS
}

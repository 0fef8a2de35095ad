use chrono::{DateTime, TimeDelta, Utc};

use crate::SlotID;

/// Components of a SlotID, computed on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecomposedID {
    /// Start of the slot the identifier was minted in
    pub timestamp: DateTime<Utc>,
    pub slots_since_epoch: u64,
    pub node_id: u16,
    pub sequence: u16,
}

/// SlotID component extractor
#[derive(Debug, Copy, Clone)]
pub struct SlotIDExtractor {
    epoch: DateTime<Utc>,
}

impl SlotIDExtractor {
    /// Create an extractor for identifiers minted against `epoch`
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self { epoch }
    }

    /// Extract slot component from a SlotID
    #[inline(always)]
    pub const fn slot(&self, id: u64) -> u64 {
        (id >> SlotID::SLOT_SHIFT) & SlotID::MAX_SLOT
    }

    /// Extract node component from a SlotID
    #[inline(always)]
    pub const fn node(&self, id: u64) -> u16 {
        (id >> SlotID::NODE_SHIFT) as u16
    }

    /// Extract sequence component from a SlotID
    #[inline(always)]
    pub const fn sequence(&self, id: u64) -> u16 {
        (id & SlotID::SEQUENCE_MASK) as u16
    }

    /// Wall-clock start of the slot a SlotID was minted in
    ///
    /// Saturates at `DateTime::<Utc>::MAX_UTC` when the epoch is too late to
    /// represent the slot.
    #[inline]
    pub fn timestamp(&self, id: u64) -> DateTime<Utc> {
        let offset = TimeDelta::milliseconds(self.slot(id) as i64 * SlotID::SLOT_MILLIS);
        self.epoch
            .checked_add_signed(offset)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Decompose SlotID into timestamp, slot, node ID and sequence
    #[inline]
    pub fn decompose(&self, id: u64) -> DecomposedID {
        DecomposedID {
            timestamp: self.timestamp(id),
            slots_since_epoch: self.slot(id),
            node_id: self.node(id),
            sequence: self.sequence(id),
        }
    }
}

//! Packed (slot, sequence) state for lock-free CAS
//!
//! Upper 48 bits hold the slot, lower 16 bits the sequence. Both halves
//! change together in one compare-and-swap.

/// Last issued (slot, sequence) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State(u64);

impl State {
    /// Number of bits used for sequence
    pub const SEQ_BITS: u32 = 16;

    /// Mask to extract sequence from raw value
    pub const SEQ_MASK: u64 = (1 << Self::SEQ_BITS) - 1;

    /// Nothing issued yet. Its slot half lies above any 39-bit slot.
    pub const UNSET: State = State(u64::MAX);

    #[inline(always)]
    pub const fn new(slot: u64, sequence: u16) -> Self {
        Self((slot << Self::SEQ_BITS) | (sequence as u64))
    }

    #[inline(always)]
    pub const fn slot(self) -> u64 {
        self.0 >> Self::SEQ_BITS
    }

    #[inline(always)]
    pub const fn sequence(self) -> u16 {
        (self.0 & Self::SEQ_MASK) as u16
    }

    #[inline(always)]
    pub const fn is_unset(self) -> bool {
        self.0 == Self::UNSET.0
    }

    /// Get raw u64 value for atomic operations
    #[inline(always)]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotID;

    #[test]
    fn test_state_holds_both_halves() {
        let state = State::new(SlotID::MAX_SLOT, SlotID::MAX_SEQUENCE);
        assert_eq!(state.slot(), SlotID::MAX_SLOT);
        assert_eq!(state.sequence(), SlotID::MAX_SEQUENCE);
        assert!(!state.is_unset());
    }

    #[test]
    fn test_unset_is_distinct() {
        assert!(State::UNSET.is_unset());
        assert!(State::UNSET.slot() > SlotID::MAX_SLOT);
        assert!(!State::new(0, 0).is_unset());
        assert_eq!(State::from_raw(State::UNSET.raw()), State::UNSET);
    }
}

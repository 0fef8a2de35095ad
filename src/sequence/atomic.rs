use std::sync::atomic::{AtomicU64, Ordering};

use super::{next_sequence, SequenceResolver, State};
use crate::error::SlotIDError;
use crate::SlotID;

/// Lock-free sequence resolver
///
/// The last issued slot and sequence live in one `AtomicU64`, so a single
/// compare-and-swap moves both. Cache-line aligned to keep neighbouring
/// data off the contended line.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicSequenceResolver {
    state: AtomicU64,
}

impl AtomicSequenceResolver {
    pub fn new() -> Self {
        Self {
            state: AtomicU64::new(State::UNSET.raw()),
        }
    }

    /// Attempt to move from `expected` to `new`
    #[inline(always)]
    fn cas_state(&self, expected: State, new: State) -> bool {
        self.state
            .compare_exchange_weak(expected.raw(), new.raw(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for AtomicSequenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceResolver for AtomicSequenceResolver {
    #[inline]
    fn resolve(&self, slot: u64) -> Result<u16, SlotIDError> {
        loop {
            let current = State::from_raw(self.state.load(Ordering::Acquire));
            let Some(sequence) = next_sequence(current, slot) else {
                return Ok(SlotID::SEQUENCE_EXHAUSTED);
            };
            if self.cas_state(current, State::new(slot, sequence)) {
                return Ok(sequence);
            }
            std::hint::spin_loop();
        }
    }
}

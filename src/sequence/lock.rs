use parking_lot::Mutex;

use super::{next_sequence, SequenceResolver, State};
use crate::error::SlotIDError;
use crate::SlotID;

/// Sequence resolver serialising every decision behind one mutex
///
/// Trades the CAS retry loop for fair access under heavy contention.
#[derive(Debug)]
pub struct LockSequenceResolver {
    state: Mutex<State>,
}

impl LockSequenceResolver {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::UNSET),
        }
    }
}

impl Default for LockSequenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceResolver for LockSequenceResolver {
    fn resolve(&self, slot: u64) -> Result<u16, SlotIDError> {
        let mut state = self.state.lock();
        match next_sequence(*state, slot) {
            Some(sequence) => {
                *state = State::new(slot, sequence);
                Ok(sequence)
            }
            None => Ok(SlotID::SEQUENCE_EXHAUSTED),
        }
    }
}

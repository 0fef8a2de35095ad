//! ID generation logic
//!
//! Core next_id() implementation with fast and slow paths

use std::time::{Duration, Instant};

use tracing::trace;

use super::wait::{next_backoff, sleep_until_next_slot, spin_wait, INITIAL_BACKOFF};
use super::SlotID;
use crate::clock::Clock;
use crate::error::SlotIDError;

impl<C: Clock> SlotID<C> {
    /// Generate a new SlotID
    ///
    /// Waits, without bound, for the next slot when the current one is
    /// exhausted. Fails only when the clock cannot be mapped to a slot or a
    /// custom resolver fails.
    #[inline]
    pub fn next_id(&self) -> Result<u64, SlotIDError> {
        self.next_id_until(None)
    }

    /// Generate a new SlotID, giving up at `deadline` if still waiting for a slot
    pub fn next_id_with_deadline(&self, deadline: Instant) -> Result<u64, SlotIDError> {
        self.next_id_until(Some(deadline))
    }

    /// Generate a new SlotID, giving up after `timeout` if still waiting for a slot
    ///
    /// A timeout too large to represent as an [`Instant`] waits without bound.
    pub fn next_id_with_timeout(&self, timeout: Duration) -> Result<u64, SlotIDError> {
        self.next_id_until(Instant::now().checked_add(timeout))
    }

    #[inline]
    fn next_id_until(&self, deadline: Option<Instant>) -> Result<u64, SlotIDError> {
        let slot = self.current_slot()?;

        // Fast path: sequence available in the current slot
        if let Some(sequence) = self.resolve(slot)? {
            return Ok(self.assemble_id(slot, sequence));
        }

        self.next_id_slow_path(slot, deadline)
    }

    /// Ask the resolver for a sequence; None means exhausted
    #[inline(always)]
    fn resolve(&self, slot: u64) -> Result<Option<u16>, SlotIDError> {
        let sequence = self.resolver.resolve(slot)?;
        if sequence <= SlotID::MAX_SEQUENCE {
            Ok(Some(sequence))
        } else if sequence == SlotID::SEQUENCE_EXHAUSTED {
            Ok(None)
        } else {
            Err(SlotIDError::sequence(format!(
                "resolver returned {sequence}, above the sentinel {}",
                SlotID::SEQUENCE_EXHAUSTED
            )))
        }
    }

    /// Slow path: wait for the clock to leave `slot`, then resolve again
    #[cold]
    #[inline(never)]
    fn next_id_slow_path(
        &self,
        mut slot: u64,
        deadline: Option<Instant>,
    ) -> Result<u64, SlotIDError> {
        trace!(slot, node_id = self.node_id, "slot exhausted");
        let mut backoff = INITIAL_BACKOFF;

        loop {
            slot = self.wait_next_slot(slot, backoff, deadline)?;
            if let Some(sequence) = self.resolve(slot)? {
                return Ok(self.assemble_id(slot, sequence));
            }
            backoff = next_backoff(backoff);
        }
    }

    /// Block until the clock reports a slot after `from_slot`
    pub(crate) fn wait_next_slot(
        &self,
        from_slot: u64,
        backoff: Duration,
        deadline: Option<Instant>,
    ) -> Result<u64, SlotIDError> {
        if let Some(slot) = spin_wait(from_slot, &self.config, deadline, || self.current_slot())? {
            return Ok(slot);
        }
        sleep_until_next_slot(from_slot, backoff, deadline, || self.current_slot())
    }
}

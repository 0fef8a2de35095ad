//! Wait and backoff strategies for slot exhaustion
//!
//! Polls the clock until the slot advances: spin first, then short sleeps
//! with exponential backoff capped well below one slot width

use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::config::SlotIDConfig;
use crate::error::SlotIDError;

/// First sleep once spinning gives up
pub const INITIAL_BACKOFF: Duration = Duration::from_micros(250);

/// Maximum backoff duration
pub const MAX_BACKOFF: Duration = Duration::from_millis(2);

#[inline(always)]
fn check_deadline(from_slot: u64, deadline: Option<Instant>) -> Result<(), SlotIDError> {
    match deadline {
        Some(d) if Instant::now() >= d => Err(SlotIDError::DeadlineExceeded { slot: from_slot }),
        _ => Ok(()),
    }
}

/// Poll the slot in a spin loop
///
/// Returns Ok(Some(slot)) once the slot moved past `from_slot`, Ok(None) if
/// spin loops are exhausted
#[inline]
pub fn spin_wait<F>(
    from_slot: u64,
    config: &SlotIDConfig,
    deadline: Option<Instant>,
    current_slot: F,
) -> Result<Option<u64>, SlotIDError>
where
    F: Fn() -> Result<u64, SlotIDError>,
{
    if !config.spin_enabled() || config.spin_loops() == 0 {
        return Ok(None);
    }

    let yield_every = config.spin_yield_every();

    for i in 0..config.spin_loops() {
        let slot = current_slot()?;
        if slot > from_slot {
            return Ok(Some(slot));
        }
        check_deadline(from_slot, deadline)?;

        std::hint::spin_loop();

        if yield_every != 0 && i % yield_every == yield_every - 1 {
            thread::yield_now();
        }
    }

    Ok(None)
}

/// Sleep with exponential backoff, returning the new slot once advanced
pub fn sleep_until_next_slot<F>(
    from_slot: u64,
    mut backoff: Duration,
    deadline: Option<Instant>,
    current_slot: F,
) -> Result<u64, SlotIDError>
where
    F: Fn() -> Result<u64, SlotIDError>,
{
    let mut warned = false;
    loop {
        check_deadline(from_slot, deadline)?;
        let nap = match deadline {
            Some(d) => backoff.min(d.saturating_duration_since(Instant::now())),
            None => backoff,
        };
        thread::sleep(nap);

        let slot = current_slot()?;
        if slot > from_slot {
            return Ok(slot);
        }
        if slot < from_slot && !warned {
            warn!(
                from_slot,
                slot, "clock moved backwards; waiting for it to catch up"
            );
            warned = true;
        }
        backoff = next_backoff(backoff);
    }
}

/// Calculate next backoff duration with exponential growth capped at MAX_BACKOFF
#[inline(always)]
pub fn next_backoff(current: Duration) -> Duration {
    current.saturating_mul(2).min(MAX_BACKOFF)
}
